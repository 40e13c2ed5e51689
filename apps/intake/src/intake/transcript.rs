//! Transcript export: the session's messages plus the candidate record, as JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::models::candidate::CandidateRecord;
use crate::models::transcript::TranscriptEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptExport {
    /// ISO-8601 UTC, `Z` suffixed.
    pub timestamp: String,
    pub candidate: CandidateRecord,
    pub messages: Vec<TranscriptEntry>,
}

impl TranscriptExport {
    pub fn new(
        now: DateTime<Utc>,
        candidate: CandidateRecord,
        messages: Vec<TranscriptEntry>,
    ) -> Self {
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
            candidate,
            messages,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize transcript")
    }
}

/// `transcript_YYYYMMDD_HHMMSS_<session id>.json`; the id keeps same-second sessions apart.
pub fn artifact_name(now: DateTime<Utc>, session_id: Uuid) -> String {
    format!(
        "transcript_{}_{}.json",
        now.format("%Y%m%d_%H%M%S"),
        session_id
    )
}

/// Writes the transcript to `dir/<file_name>`, creating `dir` if needed.
pub async fn write_transcript(
    dir: &Path,
    file_name: &str,
    export: &TranscriptExport,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create transcript dir {}", dir.display()))?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, export.to_json()?)
        .await
        .with_context(|| format!("Failed to write transcript {}", path.display()))?;

    info!("Transcript written to {}", path.display());
    Ok(path)
}
