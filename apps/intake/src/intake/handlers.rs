//! Axum route handlers for the Intake API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::controller::{SessionSnapshot, TurnOutcome};
use crate::intake::transcript::write_transcript;
use crate::models::transcript::SessionPhase;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub text: String,
}

/// POST /api/v1/sessions
///
/// Starts a session. The greeting is already in `messages`.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let session = state.new_session();
    let snapshot = session.snapshot();
    state.sessions.insert(session).await;
    (StatusCode::CREATED, Json(snapshot))
}

/// POST /api/v1/sessions/:id/turns
///
/// Feeds one utterance to the session. When the turn ends the session, the transcript
/// is written to the transcript dir; a failed write is logged, never returned.
pub async fn handle_turn(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<TurnOutcome>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;

    let outcome = session
        .handle_turn(&request.text, state.generator.as_ref())
        .await?;

    if outcome.phase == SessionPhase::Ended {
        if let Some((file_name, export)) = session.transcript() {
            if let Err(e) = write_transcript(&state.config.transcript_dir, &file_name, &export).await
            {
                warn!("Session {session_id}: transcript not saved: {e:#}");
            }
        }
    }

    Ok(Json(outcome))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let session = handle.lock().await;
    Ok(Json(session.snapshot()))
}

/// GET /api/v1/sessions/:id/transcript
///
/// Download of the finished transcript. 409 until the session has ended.
pub async fn handle_get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = state.sessions.get(session_id).await?;
    let session = handle.lock().await;

    let (file_name, export) = session.transcript().ok_or_else(|| {
        AppError::NotReady("Transcript is available once the session has ended".to_string())
    })?;

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )],
        Json(export),
    ))
}
