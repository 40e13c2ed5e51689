//! Slot-Filling Controller: drives one intake session turn by turn.
//!
//! Flow per turn: exit check → extract → prompt for the next pending field, or,
//! once every field is filled, generate questions for each technology and end.
//! A `Session` is owned by exactly one caller at a time; turns are strictly serialized.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::extractor;
use crate::intake::prompts::{
    field_prompt, is_exit, question_block, CLOSING, FAREWELL, GREETING, NOT_UNDERSTOOD,
    QUESTIONS_INTRO,
};
use crate::intake::transcript::{artifact_name, TranscriptExport};
use crate::models::candidate::{CandidateRecord, Field};
use crate::models::transcript::{SessionPhase, TranscriptEntry};
use crate::questions::generator::{generate_or_empty, QuestionGenerator};
use crate::questions::postprocess::{finalize_questions, QuestionCount};

/// Only the first this-many technologies get questions.
pub const MAX_TECHNOLOGIES: usize = 5;

/// Used in the prompt when years of experience was never captured.
const UNKNOWN_EXPERIENCE: &str = "some";

// ────────────────────────────────────────────────────────────────────────────
// Views returned to callers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct FieldStatus {
    pub field: Field,
    pub label: &'static str,
    pub value: Option<String>,
}

/// Display snapshot of a session: phase, record and per-field status.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    pub candidate: CandidateRecord,
    pub fields: Vec<FieldStatus>,
    pub pending: Vec<Field>,
    pub messages: Vec<TranscriptEntry>,
}

/// Result of one turn: the assistant messages it produced plus the updated state.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub messages: Vec<String>,
    pub phase: SessionPhase,
    pub candidate: CandidateRecord,
    pub pending: Vec<Field>,
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    candidate: CandidateRecord,
    phase: SessionPhase,
    messages: Vec<TranscriptEntry>,
    question_count: QuestionCount,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session, greets, and moves straight to `Collect`.
    pub fn start(id: Uuid, question_count: QuestionCount) -> Self {
        let mut session = Self {
            id,
            candidate: CandidateRecord::default(),
            phase: SessionPhase::Greet,
            messages: Vec::new(),
            question_count,
            ended_at: None,
        };
        session.say(GREETING);
        session.phase = SessionPhase::Collect;
        info!("Session {id} started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pending_fields(&self) -> Vec<Field> {
        self.candidate.pending_fields()
    }

    pub fn is_ended(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    /// Processes one user utterance.
    ///
    /// Fails with `SessionEnded` once the session is over and with `Validation` for
    /// blank input; neither failure touches the transcript.
    pub async fn handle_turn(
        &mut self,
        utterance: &str,
        generator: &dyn QuestionGenerator,
    ) -> Result<TurnOutcome, AppError> {
        if self.is_ended() {
            return Err(AppError::SessionEnded);
        }
        if utterance.trim().is_empty() {
            return Err(AppError::Validation("text cannot be empty".to_string()));
        }

        self.messages.push(TranscriptEntry::user(utterance));
        let first_reply = self.messages.len();

        if is_exit(utterance) {
            info!(
                "Session {} exited by user with {} field(s) pending",
                self.id,
                self.pending_fields().len()
            );
            self.say(FAREWELL);
            self.end();
        } else {
            self.advance(utterance, generator).await;
        }

        Ok(TurnOutcome {
            messages: self.messages[first_reply..]
                .iter()
                .map(|m| m.content.clone())
                .collect(),
            phase: self.phase,
            candidate: self.candidate.clone(),
            pending: self.pending_fields(),
        })
    }

    async fn advance(&mut self, utterance: &str, generator: &dyn QuestionGenerator) {
        let handled = extractor::apply(&mut self.candidate, utterance);
        if let Some(field) = handled {
            debug!("Session {}: filled {}", self.id, field.key());
        }

        let pending = self.pending_fields();
        if let Some(next) = pending.first() {
            self.say(field_prompt(*next));
        } else if self.phase != SessionPhase::Ask {
            self.phase = SessionPhase::Ask;
            info!("Session {}: all fields collected, generating questions", self.id);
            self.ask_questions(generator).await;
            self.end();
        } else if handled.is_none() {
            self.say(NOT_UNDERSTOOD);
        }
    }

    /// Runs the generation pipeline once per technology, in order, then emits the blocks.
    async fn ask_questions(&mut self, generator: &dyn QuestionGenerator) {
        let technologies = split_technologies(self.candidate.tech_stack.as_deref().unwrap_or(""));
        let yoe = self
            .candidate
            .years_experience
            .clone()
            .filter(|y| !y.is_empty())
            .unwrap_or_else(|| UNKNOWN_EXPERIENCE.to_string());

        for technology in technologies {
            let count = self.question_count.next_count();
            let raw = generate_or_empty(generator, &technology, &yoe, count).await;
            let formatted = finalize_questions(&technology, &raw, count);
            debug!("Session {}: {count} question(s) for {technology}", self.id);
            self.candidate.questions.insert(technology, formatted);
        }

        let blocks: Vec<String> = self
            .candidate
            .questions
            .iter()
            .map(|(tech, qs)| question_block(tech, qs))
            .collect();

        self.say(QUESTIONS_INTRO);
        for block in blocks {
            self.say(block);
        }
        self.say(CLOSING);
    }

    fn say(&mut self, text: impl Into<String>) {
        self.messages.push(TranscriptEntry::assistant(text));
    }

    fn end(&mut self) {
        self.phase = SessionPhase::Ended;
        self.ended_at = Some(Utc::now());
        info!("Session {} ended", self.id);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            phase: self.phase,
            candidate: self.candidate.clone(),
            fields: Field::ALL
                .into_iter()
                .map(|field| FieldStatus {
                    field,
                    label: field.label(),
                    value: self
                        .candidate
                        .get(field)
                        .filter(|v| !v.is_empty())
                        .map(str::to_string),
                })
                .collect(),
            pending: self.pending_fields(),
            messages: self.messages.clone(),
        }
    }

    /// The exportable transcript and its artifact name. Only available once ended.
    pub fn transcript(&self) -> Option<(String, TranscriptExport)> {
        let ended_at = self.ended_at?;
        Some((
            artifact_name(ended_at, self.id),
            TranscriptExport::new(ended_at, self.candidate.clone(), self.messages.clone()),
        ))
    }
}

/// The first [`MAX_TECHNOLOGIES`] comma-separated tokens, trimmed. Blank tokens use up a
/// slot but get no questions.
pub fn split_technologies(tech_stack: &str) -> Vec<String> {
    tech_stack
        .split(',')
        .take(MAX_TECHNOLOGIES)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
