use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::intake::controller::Session;
use crate::intake::store::SessionStore;
use crate::questions::generator::QuestionGenerator;
use crate::questions::postprocess::QuestionCount;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable generator. `LlmQuestionGenerator` when an API key is set, otherwise fallback-only.
    pub generator: Arc<dyn QuestionGenerator>,
    pub config: Config,
}

impl AppState {
    /// Starts a fresh session using the configured question count policy.
    pub fn new_session(&self) -> Session {
        let id = Uuid::new_v4();
        let count = match (self.config.question_count, self.config.question_seed) {
            (Some(n), _) => QuestionCount::Fixed(n),
            (None, Some(seed)) => QuestionCount::seeded(seed),
            (None, None) => QuestionCount::random(),
        };
        Session::start(id, count)
    }
}
