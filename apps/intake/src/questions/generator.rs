//! Question Generator: pluggable, trait-based boundary to whatever produces raw question text.
//!
//! Default with an API key: `LlmQuestionGenerator` (Claude via `llm_client`).
//! Without one: `FallbackOnlyGenerator`, which yields nothing so every technology
//! gets the deterministic fallback questions.
//!
//! `AppState` holds an `Arc<dyn QuestionGenerator>`, chosen at startup from config.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError};
use crate::questions::prompts::{build_question_prompt, QUESTION_SYSTEM};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Produces raw, unparsed question text for one technology.
///
/// Output is untrusted: it is always run through the post-processor.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        technology: &str,
        years_of_experience: &str,
        count: usize,
    ) -> Result<String, GenerationError>;

    /// Short name for logs, e.g. "llm" or "fallback".
    fn backend(&self) -> &'static str;
}

/// Calls [`QuestionGenerator::generate`] and turns any failure into empty text.
pub async fn generate_or_empty(
    generator: &dyn QuestionGenerator,
    technology: &str,
    years_of_experience: &str,
    count: usize,
) -> String {
    match generator
        .generate(technology, years_of_experience, count)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "Question generation via {} failed for {technology}: {e}; using fallback questions",
                generator.backend()
            );
            String::new()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmQuestionGenerator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmQuestionGenerator(pub LlmClient);

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate(
        &self,
        technology: &str,
        years_of_experience: &str,
        count: usize,
    ) -> Result<String, GenerationError> {
        let prompt = build_question_prompt(technology, years_of_experience, count);
        Ok(self.0.call_text(&prompt, QUESTION_SYSTEM).await?)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FallbackOnlyGenerator
// ────────────────────────────────────────────────────────────────────────────

/// Generator used when no model is configured. Always returns empty text.
pub struct FallbackOnlyGenerator;

#[async_trait]
impl QuestionGenerator for FallbackOnlyGenerator {
    async fn generate(
        &self,
        _technology: &str,
        _years_of_experience: &str,
        _count: usize,
    ) -> Result<String, GenerationError> {
        Ok(String::new())
    }

    fn backend(&self) -> &'static str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    #[async_trait]
    impl QuestionGenerator for Broken {
        async fn generate(
            &self,
            _technology: &str,
            _years_of_experience: &str,
            _count: usize,
        ) -> Result<String, GenerationError> {
            Err(GenerationError::Llm(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }))
        }

        fn backend(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty_text() {
        assert_eq!(generate_or_empty(&Broken, "python", "3", 3).await, "");
    }

    #[tokio::test]
    async fn test_fallback_only_generator_is_empty() {
        let text = generate_or_empty(&FallbackOnlyGenerator, "java", "some", 5).await;
        assert!(text.is_empty());
    }
}
