//! Question Post-Processor: turns raw generator text into exactly `n` numbered questions.
//!
//! The only well-formedness check is the presence of a `?`. Whatever the generator
//! returns (including nothing) is topped up from a fixed fallback pool.

use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[\).]\s*").expect("ordinal pattern is valid"));

/// Size of the fallback pool, and therefore the largest count we can always satisfy.
pub const MAX_QUESTIONS: usize = 5;

/// Range a random count is drawn from.
const RANDOM_COUNT_RANGE: std::ops::RangeInclusive<usize> = 3..=5;

/// Fallback questions in their fixed order, templated with the technology name.
pub fn fallback_questions(technology: &str) -> [String; MAX_QUESTIONS] {
    [
        format!("What are key features of {technology}?"),
        format!("Explain a common use case of {technology}."),
        format!("What are advantages and limitations of {technology}?"),
        format!("Describe a problem you solved using {technology}."),
        format!("What best practices should be followed in {technology}?"),
    ]
}

/// Extracts candidate questions from raw generator output.
fn clean_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| ORDINAL_RE.replace(line, "").trim().to_string())
        .filter(|line| line.contains('?'))
        .collect()
}

/// Produces exactly `n` newline-separated `"N. question"` lines for `technology`.
///
/// `n` is clamped to `1..=MAX_QUESTIONS`.
pub fn finalize_questions(technology: &str, raw: &str, n: usize) -> String {
    let n = n.clamp(1, MAX_QUESTIONS);
    let mut questions = clean_lines(raw);
    questions.truncate(n);

    let fallbacks = fallback_questions(technology);
    while questions.len() < n {
        questions.push(fallbacks[questions.len()].clone());
    }

    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How many questions to ask per technology.
#[derive(Debug, Clone)]
pub enum QuestionCount {
    /// Uniform draw from {3, 4, 5} for each technology.
    Random(StdRng),
    Fixed(usize),
}

impl QuestionCount {
    pub fn random() -> Self {
        QuestionCount::Random(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        QuestionCount::Random(StdRng::seed_from_u64(seed))
    }

    pub fn next_count(&mut self) -> usize {
        match self {
            QuestionCount::Random(rng) => rng.gen_range(RANDOM_COUNT_RANGE),
            QuestionCount::Fixed(n) => (*n).clamp(1, MAX_QUESTIONS),
        }
    }
}
