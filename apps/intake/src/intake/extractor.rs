//! Field Extractor: maps one raw utterance to at most one candidate field value.
//!
//! Rules are an ordered chain of (field, trigger, value) triples. The first rule whose
//! field is still unset AND whose trigger matches wins; later rules are never evaluated.
//! No content validation happens here: values are whatever the heuristics captured.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::candidate::{CandidateRecord, Field};

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:my name is|i am|i'm)\s+(.+)").expect("name pattern is valid")
});

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

const POSITION_KEYWORDS: &[&str] = &["engineer", "developer", "manager"];
const LOCATION_KEYWORDS: &[&str] = &["city", "country", "from"];
const TECH_KEYWORDS: &[&str] = &["python", "java", "c++", "javascript"];

/// A single extraction rule. `extract` is only called after `matches` returned true.
struct Rule {
    field: Field,
    matches: fn(&Utterance<'_>) -> bool,
    extract: fn(&Utterance<'_>) -> String,
}

/// The utterance plus its lowercase form, computed once per call.
struct Utterance<'a> {
    raw: &'a str,
    lower: String,
}

impl<'a> Utterance<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
        }
    }

    fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }

    fn digit_runs(&self) -> impl Iterator<Item = &'a str> {
        DIGITS_RE.find_iter(self.raw).map(|m| m.as_str())
    }

    /// First run of exactly ten consecutive digits.
    /// Ten digits inside a longer run (e.g. with a country code) do not count.
    fn phone_run(&self) -> Option<&'a str> {
        self.digit_runs().find(|run| run.len() == 10)
    }
}

fn trimmed(u: &Utterance<'_>) -> String {
    u.raw.trim().to_string()
}

fn name_triggered(u: &Utterance<'_>) -> bool {
    u.contains_any(&["name", "i am"])
}

fn name_value(u: &Utterance<'_>) -> String {
    NAME_RE
        .captures(u.raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| trimmed(u))
}

fn email_triggered(u: &Utterance<'_>) -> bool {
    u.raw.contains('@')
}

fn phone_triggered(u: &Utterance<'_>) -> bool {
    u.phone_run().is_some()
}

fn phone_value(u: &Utterance<'_>) -> String {
    u.phone_run().unwrap_or_default().to_string()
}

fn years_triggered(u: &Utterance<'_>) -> bool {
    u.digit_runs().next().is_some()
}

fn years_value(u: &Utterance<'_>) -> String {
    u.digit_runs().next().unwrap_or_default().to_string()
}

fn position_triggered(u: &Utterance<'_>) -> bool {
    u.contains_any(POSITION_KEYWORDS)
}

fn location_triggered(u: &Utterance<'_>) -> bool {
    u.contains_any(LOCATION_KEYWORDS)
}

fn stack_triggered(u: &Utterance<'_>) -> bool {
    u.raw.contains(',') || u.contains_any(TECH_KEYWORDS)
}

/// Priority order. Position in this list is the only tie-breaker between rules.
const RULES: &[Rule] = &[
    Rule {
        field: Field::FullName,
        matches: name_triggered,
        extract: name_value,
    },
    Rule {
        field: Field::Email,
        matches: email_triggered,
        extract: trimmed,
    },
    Rule {
        field: Field::Phone,
        matches: phone_triggered,
        extract: phone_value,
    },
    Rule {
        field: Field::YearsExperience,
        matches: years_triggered,
        extract: years_value,
    },
    Rule {
        field: Field::DesiredPositions,
        matches: position_triggered,
        extract: trimmed,
    },
    Rule {
        field: Field::CurrentLocation,
        matches: location_triggered,
        extract: trimmed,
    },
    Rule {
        field: Field::TechStack,
        matches: stack_triggered,
        extract: trimmed,
    },
];

/// Returns the single `(field, value)` update this utterance produces, if any.
pub fn extract_field(record: &CandidateRecord, utterance: &str) -> Option<(Field, String)> {
    let utterance = Utterance::new(utterance);
    RULES
        .iter()
        .filter(|rule| record.is_unset(rule.field))
        .find(|rule| (rule.matches)(&utterance))
        .map(|rule| (rule.field, (rule.extract)(&utterance)))
}

/// Applies [`extract_field`] to the record. Returns the filled field ("handled"), if any.
pub fn apply(record: &mut CandidateRecord, utterance: &str) -> Option<Field> {
    let (field, value) = extract_field(record, utterance)?;
    record.fill(field, value);
    Some(field)
}
