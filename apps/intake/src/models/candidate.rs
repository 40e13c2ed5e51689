use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The seven scalar fields collected during intake, in the order they are asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Email,
    Phone,
    YearsExperience,
    DesiredPositions,
    CurrentLocation,
    TechStack,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FullName,
        Field::Email,
        Field::Phone,
        Field::YearsExperience,
        Field::DesiredPositions,
        Field::CurrentLocation,
        Field::TechStack,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::YearsExperience => "years_experience",
            Field::DesiredPositions => "desired_positions",
            Field::CurrentLocation => "current_location",
            Field::TechStack => "tech_stack",
        }
    }

    /// Human-readable label, e.g. "Years Experience".
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::YearsExperience => "Years Experience",
            Field::DesiredPositions => "Desired Positions",
            Field::CurrentLocation => "Current Location",
            Field::TechStack => "Tech Stack",
        }
    }
}

/// Ordered technology -> formatted question block mapping.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionSet(Vec<(String, String)>);

impl QuestionSet {
    /// Inserts a block; an existing technology keeps its position and gets the new text.
    pub fn insert(&mut self, technology: impl Into<String>, questions: impl Into<String>) {
        let technology = technology.into();
        let questions = questions.into();
        match self.0.iter_mut().find(|(t, _)| *t == technology) {
            Some(slot) => slot.1 = questions,
            None => self.0.push((technology, questions)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(t, q)| (t.as_str(), q.as_str()))
    }
}

impl Serialize for QuestionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (technology, questions) in &self.0 {
            map.serialize_entry(technology, questions)?;
        }
        map.end()
    }
}

struct QuestionSetVisitor;

impl<'de> Visitor<'de> for QuestionSetVisitor {
    type Value = QuestionSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of technology to question text")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = QuestionSet::default();
        while let Some((technology, questions)) = access.next_entry::<String, String>()? {
            set.insert(technology, questions);
        }
        Ok(set)
    }
}

/// Reads entries in document order, so a round trip keeps technology order.
impl<'de> Deserialize<'de> for QuestionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(QuestionSetVisitor)
    }
}

/// Flat per-session candidate record.
///
/// Every scalar field is an unverified string: the extractor only pattern-matches
/// its trigger, it never validates content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub years_experience: Option<String>,
    pub desired_positions: Option<String>,
    pub current_location: Option<String>,
    pub tech_stack: Option<String>,
    #[serde(default)]
    pub questions: QuestionSet,
}

impl CandidateRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::YearsExperience => &self.years_experience,
            Field::DesiredPositions => &self.desired_positions,
            Field::CurrentLocation => &self.current_location,
            Field::TechStack => &self.tech_stack,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::YearsExperience => &mut self.years_experience,
            Field::DesiredPositions => &mut self.desired_positions,
            Field::CurrentLocation => &mut self.current_location,
            Field::TechStack => &mut self.tech_stack,
        }
    }

    /// A field is unset when absent or empty.
    pub fn is_unset(&self, field: Field) -> bool {
        self.get(field).map_or(true, str::is_empty)
    }

    /// Writes `value` only if the field is still unset. Returns whether the write happened.
    pub fn fill(&mut self, field: Field, value: String) -> bool {
        if !self.is_unset(field) {
            return false;
        }
        *self.slot_mut(field) = Some(value);
        true
    }

    /// Unset fields in declaration order.
    pub fn pending_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.is_unset(*f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_all_fields_pending_in_order() {
        let record = CandidateRecord::default();
        assert_eq!(record.pending_fields(), Field::ALL.to_vec());
    }

    #[test]
    fn test_fill_is_first_write_wins() {
        let mut record = CandidateRecord::default();
        assert!(record.fill(Field::Email, "a@b.com".to_string()));
        assert!(!record.fill(Field::Email, "c@d.com".to_string()));
        assert_eq!(record.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_empty_string_counts_as_unset() {
        let mut record = CandidateRecord {
            phone: Some(String::new()),
            ..Default::default()
        };
        assert!(record.is_unset(Field::Phone));
        assert!(record.fill(Field::Phone, "5551234567".to_string()));
        assert_eq!(record.phone.as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_question_set_preserves_insertion_order_in_json() {
        let mut set = QuestionSet::default();
        set.insert("python", "1. A?");
        set.insert("java", "1. B?");
        set.insert("python", "1. C?");

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"python":"1. C?","java":"1. B?"}"#);
    }

    #[test]
    fn test_question_set_deserializes_in_document_order() {
        let json = r#"{"sql":"1. A?","java":"1. B?","c++":"1. C?"}"#;
        let set: QuestionSet = serde_json::from_str(json).unwrap();
        let order: Vec<&str> = set.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["sql", "java", "c++"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), json);
    }

    #[test]
    fn test_candidate_serializes_with_snake_case_keys() {
        let record = CandidateRecord {
            full_name: Some("Jane Doe".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["full_name"], "Jane Doe");
        assert!(value["email"].is_null());
        assert!(value["questions"].as_object().unwrap().is_empty());
    }
}
