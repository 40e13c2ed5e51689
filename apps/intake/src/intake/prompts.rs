// Canned assistant messages for the intake conversation.

use crate::models::candidate::Field;

pub const GREETING: &str = "Hello! I\u{2019}m TalentScout\u{2019}s Hiring Assistant. \
    Let\u{2019}s get started. You can type 'exit' anytime to finish.";

pub const FAREWELL: &str =
    "Thanks for your time! We\u{2019}ll review your info and contact you soon. Goodbye!";

pub const QUESTIONS_INTRO: &str = "Great! Let\u{2019}s go through some technical questions:";

pub const CLOSING: &str = "That\u{2019}s all from my side. Thank you!";

pub const NOT_UNDERSTOOD: &str = "Sorry, I didn\u{2019}t quite understand that. Could you rephrase?";

/// Any of these, as a case-insensitive substring, ends the session.
pub const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye", "stop", "end"];

/// The question asked while `field` is the first pending field.
pub fn field_prompt(field: Field) -> &'static str {
    match field {
        Field::FullName => "May I have your full name, please?",
        Field::Email => "What is your email address?",
        Field::Phone => "Can you share your phone number?",
        Field::YearsExperience => "How many years of professional experience do you have?",
        Field::DesiredPositions => "Which position(s) are you applying for?",
        Field::CurrentLocation => "Where are you currently located (city and country)?",
        Field::TechStack => {
            "Please list the programming languages, frameworks, databases, and tools you are \
             proficient in (comma-separated)."
        }
    }
}

/// One assistant message per technology: bold heading, then the numbered questions.
pub fn question_block(technology: &str, questions: &str) -> String {
    format!("**{technology}**\n{questions}")
}

pub fn is_exit(utterance: &str) -> bool {
    let lower = utterance.to_lowercase();
    EXIT_KEYWORDS.iter().any(|k| lower.contains(k))
}
