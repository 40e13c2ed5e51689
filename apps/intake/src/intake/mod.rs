// Conversational intake: field extraction, slot-filling control and transcript export.

pub mod controller;
pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod store;
pub mod transcript;
