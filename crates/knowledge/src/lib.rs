//! Knowledge store implementations for the GYB coach.
//!
//! The manual is a JSON array of paragraphs. It is loaded once at startup and
//! searched by keyword overlap with the learner's message.

pub mod keyword;
pub mod tokenize;

pub use keyword::KeywordKnowledgeBase;
pub use tokenize::tokenize;
