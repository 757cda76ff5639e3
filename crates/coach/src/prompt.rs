//! Prompt text sent to the model.

use crate::stage::{Answers, Field};
use gybcoach_core::knowledge::ScoredChunk;

/// Context line used when retrieval found nothing.
pub const NO_CONTEXT: &str = "No relevant chunks found. Give general GYB advice.";

/// Render retrieved chunks as a bulleted list of excerpts.
pub fn format_context(chunks: &[ScoredChunk], excerpt_chars: usize) -> String {
    if chunks.is_empty() {
        return NO_CONTEXT.to_string();
    }

    chunks
        .iter()
        .map(|c| format!("- {}", excerpt(&c.chunk.content, excerpt_chars)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First `max_chars` characters of `text`, with `...` when cut.
///
/// The Streamlit app appended `...` to every excerpt, cut or not. Here it
/// marks real truncation only, so a short paragraph reads as complete.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// System prompt for feedback on one learner message.
pub fn feedback_system_prompt(instruction: &str, context: &str) -> String {
    format!(
        "You are a friendly SIYB GYB coach.\n{instruction}\n\nRelevant GYB manual text:\n{context}"
    )
}

/// System prompt for the final business-idea summary.
pub fn summary_system_prompt() -> &'static str {
    concat!(
        "Write a simple SIYB-style business idea summary including:\n",
        "1) Idea title\n",
        "2) One-line description\n",
        "3) Main customers\n",
        "4) Problem solved\n",
        "5) Why idea fits this location\n",
        "6) 3 simple next steps."
    )
}

/// The learner's answers laid out for the summary request.
pub fn summary_user_prompt(answers: &Answers) -> String {
    Field::ALL
        .iter()
        .map(|f| format!("{}: {}", f.label(), answers.get(*f).unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}
