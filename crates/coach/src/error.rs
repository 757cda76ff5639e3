//! Errors surfaced by a coaching turn.

use gybcoach_core::error::{KnowledgeError, ProviderError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Nothing to answer: the message was empty")]
    EmptyInput,

    #[error("Coach could not reach the model: {0}")]
    Provider(#[from] ProviderError),

    #[error("Manual lookup failed: {0}")]
    Knowledge(#[from] KnowledgeError),
}
