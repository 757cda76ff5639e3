//! Error types for the coach domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator (provider, knowledge, channel) has its own error enum.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse knowledge file at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel connection lost: {0}")]
    ConnectionLost(String),
}
