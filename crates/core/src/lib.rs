//! # GYB Coach Core
//!
//! Domain types, traits, and error definitions for the GYB coach.
//! This crate has **no framework dependencies** — it defines the domain model
//! the other crates implement against.
//!
//! Each external collaborator is a trait here:
//! - [`Provider`] — the hosted LLM
//! - [`KnowledgeBase`] — the manual chunk store
//! - [`Channel`] — the chat surface
//!
//! Implementations live in their own crates so the coach can be tested with
//! scripted stand-ins.

pub mod channel;
pub mod error;
pub mod knowledge;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use channel::{Channel, ChannelId, ChannelMessage};
pub use error::{ChannelError, KnowledgeError, ProviderError};
pub use knowledge::{Chunk, KnowledgeBase, KnowledgeQuery, ScoredChunk};
pub use message::{Message, Role, Transcript};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
