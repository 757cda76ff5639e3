//! Knowledge trait — read-only lookup over the GYB manual chunks.
//!
//! The manual is authored once and shipped as a JSON file of paragraphs.
//! A knowledge base is loaded at startup and only ever searched.

use crate::error::KnowledgeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A paragraph of manual text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Optional identifier from the source file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Section label (e.g. "Finding your business idea")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Manual page the paragraph came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// The paragraph text
    pub content: String,
}

impl Chunk {
    /// Create a chunk with content only.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            section: None,
            page: None,
            content: content.into(),
        }
    }

    /// Attach a section label.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// A chunk returned by a search, with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,

    /// Number of query tokens found in the chunk
    pub score: usize,
}

/// A query against the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeQuery {
    /// The search text (usually the learner's last message)
    pub text: String,

    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    3
}

impl KnowledgeQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: default_limit(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// The core KnowledgeBase trait.
///
/// Implementations: keyword overlap over an in-memory store.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// The backend name (e.g., "keyword").
    fn name(&self) -> &str;

    /// Return the most relevant chunks, best first.
    async fn search(
        &self,
        query: &KnowledgeQuery,
    ) -> std::result::Result<Vec<ScoredChunk>, KnowledgeError>;

    /// Number of chunks loaded.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
