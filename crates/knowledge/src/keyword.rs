//! Keyword knowledge base — token-overlap retrieval over manual chunks.
//!
//! Each chunk's token set is computed once at load time. A query scores every
//! chunk by how many of its tokens the chunk contains; zero-score chunks are
//! never returned.

use crate::tokenize::tokenize;
use async_trait::async_trait;
use gybcoach_core::error::KnowledgeError;
use gybcoach_core::knowledge::{Chunk, KnowledgeBase, KnowledgeQuery, ScoredChunk};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

struct IndexedChunk {
    chunk: Chunk,
    tokens: BTreeSet<String>,
}

/// An immutable in-memory chunk store searched by keyword overlap.
pub struct KeywordKnowledgeBase {
    chunks: Vec<IndexedChunk>,
}

impl KeywordKnowledgeBase {
    /// Build a store from chunks already in memory.
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        let chunks = chunks
            .into_iter()
            .map(|chunk| IndexedChunk {
                tokens: tokenize(&chunk.content),
                chunk,
            })
            .collect();
        Self { chunks }
    }

    /// An empty store; every search returns nothing.
    pub fn empty() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Load chunks from a JSON file holding an array of chunk objects.
    ///
    /// A missing file gives an empty store so the coach still runs without
    /// manual excerpts. A file that exists but can't be read or parsed is an
    /// error.
    pub fn from_path(path: &Path) -> Result<Self, KnowledgeError> {
        if !path.exists() {
            warn!(
                path = %path.display(),
                "Knowledge file not found, continuing without manual excerpts"
            );
            return Ok(Self::empty());
        }

        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let chunks = Self::parse(&content).map_err(|e| KnowledgeError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        info!(path = %path.display(), count = chunks.len(), "Knowledge file loaded");
        Ok(Self::from_chunks(chunks))
    }

    /// Parse the chunk file format.
    pub fn parse(content: &str) -> Result<Vec<Chunk>, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// All chunks in file order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().map(|c| &c.chunk)
    }

    /// Score and rank chunks for `query`, best first.
    pub fn rank(&self, query: &KnowledgeQuery) -> Vec<ScoredChunk> {
        if query.text.trim().is_empty() || self.chunks.is_empty() {
            return Vec::new();
        }

        let query_tokens = tokenize(&query.text);

        let mut scored: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .map(|c| ScoredChunk {
                score: c.tokens.intersection(&query_tokens).count(),
                chunk: c.chunk.clone(),
            })
            .filter(|s| s.score > 0)
            .collect();

        // Stable: equal scores keep file order.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(query.limit);

        debug!(
            query_tokens = query_tokens.len(),
            results = scored.len(),
            "Keyword search complete"
        );
        scored
    }
}

#[async_trait]
impl KnowledgeBase for KeywordKnowledgeBase {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn search(&self, query: &KnowledgeQuery) -> Result<Vec<ScoredChunk>, KnowledgeError> {
        Ok(self.rank(query))
    }

    fn len(&self) -> usize {
        self.chunks.len()
    }
}
