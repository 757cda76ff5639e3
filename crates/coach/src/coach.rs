//! Stateless coaching calls: retrieve, prompt, complete.

use crate::error::CoachError;
use crate::prompt;
use crate::stage::{Answers, GENERAL_INSTRUCTION};
use gybcoach_config::AppConfig;
use gybcoach_core::knowledge::{KnowledgeBase, KnowledgeQuery, ScoredChunk};
use gybcoach_core::message::Message;
use gybcoach_core::provider::{Provider, ProviderRequest, Usage};
use std::sync::Arc;
use tracing::debug;

/// Model and retrieval settings for a coach.
#[derive(Debug, Clone)]
pub struct CoachSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Chunks retrieved per message
    pub top_k: usize,
    /// Characters of each chunk placed in the prompt
    pub excerpt_chars: usize,
}

impl CoachSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.model().to_string(),
            temperature: config.default_temperature,
            max_tokens: Some(config.default_max_tokens),
            top_k: config.knowledge.top_k,
            excerpt_chars: config.knowledge.excerpt_chars,
        }
    }
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// One model reply and what went into it.
#[derive(Debug, Clone)]
pub struct Reply {
    pub content: String,
    pub usage: Option<Usage>,
    /// Manual chunks placed in the prompt (empty for summaries)
    pub sources: Vec<ScoredChunk>,
}

/// Talks to the model on behalf of a session.
pub struct Coach {
    provider: Arc<dyn Provider>,
    knowledge: Arc<dyn KnowledgeBase>,
    settings: CoachSettings,
}

impl Coach {
    pub fn new(
        provider: Arc<dyn Provider>,
        knowledge: Arc<dyn KnowledgeBase>,
        settings: CoachSettings,
    ) -> Self {
        Self {
            provider,
            knowledge,
            settings,
        }
    }

    pub fn settings(&self) -> &CoachSettings {
        &self.settings
    }

    /// Feedback on `user_text` following `instruction`, grounded in the
    /// manual chunks that best match the text.
    pub async fn feedback(&self, instruction: &str, user_text: &str) -> Result<Reply, CoachError> {
        let query = KnowledgeQuery::new(user_text).with_limit(self.settings.top_k);
        let sources = self.knowledge.search(&query).await?;
        let context = prompt::format_context(&sources, self.settings.excerpt_chars);

        debug!(
            sources = sources.len(),
            knowledge = self.knowledge.name(),
            "Retrieved manual context"
        );

        let messages = vec![
            Message::system(prompt::feedback_system_prompt(instruction, &context)),
            Message::user(user_text),
        ];
        let (content, usage) = self.complete(messages).await?;

        Ok(Reply {
            content,
            usage,
            sources,
        })
    }

    /// General entrepreneurship advice for a free-form question.
    pub async fn advise(&self, question: &str) -> Result<Reply, CoachError> {
        self.feedback(GENERAL_INSTRUCTION, question).await
    }

    /// The business-idea summary for a completed questionnaire.
    pub async fn summarize(&self, answers: &Answers) -> Result<Reply, CoachError> {
        let messages = vec![
            Message::system(prompt::summary_system_prompt()),
            Message::user(prompt::summary_user_prompt(answers)),
        ];
        let (content, usage) = self.complete(messages).await?;

        Ok(Reply {
            content,
            usage,
            sources: Vec::new(),
        })
    }

    async fn complete(&self, messages: Vec<Message>) -> Result<(String, Option<Usage>), CoachError> {
        let request = ProviderRequest {
            model: self.settings.model.clone(),
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let response = self.provider.complete(request).await?;
        Ok((response.message.content, response.usage))
    }
}
