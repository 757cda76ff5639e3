//! A coaching session — the guided flow state for one learner.
//!
//! # Turn handling
//!
//! 1. Blank input is rejected
//! 2. Mid-flow questions get general advice, then the last question again
//! 3. Answers get stage feedback, are recorded, and the next question follows
//! 4. The location answer also produces the summary and finishes the flow
//! 5. After that, every message is open Q&A
//!
//! Answers, stage and summary change only once every model call of the turn
//! has succeeded, so a failed call leaves the learner on the same question.

use crate::coach::{Coach, Reply};
use crate::error::CoachError;
use crate::intent::looks_like_question;
use crate::stage::{Answers, GENERAL_INSTRUCTION, Stage};
use gybcoach_core::message::{Message, Transcript};
use gybcoach_core::provider::Usage;
use tracing::info;

/// Shown right before the summary is displayed.
pub const SUMMARY_NOTICE: &str = "Here is your SIYB summary below:";

const GREETING_PREFIX: &str = "Assalam o alaikum! 👋\n\n";

/// What one learner message produced.
#[derive(Debug, Clone)]
pub struct Turn {
    /// Assistant messages to display, in order
    pub replies: Vec<String>,
    pub stage_before: Stage,
    pub stage_after: Stage,
    /// The message was treated as a side question
    pub side_question: bool,
    /// Set on the turn that finished the questionnaire
    pub summary: Option<String>,
}

impl Turn {
    pub fn advanced(&self) -> bool {
        self.stage_after != self.stage_before
    }
}

/// The conversation state of one learner.
pub struct CoachSession {
    coach: Coach,
    stage: Stage,
    answers: Answers,
    last_question: String,
    summary: Option<String>,
    transcript: Transcript,
    usage: Usage,
}

impl CoachSession {
    /// Start at the first question with the greeting already in the transcript.
    pub fn new(coach: Coach) -> Self {
        let first_question = Stage::AskBackground.question().unwrap_or_default().to_string();
        let mut transcript = Transcript::new();
        transcript.push(Message::assistant(format!("{GREETING_PREFIX}{first_question}")));

        Self {
            coach,
            stage: Stage::AskBackground,
            answers: Answers::default(),
            last_question: first_question,
            summary: None,
            transcript,
            usage: Usage::default(),
        }
    }

    /// Throw away all progress and start over with the same coach.
    pub fn restart(self) -> Self {
        info!("Session restarted");
        Self::new(self.coach)
    }

    /// The opening message.
    pub fn greeting(&self) -> &str {
        self.transcript
            .messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn last_question(&self) -> &str {
        &self.last_question
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Tokens spent so far, including calls of failed turns.
    pub fn usage(&self) -> Usage {
        self.usage
    }

    /// Handle one learner message.
    pub async fn handle_input(&mut self, input: &str) -> Result<Turn, CoachError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(CoachError::EmptyInput);
        }

        self.transcript.push(Message::user(text));
        let stage_before = self.stage;

        let turn = match stage_before.field() {
            Some(_) if looks_like_question(text) => self.side_question(text).await?,
            Some(field) => {
                let feedback = self.call_feedback(stage_before.instruction(), text).await?;
                let mut answers = self.answers.clone();
                answers.set(field, text);

                let next = stage_before.next();
                match next.question() {
                    Some(question) => {
                        self.commit(next, answers, question.to_string(), None);
                        Turn {
                            replies: vec![feedback.content, question.to_string()],
                            stage_before,
                            stage_after: next,
                            side_question: false,
                            summary: None,
                        }
                    }
                    None => {
                        let summary = self.call_summary(&answers).await?;
                        let last_question = self.last_question.clone();
                        self.commit(next, answers, last_question, Some(summary.content.clone()));
                        Turn {
                            replies: vec![feedback.content, SUMMARY_NOTICE.to_string()],
                            stage_before,
                            stage_after: next,
                            side_question: false,
                            summary: Some(summary.content),
                        }
                    }
                }
            }
            None => {
                let reply = self.call_feedback(stage_before.instruction(), text).await?;
                Turn {
                    replies: vec![reply.content],
                    stage_before,
                    stage_after: stage_before,
                    side_question: false,
                    summary: None,
                }
            }
        };

        for reply in &turn.replies {
            self.transcript.push(Message::assistant(reply.clone()));
        }

        if turn.advanced() {
            info!(
                from = %turn.stage_before,
                to = %turn.stage_after,
                step = turn.stage_after.index(),
                "Stage advanced"
            );
        }

        Ok(turn)
    }

    async fn side_question(&mut self, text: &str) -> Result<Turn, CoachError> {
        let reply = self.call_feedback(GENERAL_INSTRUCTION, text).await?;
        Ok(Turn {
            replies: vec![reply.content, self.last_question.clone()],
            stage_before: self.stage,
            stage_after: self.stage,
            side_question: true,
            summary: None,
        })
    }

    async fn call_feedback(&mut self, instruction: &str, text: &str) -> Result<Reply, CoachError> {
        let reply = self.coach.feedback(instruction, text).await?;
        self.record_usage(&reply);
        Ok(reply)
    }

    async fn call_summary(&mut self, answers: &Answers) -> Result<Reply, CoachError> {
        let reply = self.coach.summarize(answers).await?;
        self.record_usage(&reply);
        Ok(reply)
    }

    fn record_usage(&mut self, reply: &Reply) {
        if let Some(usage) = &reply.usage {
            self.usage.add(usage);
        }
    }

    fn commit(&mut self, stage: Stage, answers: Answers, last_question: String, summary: Option<String>) {
        self.stage = stage;
        self.answers = answers;
        self.last_question = last_question;
        if summary.is_some() {
            self.summary = summary;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::CoachSettings;
    use crate::stage::Field;
    use crate::test_helpers::*;
    use gybcoach_core::knowledge::Chunk;
    use gybcoach_core::message::Role;
    use gybcoach_knowledge::KeywordKnowledgeBase;
    use std::sync::Arc;

    fn session_with(provider: Arc<ScriptedProvider>) -> CoachSession {
        let knowledge = Arc::new(KeywordKnowledgeBase::from_chunks(vec![
            Chunk::new("Skills and experience point you to a business idea."),
            Chunk::new("Customers should be a specific group of people."),
        ]));
        CoachSession::new(Coach::new(provider, knowledge, CoachSettings::default()))
    }

    #[test]
    fn new_session_greets_with_first_question() {
        let session = session_with(Arc::new(ScriptedProvider::texts(&[])));
        assert_eq!(session.stage(), Stage::AskBackground);
        assert!(session.greeting().starts_with("Assalam o alaikum!"));
        assert!(session.greeting().ends_with(session.last_question()));
        assert_eq!(session.transcript().len(), 1);
        assert!(session.summary().is_none());
    }

    #[tokio::test]
    async fn answer_records_and_advances() {
        let provider = Arc::new(ScriptedProvider::texts(&["Great skills!"]));
        let mut session = session_with(provider.clone());

        let turn = session.handle_input("  I am a tailor  ").await.unwrap();

        assert!(turn.advanced());
        assert!(!turn.side_question);
        assert_eq!(turn.stage_after, Stage::AskIdea);
        assert_eq!(turn.replies[0], "Great skills!");
        assert_eq!(turn.replies[1], Stage::AskIdea.question().unwrap());
        assert_eq!(session.answers().get(Field::Background), Some("I am a tailor"));
        assert_eq!(session.last_question(), Stage::AskIdea.question().unwrap());
        assert!(provider.request(0).messages[0]
            .content
            .contains(Stage::AskBackground.instruction()));
    }

    #[tokio::test]
    async fn side_question_does_not_advance() {
        let provider = Arc::new(ScriptedProvider::texts(&["Skills matter because..."]));
        let mut session = session_with(provider.clone());

        let turn = session.handle_input("Why do skills matter?").await.unwrap();

        assert!(turn.side_question);
        assert!(!turn.advanced());
        assert_eq!(session.stage(), Stage::AskBackground);
        assert_eq!(session.answers().answered(), 0);
        assert_eq!(turn.replies.len(), 2);
        assert_eq!(turn.replies[1], Stage::AskBackground.question().unwrap());
        assert!(provider.request(0).messages[0].content.contains(GENERAL_INSTRUCTION));
    }

    #[tokio::test]
    async fn full_flow_produces_summary_then_open_qa() {
        let provider = Arc::new(ScriptedProvider::texts(&[
            "fb background",
            "fb idea",
            "fb customers",
            "fb competitors",
            "fb location",
            "SUMMARY",
            "open answer",
        ]));
        let mut session = session_with(provider.clone());

        let answers = [
            "I am a tailor",
            "School uniforms",
            "Parents at the local school",
            "Two shops in the bazaar",
            "From home",
        ];
        let mut stages = vec![session.stage()];
        for answer in answers {
            session.handle_input(answer).await.unwrap();
            stages.push(session.stage());
        }
        assert_eq!(stages, Stage::ALL.to_vec());

        assert_eq!(session.summary(), Some("SUMMARY"));
        assert_eq!(session.answers().answered(), 5);
        // Summary request carries every answer.
        let summary_request = provider.request(5);
        assert!(summary_request.messages[1].content.contains("Location: From home"));

        // After the summary, even a question-shaped message is plain Q&A.
        let turn = session.handle_input("What next?").await.unwrap();
        assert!(!turn.side_question);
        assert_eq!(turn.replies, vec!["open answer".to_string()]);
        assert_eq!(session.stage(), Stage::Finished);
        assert_eq!(provider.calls(), 7);
    }

    #[tokio::test]
    async fn finishing_turn_reports_summary() {
        let provider = Arc::new(ScriptedProvider::texts(&[
            "a", "b", "c", "d", "location feedback", "the summary",
        ]));
        let mut session = session_with(provider);

        for answer in ["bg", "idea", "customers", "competitors"] {
            session.handle_input(answer).await.unwrap();
        }
        let turn = session.handle_input("online shop").await.unwrap();

        assert_eq!(turn.stage_after, Stage::Finished);
        assert_eq!(turn.summary.as_deref(), Some("the summary"));
        assert_eq!(turn.replies, vec!["location feedback".to_string(), SUMMARY_NOTICE.to_string()]);
        let last = session.transcript().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, SUMMARY_NOTICE);
    }

    #[tokio::test]
    async fn empty_input_is_rejected_without_changes() {
        let provider = Arc::new(ScriptedProvider::texts(&[]));
        let mut session = session_with(provider.clone());

        let err = session.handle_input("   ").await.unwrap_err();
        assert!(matches!(err, CoachError::EmptyInput));
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn provider_failure_keeps_stage() {
        let provider = Arc::new(ScriptedProvider::failing());
        let mut session = session_with(provider);

        let err = session.handle_input("I am a tailor").await.unwrap_err();
        assert!(matches!(err, CoachError::Provider(_)));
        assert_eq!(session.stage(), Stage::AskBackground);
        assert_eq!(session.answers().answered(), 0);
    }

    #[tokio::test]
    async fn summary_failure_keeps_location_stage() {
        let mut results: Vec<_> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|t| Ok(make_text_response(t)))
            .collect();
        results.push(Err(network_error()));
        let provider = Arc::new(ScriptedProvider::new(results));
        let mut session = session_with(provider);

        for answer in ["bg", "idea", "customers", "competitors"] {
            session.handle_input(answer).await.unwrap();
        }
        assert!(session.handle_input("from home").await.is_err());

        assert_eq!(session.stage(), Stage::AskLocation);
        assert_eq!(session.answers().get(Field::Location), None);
        assert!(session.summary().is_none());
        // The feedback call of the failed turn is still counted.
        assert_eq!(session.usage().total_tokens, 15 * 5);
    }

    #[tokio::test]
    async fn restart_clears_progress() {
        let provider = Arc::new(ScriptedProvider::texts(&["fb"]));
        let mut session = session_with(provider);
        session.handle_input("I am a tailor").await.unwrap();
        assert_eq!(session.stage(), Stage::AskIdea);

        let session = session.restart();
        assert_eq!(session.stage(), Stage::AskBackground);
        assert_eq!(session.answers().answered(), 0);
        assert_eq!(session.transcript().len(), 1);
    }
}
