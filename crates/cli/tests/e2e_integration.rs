//! End-to-end integration tests for the GYB coach.
//!
//! These tests exercise the full pipeline from a learner message to the
//! coach's replies: manual loading, retrieval, prompt assembly, the guided
//! questionnaire and the final summary.

use std::io::Write;
use std::sync::{Arc, Mutex};

use gybcoach_coach::{Coach, CoachError, CoachSession, CoachSettings, Field, Stage};
use gybcoach_config::AppConfig;
use gybcoach_core::error::{KnowledgeError, ProviderError};
use gybcoach_core::knowledge::{KnowledgeBase, KnowledgeQuery};
use gybcoach_core::message::{Message, Role};
use gybcoach_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use gybcoach_knowledge::KeywordKnowledgeBase;

const SAMPLE_CHUNKS: &str = include_str!("../assets/gyb_chunks.json");

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted results in sequence and keeps the
/// requests it was sent.
struct ScriptedProvider {
    results: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(results: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            results: Mutex::new(results),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(text_response(t))).collect())
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn system_prompt(&self, n: usize) -> String {
        self.requests.lock().unwrap()[n].messages[0].content.clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let results = self.results.lock().unwrap();
        let call = requests.len();
        if call >= results.len() {
            panic!(
                "ScriptedProvider exhausted: call #{}, have {}",
                call,
                results.len()
            );
        }
        requests.push(request);
        results[call].clone()
    }
}

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock".into(),
    }
}

fn manual_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CHUNKS.as_bytes()).unwrap();
    file
}

fn session_with(provider: Arc<ScriptedProvider>) -> CoachSession {
    let file = manual_file();
    let knowledge = KeywordKnowledgeBase::from_path(file.path()).unwrap();
    CoachSession::new(Coach::new(
        provider,
        Arc::new(knowledge),
        CoachSettings::from_config(&AppConfig::default()),
    ))
}

// ── E2E: Guided flow ─────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_full_questionnaire_to_summary() {
    let provider = Arc::new(ScriptedProvider::texts(&[
        "Your sewing skills are a strong start.",
        "- Uniforms for local schools\nStrength: steady demand",
        "Parents of one school is a good, specific group.",
        "Offer faster fittings than the bazaar shops.",
        "Home is fine while you start.",
        "Idea title: Neighbourhood Uniform Tailoring",
    ]));
    let mut session = session_with(provider.clone());
    assert!(session.greeting().starts_with("Assalam o alaikum!"));

    let answers = [
        "I am a tailor with ten years of sewing experience",
        "Making school uniforms for children in my area",
        "Parents of children at the two local schools",
        "Two tailoring shops in the bazaar with high prices",
        "I will work from home and deliver to customers",
    ];
    for (i, answer) in answers.iter().enumerate() {
        let turn = session.handle_input(answer).await.unwrap();
        assert_eq!(turn.stage_before, Stage::ALL[i]);
        assert_eq!(turn.stage_after, Stage::ALL[i + 1]);
        assert!(!turn.side_question);
    }

    assert_eq!(session.stage(), Stage::Finished);
    assert_eq!(
        session.summary(),
        Some("Idea title: Neighbourhood Uniform Tailoring")
    );
    assert_eq!(
        session.answers().get(Field::Competitors),
        Some("Two tailoring shops in the bazaar with high prices")
    );
    assert_eq!(provider.calls(), 6);
    assert_eq!(session.usage().total_tokens, 90);

    // Feedback prompts carry stage instructions and manual excerpts.
    let competitors_prompt = provider.system_prompt(3);
    assert!(competitors_prompt.contains(Stage::AskCompetitors.instruction()));
    assert!(competitors_prompt.contains("Relevant GYB manual text:\n- "));

    // The summary request lists every answer.
    let summary_prompt = provider.requests.lock().unwrap()[5].messages[1].content.clone();
    for field in Field::ALL {
        assert!(summary_prompt.contains(&format!("{}: ", field.label())));
    }

    // Transcript: greeting, then user + two assistant messages per answer.
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 1 + answers.len() * 3);
    assert_eq!(transcript.messages[1].role, Role::User);
}

#[tokio::test]
async fn e2e_side_question_mid_flow() {
    let provider = Arc::new(ScriptedProvider::texts(&[
        "Skills help you pick an idea you can deliver.",
        "Price above your costs and near competitor prices.",
        "Good idea.",
    ]));
    let mut session = session_with(provider.clone());

    session.handle_input("I repair mobile phones").await.unwrap();
    assert_eq!(session.stage(), Stage::AskIdea);

    let turn = session
        .handle_input("How should I set my price")
        .await
        .unwrap();
    assert!(turn.side_question);
    assert_eq!(session.stage(), Stage::AskIdea);
    assert_eq!(turn.replies[1], Stage::AskIdea.question().unwrap());
    assert!(provider.system_prompt(1).contains("entrepreneurship advice"));
    // Pricing paragraph is among the excerpts.
    assert!(provider.system_prompt(1).contains("Set your price"));

    session.handle_input("A phone repair stall").await.unwrap();
    assert_eq!(session.stage(), Stage::AskCustomers);
    assert_eq!(session.answers().get(Field::Idea), Some("A phone repair stall"));
}

#[tokio::test]
async fn e2e_provider_failure_then_retry() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        Err(ProviderError::RateLimited {
            retry_after_secs: 2,
        }),
        Ok(text_response("Welcome!")),
    ]));
    let mut session = session_with(provider.clone());

    let err = session.handle_input("I am a cook").await.unwrap_err();
    assert!(matches!(
        err,
        CoachError::Provider(ProviderError::RateLimited { .. })
    ));
    assert_eq!(session.stage(), Stage::AskBackground);
    assert_eq!(session.answers().answered(), 0);

    // Answering again works and is recorded once.
    let turn = session.handle_input("I am a cook").await.unwrap();
    assert!(turn.advanced());
    assert_eq!(session.answers().get(Field::Background), Some("I am a cook"));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn e2e_missing_manual_uses_general_advice() {
    let provider = Arc::new(ScriptedProvider::texts(&["General advice."]));
    let dir = tempfile::tempdir().unwrap();
    let knowledge = KeywordKnowledgeBase::from_path(&dir.path().join("absent.json")).unwrap();
    assert!(knowledge.is_empty());

    let coach = Coach::new(provider.clone(), Arc::new(knowledge), CoachSettings::default());
    let reply = coach.advise("How do I find customers?").await.unwrap();

    assert!(reply.sources.is_empty());
    assert!(provider.system_prompt(0).contains("No relevant chunks found"));
}

// ── E2E: Manual retrieval ────────────────────────────────────────────────

#[tokio::test]
async fn e2e_search_sample_manual() {
    let file = manual_file();
    let knowledge = KeywordKnowledgeBase::from_path(file.path()).unwrap();

    let results = knowledge
        .search(&KnowledgeQuery::new("competitors prices"))
        .await
        .unwrap();
    assert!(!results.is_empty());
    assert!(results.len() <= 3);
    assert!(!results[0].chunk.content.is_empty());
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));

    let none = knowledge
        .search(&KnowledgeQuery::new("xylophone zebra"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn e2e_malformed_manual_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();

    let err = KeywordKnowledgeBase::from_path(file.path()).err().unwrap();
    assert!(matches!(err, KnowledgeError::Parse { .. }));
}

// ── E2E: Config ──────────────────────────────────────────────────────────

#[test]
fn e2e_config_file_drives_coach_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_model = "llama-3.3-70b-versatile"
default_temperature = 0.3

[knowledge]
top_k = 2
excerpt_chars = 120
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    let settings = CoachSettings::from_config(&config);
    assert_eq!(settings.model, "llama-3.3-70b-versatile");
    assert_eq!(settings.temperature, 0.3);
    assert_eq!(settings.top_k, 2);
    assert_eq!(settings.excerpt_chars, 120);
}
