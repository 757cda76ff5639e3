pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod doctor;
pub mod onboard;
pub mod search;

use gybcoach_coach::{Coach, CoachSettings};
use gybcoach_config::AppConfig;
use gybcoach_knowledge::KeywordKnowledgeBase;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Load the manual from `path_override`, or from the configured location.
fn load_knowledge(
    config: &AppConfig,
    path_override: Option<PathBuf>,
) -> Result<KeywordKnowledgeBase, Box<dyn std::error::Error>> {
    let path = path_override.unwrap_or_else(|| config.knowledge_path());
    debug!(path = %path.display(), "Loading manual");
    Ok(KeywordKnowledgeBase::from_path(&path)?)
}

/// Wire up the configured provider and the manual into a coach.
fn build_coach(
    config: &AppConfig,
    knowledge: KeywordKnowledgeBase,
) -> Result<Coach, Box<dyn std::error::Error>> {
    require_api_key(config)?;

    let provider = gybcoach_providers::router::build_from_config(config).require_default()?;
    debug!(provider = provider.name(), model = config.model(), "Provider ready");

    Ok(Coach::new(
        provider,
        Arc::new(knowledge),
        CoachSettings::from_config(config),
    ))
}

// Check for API key early — give a clear error
fn require_api_key(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.has_api_key() || config.default_provider == "ollama" {
        return Ok(());
    }

    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Set one of these environment variables:");
    eprintln!("    export GROQ_API_KEY='gsk_...'        (recommended)");
    eprintln!("    export OPENAI_API_KEY='sk-...'       (for OpenAI direct)");
    eprintln!("    export GYBCOACH_API_KEY='...'        (generic)");
    eprintln!();
    eprintln!("  Or add it to your config file:");
    eprintln!("    {}", AppConfig::config_path().display());
    eprintln!();
    eprintln!("  Get a Groq key at: https://console.groq.com/keys");
    eprintln!();
    Err("No API key found. See above for setup instructions.".into())
}
