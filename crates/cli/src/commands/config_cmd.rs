//! `gybcoach config` — Configuration management commands.

use gybcoach_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let warnings = warnings(&config);
            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Provider:  {}", config.default_provider);
            println!("   Model:     {}", config.model());
            println!("   Manual:    {}", config.knowledge_path().display());
            println!(
                "   Retrieval: top {} paragraphs, {} chars each",
                config.knowledge.top_k, config.knowledge.excerpt_chars
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    // Keys may come from the environment; never echo them
    if config.api_key.is_some() {
        config.api_key = Some("***".into());
    }
    for provider in config.providers.values_mut() {
        if provider.api_key.is_some() {
            provider.api_key = Some("***".into());
        }
    }
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

/// Problems that don't stop the config from loading but will bite later.
fn warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if !config.has_api_key() {
        warnings.push("No API key set (set GROQ_API_KEY or GYBCOACH_API_KEY env var)".to_string());
    }

    if !config.knowledge_path().exists() {
        warnings.push(format!(
            "Manual file not found: {}",
            config.knowledge_path().display()
        ));
    }

    if config.knowledge.excerpt_chars < 50 {
        warnings.push("knowledge.excerpt_chars is very small; excerpts may be useless".to_string());
    }

    warnings
}
