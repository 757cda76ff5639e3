//! `gybcoach doctor` — Diagnose setup problems.

use gybcoach_config::AppConfig;
use gybcoach_core::knowledge::KnowledgeBase;
use gybcoach_knowledge::KeywordKnowledgeBase;
use gybcoach_providers::router::build_from_config;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 GYB Coach Doctor — Setup Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    // Config
    let config_path = AppConfig::config_path();
    if !config_path.exists() {
        println!("  ⚠️  No config file — using defaults (run `gybcoach onboard`)");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!();
            println!("  ⚠️  Fix the config file and run doctor again.");
            return Ok(());
        }
    };

    // API key
    if config.has_api_key() {
        println!("  ✅ API key configured for {}", config.default_provider);
    } else {
        println!("  ❌ No API key — set GROQ_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    // Manual
    let knowledge_path = config.knowledge_path();
    if !knowledge_path.exists() {
        println!(
            "  ⚠️  No manual at {} — answers will use general advice only",
            knowledge_path.display()
        );
        issues += 1;
    } else {
        match KeywordKnowledgeBase::from_path(&knowledge_path) {
            Ok(kb) if kb.is_empty() => {
                println!("  ⚠️  Manual at {} has no paragraphs", knowledge_path.display());
                issues += 1;
            }
            Ok(kb) => println!(
                "  ✅ Manual loaded: {} paragraphs from {}",
                kb.len(),
                knowledge_path.display()
            ),
            Err(e) => {
                println!("  ❌ Manual unreadable: {e}");
                issues += 1;
            }
        }
    }

    // Provider reachability, only worth trying with a key
    if config.has_api_key() {
        let router = build_from_config(&config);
        if let Some(provider) = router.default() {
            if provider.health_check().await.unwrap_or(false) {
                println!("  ✅ Provider {} reachable", provider.name());
            } else {
                println!("  ❌ Provider {} not reachable", provider.name());
                issues += 1;
            }
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
