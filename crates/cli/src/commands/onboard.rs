//! `gybcoach onboard` — First-time setup.

use gybcoach_config::AppConfig;
use std::path::Path;

/// The manual shipped with the binary, used until a full one is supplied.
const SAMPLE_CHUNKS: &str = include_str!("../../assets/gyb_chunks.json");

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();

    println!("📘 GYB Coach — First-Time Setup");
    println!("===============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    let chunks_path = config_dir.join("gyb_chunks.json");
    if write_if_absent(&chunks_path, SAMPLE_CHUNKS)? {
        println!("✅ Created sample manual: {}", chunks_path.display());
    } else {
        println!("  Manual exists: {}", chunks_path.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Set GROQ_API_KEY or add api_key to {}", config_path.display());
        println!("   2. Replace gyb_chunks.json with your own manual paragraphs (optional)");
        println!("   3. Run: gybcoach chat\n");
    }

    println!("🎉 Setup complete! Run `gybcoach chat` to start.\n");

    Ok(())
}

/// Write `content` to `path` unless something is already there.
fn write_if_absent(path: &Path, content: &str) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    std::fs::write(path, content)?;
    Ok(true)
}
