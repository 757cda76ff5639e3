//! `gybcoach ask` — One-shot question answered with manual context.

use super::{build_coach, load_config, load_knowledge};
use std::path::PathBuf;

pub async fn run(
    question: String,
    knowledge: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let knowledge = load_knowledge(&config, knowledge)?;
    let coach = build_coach(&config, knowledge)?;

    eprint!("  Thinking...");
    let reply = coach.advise(&question).await;
    eprint!("\r              \r");
    let reply = reply?;

    println!("{}", reply.content);

    if !reply.sources.is_empty() {
        println!();
        println!("Sources:");
        for source in &reply.sources {
            let chunk = &source.chunk;
            let label = chunk.section.as_deref().unwrap_or("GYB manual");
            match chunk.page {
                Some(page) => println!("  - {label} (p. {page})"),
                None => println!("  - {label}"),
            }
        }
    }

    Ok(())
}
