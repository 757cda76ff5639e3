//! `gybcoach search` — Show the manual paragraphs that match a query.

use super::{load_config, load_knowledge};
use gybcoach_coach::prompt::excerpt;
use gybcoach_core::knowledge::{KnowledgeQuery, ScoredChunk};
use std::path::PathBuf;

pub async fn run(
    query: String,
    limit: Option<usize>,
    knowledge: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let knowledge = load_knowledge(&config, knowledge)?;

    let limit = limit.unwrap_or(config.knowledge.top_k);
    let results = knowledge.rank(&KnowledgeQuery::new(&query).with_limit(limit));

    if results.is_empty() {
        println!("No matching paragraphs for \"{query}\".");
        return Ok(());
    }

    println!("{} result(s) for \"{query}\":", results.len());
    println!();
    for (i, result) in results.iter().enumerate() {
        println!("{}", render_result(i + 1, result, config.knowledge.excerpt_chars));
    }

    Ok(())
}

fn render_result(rank: usize, result: &ScoredChunk, excerpt_chars: usize) -> String {
    let chunk = &result.chunk;
    let mut heading = format!("{rank}. [score {}]", result.score);
    if let Some(section) = &chunk.section {
        heading.push_str(&format!(" {section}"));
    }
    if let Some(page) = chunk.page {
        heading.push_str(&format!(" (p. {page})"));
    }

    format!("{heading}\n   {}\n", excerpt(&chunk.content, excerpt_chars))
}
