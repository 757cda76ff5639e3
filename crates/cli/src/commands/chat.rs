//! `gybcoach chat` — Guided coaching session in the terminal.

use super::{build_coach, load_config, load_knowledge};
use chrono::{DateTime, Local};
use gybcoach_channels::CliChannel;
use gybcoach_coach::{Answers, CoachSession, Field, Stage};
use gybcoach_core::channel::Channel;
use gybcoach_core::knowledge::KnowledgeBase;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const CHAT_ID: &str = "cli_session";

pub async fn run(
    knowledge: Option<PathBuf>,
    summary_out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let knowledge = load_knowledge(&config, knowledge)?;
    let chunk_count = knowledge.len();
    let coach = build_coach(&config, knowledge)?;

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║      GYB Coach — Generate Your Business      ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {}", coach.settings().model);
    println!("  Manual:    {chunk_count} paragraphs");
    println!();
    println!("  Answer each question and press Enter.");
    println!("  /progress shows your answers, /restart starts over.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let channel = CliChannel::new();
    let mut rx = channel.start().await.map_err(|e| format!("Channel error: {e}"))?;
    let mut session = CoachSession::new(coach);

    channel.send(CHAT_ID, session.greeting()).await?;
    prompt()?;

    while let Some(result) = rx.recv().await {
        let chan_msg = match result {
            Ok(chan_msg) => chan_msg,
            Err(e) => {
                eprintln!("  [Channel Error] {e}");
                break;
            }
        };

        match chan_msg.content.as_str() {
            "/restart" => {
                session = session.restart();
                println!();
                channel.send(CHAT_ID, session.greeting()).await?;
            }
            "/progress" => {
                println!();
                println!("{}", render_progress(&session));
            }
            text => {
                eprint!("  ...");
                let result = session.handle_input(text).await;
                eprint!("\r     \r");
                println!();

                match result {
                    Ok(turn) => {
                        for reply in &turn.replies {
                            channel.send(CHAT_ID, reply).await?;
                        }
                        if let Some(summary) = &turn.summary {
                            show_summary(&session, summary, summary_out.as_deref())?;
                        }
                    }
                    Err(e) => {
                        eprintln!("  [Error] {e}");
                        eprintln!("  Your answer was not saved, please try again.");
                        println!();
                    }
                }
            }
        }

        prompt()?;
    }

    let usage = session.usage();
    println!();
    println!(
        "  Tokens used: {} ({} prompt + {} completion)",
        usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
    );
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

fn show_summary(
    session: &CoachSession,
    summary: &str,
    summary_out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("  ── Your Business Idea Summary ──");
    println!();
    for line in summary.lines() {
        println!("  {line}");
    }
    println!();

    if let Some(path) = summary_out {
        let markdown = summary_markdown(session.answers(), summary, Local::now());
        std::fs::write(path, markdown)?;
        info!(path = %path.display(), "Summary written");
        println!("  ✅ Summary saved to {}", path.display());
        println!();
    }

    println!("  You can keep asking questions about your business.");
    println!();
    Ok(())
}

/// Current step and the answers recorded so far.
fn render_progress(session: &CoachSession) -> String {
    let stage = session.stage();
    let mut out = if stage.is_finished() {
        format!("  Step {}/{}: finished", stage.index(), Stage::ALL.len())
    } else {
        format!(
            "  Step {}/{}: {}",
            stage.index(),
            Stage::ALL.len(),
            session.last_question()
        )
    };

    for field in Field::ALL {
        let answer = session.answers().get(field).unwrap_or("—");
        out.push_str(&format!("\n    {:<12} {answer}", format!("{}:", field.label())));
    }
    out.push('\n');
    out
}

/// The summary as a Markdown document, with the answers it was built from.
fn summary_markdown(answers: &Answers, summary: &str, generated_at: DateTime<Local>) -> String {
    let mut out = String::from("# Business Idea Summary\n\n");
    out.push_str(&format!(
        "_Generated {}_\n\n",
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(summary.trim());
    out.push_str("\n\n## Your answers\n\n");
    for field in Field::ALL {
        out.push_str(&format!(
            "- **{}:** {}\n",
            field.label(),
            answers.get(field).unwrap_or_default()
        ));
    }
    out
}
