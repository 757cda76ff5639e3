//! GYB Coach CLI — the main entry point.
//!
//! Commands:
//! - `chat`        — Guided business-idea session
//! - `ask`         — One-shot question answered from the manual
//! - `search`      — Show which manual paragraphs match a query
//! - `onboard`     — Initialize config & sample manual
//! - `doctor`      — Diagnose setup problems
//! - `config`      — Show, locate or validate the config file
//! - `completions` — Shell completion scripts

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "gybcoach",
    about = "GYB Coach — find and shape your business idea, step by step",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a guided coaching session
    Chat {
        /// Manual chunk file (overrides config)
        #[arg(short, long)]
        knowledge: Option<PathBuf>,

        /// Write the business idea summary to this Markdown file
        #[arg(short, long)]
        summary_out: Option<PathBuf>,
    },

    /// Ask a single entrepreneurship question
    Ask {
        /// The question
        question: String,

        /// Manual chunk file (overrides config)
        #[arg(short, long)]
        knowledge: Option<PathBuf>,
    },

    /// Search the manual without calling the model
    Search {
        /// Words to look for
        query: String,

        /// Maximum number of paragraphs to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Manual chunk file (overrides config)
        #[arg(short, long)]
        knowledge: Option<PathBuf>,
    },

    /// Initialize configuration and a sample manual
    Onboard,

    /// Diagnose setup problems
    Doctor,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Check the config file for problems
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so the conversation on stdout stays readable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat {
            knowledge,
            summary_out,
        } => commands::chat::run(knowledge, summary_out).await?,
        Commands::Ask {
            question,
            knowledge,
        } => commands::ask::run(question, knowledge).await?,
        Commands::Search {
            query,
            limit,
            knowledge,
        } => commands::search::run(query, limit, knowledge).await?,
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "gybcoach", &mut std::io::stdout());
        }
    }

    Ok(())
}
