//! Chat channel implementations for the GYB coach.
//!
//! Available channels:
//! - **CLI** — Interactive terminal chat (stdin/stdout)

pub mod cli;

pub use cli::CliChannel;
