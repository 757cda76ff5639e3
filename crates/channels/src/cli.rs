//! CLI channel — interactive terminal-based chat.
//!
//! Reads lines from stdin (or any async reader) and writes replies to stdout.
//! Used by `gybcoach chat`.

use async_trait::async_trait;
use gybcoach_core::channel::{Channel, ChannelId, ChannelMessage};
use gybcoach_core::error::ChannelError;
use std::sync::Mutex;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

type Input = Box<dyn AsyncRead + Send + Unpin>;

/// Interactive CLI channel for terminal-based chat.
pub struct CliChannel {
    id: ChannelId,
    input: Mutex<Option<Input>>,
}

impl CliChannel {
    /// A channel reading from stdin.
    pub fn new() -> Self {
        Self::with_reader(io::stdin())
    }

    /// A channel reading from the given source instead of stdin.
    pub fn with_reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            id: ChannelId("cli".into()),
            input: Mutex::new(Some(Box::new(reader))),
        }
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a trimmed line ends the chat.
pub fn is_exit_command(line: &str) -> bool {
    matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q")
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    fn id(&self) -> &ChannelId {
        &self.id
    }

    /// Can only be started once; the input is handed to the reader task.
    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelMessage, ChannelError>>, ChannelError> {
        let input = self
            .input
            .lock()
            .map_err(|_| ChannelError::ConnectionLost("input lock poisoned".into()))?
            .take()
            .ok_or_else(|| ChannelError::ConnectionLost("channel already started".into()))?;

        let (tx, rx) = mpsc::channel(32);
        let channel_id = self.id.clone();

        tokio::spawn(async move {
            let mut lines = BufReader::new(input).lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }

                        if is_exit_command(&line) {
                            debug!("Exit command received");
                            break;
                        }

                        let msg = ChannelMessage {
                            channel_id: channel_id.clone(),
                            sender_id: "local_user".into(),
                            content: line,
                            chat_id: "cli_session".into(),
                        };

                        if tx.send(Ok(msg)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF (Ctrl+D)
                    Err(e) => {
                        let _ = tx
                            .send(Err(ChannelError::ConnectionLost(e.to_string())))
                            .await;
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, _chat_id: &str, content: &str) -> Result<(), ChannelError> {
        for line in content.lines() {
            println!("  Coach > {line}");
        }
        println!();
        Ok(())
    }
}
