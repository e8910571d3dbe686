//! Console chat transport.
//!
//! The engine only depends on the [`ChatGateway`] trait; this module
//! provides the transport used for local operation: stdin lines are the
//! room's inbound messages, stdout is the room. A protocol-specific
//! binding (Matrix, Slack, ...) replaces this module without touching
//! the engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dotinder_core::Result;
use dotinder_engine::ChatGateway;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// One inbound chat message, stamped on receipt.
///
/// The freshness window in the event loop uses the stamp to drop events
/// that sat in the channel too long.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Raw message text.
    pub text: String,

    /// Sender identity; opaque to the engine.
    pub sender: String,

    /// When the transport received the message.
    pub received_at: DateTime<Utc>,
}

/// Chat transport backed by the local terminal.
///
/// Inbound lines may carry an explicit sender as `name: text`; bare
/// lines are attributed to a default local user.
pub struct ConsoleGateway {
    default_sender: String,
}

impl ConsoleGateway {
    /// Create a console gateway.
    pub fn new(default_sender: impl Into<String>) -> Self {
        Self {
            default_sender: default_sender.into(),
        }
    }

    /// Spawn the stdin reader, forwarding each line into `events`.
    ///
    /// The reader stops when stdin closes or the receiving side is
    /// dropped.
    pub fn listen(&self, events: mpsc::Sender<InboundMessage>) {
        let default_sender = self.default_sender.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        let message = parse_line(line, &default_sender);
                        debug!(sender = %message.sender, "inbound message");
                        if events.send(message).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        warn!(%err, "failed to read from stdin");
                        break;
                    }
                }
            }
        });
    }
}

#[async_trait]
impl ChatGateway for ConsoleGateway {
    async fn send_message(&self, text: &str) -> Result<()> {
        println!("[dotinder] {}", text);
        Ok(())
    }
}

/// Split an optional `name: text` prefix off an input line.
fn parse_line(line: &str, default_sender: &str) -> InboundMessage {
    let (sender, text) = match line.split_once(": ") {
        Some((name, rest)) if !name.is_empty() && !name.contains(' ') => (name, rest),
        _ => (default_sender, line),
    };
    InboundMessage {
        text: text.to_string(),
        sender: sender.to_string(),
        received_at: Utc::now(),
    }
}
