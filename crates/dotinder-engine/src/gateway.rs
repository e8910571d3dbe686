//! Collaborator traits: chat transport and menu retrieval.
//!
//! The engine never talks to a concrete chat protocol or HTTP endpoint;
//! the binary supplies implementations of these traits.

use async_trait::async_trait;
use dotinder_core::Result;

/// Outbound side of the chat transport.
///
/// Sends are fire-and-forget from the engine's point of view: a failed
/// send is logged by the session and never escalates. Inbound delivery
/// (room filtering, self filtering, freshness window) is entirely the
/// transport's concern; the engine only ever sees `(text, sender)` pairs.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Post a message to the configured room.
    async fn send_message(&self, text: &str) -> Result<()>;
}

/// External retrieval of the raw menu document.
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Fetch the current raw document.
    async fn fetch(&self) -> Result<String>;
}
