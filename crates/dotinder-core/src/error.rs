//! Error types for the dotinder bot.

use thiserror::Error;

/// Main error type for bot operations.
#[derive(Error, Debug)]
pub enum BotError {
    /// The raw menu document could not be parsed into any items.
    #[error("Menu parse failed: {message}")]
    MenuParse { message: String },

    /// The menu source could not be reached or returned no usable document.
    #[error("Menu source unavailable: {message}")]
    MenuUnavailable { message: String },

    /// A required configuration value is missing or empty.
    #[error("Missing configuration: {key}")]
    Config { key: String },

    /// The chat transport failed to accept an outbound message.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Internal error (should not happen).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Returns true if the previous menu remains usable after this error.
    ///
    /// Menu failures never invalidate an already-loaded catalog; the bot
    /// degrades to the last good parse.
    pub fn keeps_menu(&self) -> bool {
        matches!(
            self,
            BotError::MenuParse { .. } | BotError::MenuUnavailable { .. }
        )
    }
}

/// Convenience Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;
