//! # dotinder Core
//!
//! Domain primitives for the dotinder group-ordering bot.
//!
//! This crate provides the fundamental building blocks:
//! - [`Menu`] / [`MenuItem`] - the parsed, addressable item catalog
//! - [`OrderLedger`] - per-participant accumulation of ordered items
//! - [`OrderState`] / [`Transition`] - the workflow vocabulary
//! - [`BotError`] - shared error types

pub mod error;
pub mod ledger;
pub mod menu;
pub mod state;

// Re-exports for convenience
pub use error::{BotError, Result};
pub use ledger::OrderLedger;
pub use menu::{Menu, MenuItem, MenuUpdate};
pub use state::{IllegalTransition, OrderState, Transition};
