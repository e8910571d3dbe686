//! # dotinder Engine
//!
//! Command dispatch and order-workflow engine.
//!
//! Inbound chat text flows through the [`CommandRegistry`] to resolve a
//! command, then through the [`OrderSession`], which checks the command's
//! transition against the [`OrderStateMachine`], runs the command effect
//! (ledger/menu mutation plus replies), and commits the new state.

pub mod command;
pub mod gateway;
pub mod machine;
pub mod registry;
pub mod session;

// Re-exports for convenience
pub use command::{CommandKind, CommandSpec, MatchRule, ResolvedCommand};
pub use gateway::{ChatGateway, MenuSource};
pub use machine::OrderStateMachine;
pub use registry::CommandRegistry;
pub use session::OrderSession;
