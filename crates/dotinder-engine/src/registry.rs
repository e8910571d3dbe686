//! Ordered command registry: maps raw inbound text to a single command.

use dotinder_core::Transition;
use regex::Regex;
use tracing::debug;

use crate::command::{CommandKind, CommandSpec, MatchRule, ResolvedCommand};

/// The ordered set of registered commands.
///
/// Resolution scans in registration order and returns the first match, so
/// registration order deterministically breaks ties should two rules ever
/// accept the same input.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full bot command set, in precedence order.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(CommandSpec::new(
            CommandKind::Start,
            Some(Transition::StartOrder),
            MatchRule::Exact(".inder"),
        ));
        registry.register(CommandSpec::new(
            CommandKind::Order,
            Some(Transition::AddItem),
            MatchRule::Pattern(
                Regex::new(r"^!order (\w?\d+)$").expect("order pattern is valid"),
            ),
        ));
        registry.register(CommandSpec::new(
            CommandKind::Finalize,
            Some(Transition::Finalize),
            MatchRule::Exact(".order"),
        ));
        registry.register(CommandSpec::new(
            CommandKind::Cancel,
            Some(Transition::Cancel),
            MatchRule::Exact(".cancel"),
        ));
        registry.register(CommandSpec::new(
            CommandKind::Delivered,
            Some(Transition::Arrived),
            MatchRule::Exact(".delivered"),
        ));
        registry.register(CommandSpec::new(
            CommandKind::Help,
            None,
            MatchRule::Keyword(Regex::new(r"\.help").expect("help pattern is valid")),
        ));
        registry
    }

    /// Add a command definition. First registered wins on ties.
    pub fn register(&mut self, command: CommandSpec) {
        self.commands.push(command);
    }

    /// Resolve raw input to the first command whose rule accepts it.
    pub fn resolve(&self, input: &str) -> Option<ResolvedCommand> {
        let resolved = self.commands.iter().find_map(|spec| spec.matches(input));
        match &resolved {
            Some(cmd) => debug!(kind = ?cmd.kind, "resolved command"),
            None => debug!(input, "no command matched"),
        }
        resolved
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true when no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
