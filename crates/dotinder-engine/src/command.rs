//! Command definitions: match rules, transitions, and resolution results.

use dotinder_core::Transition;
use regex::Regex;

/// The closed set of commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Open the ordering window.
    Start,
    /// Add a menu item to the sender's order.
    Order,
    /// Place the order, or close a delivered cycle.
    Finalize,
    /// Abort the running cycle.
    Cancel,
    /// Announce that the food has arrived.
    Delivered,
    /// Print usage information.
    Help,
}

/// Pattern-based acceptance test over the full input text.
///
/// The concrete pattern engine stays behind this type; callers only see
/// "matched or not" plus the extracted argument.
pub enum MatchRule {
    /// Whole trimmed input equals the token.
    Exact(&'static str),
    /// Anchored pattern over the whole input; capture group 1 is the
    /// structured argument.
    Pattern(Regex),
    /// Free-form containment of a keyword pattern anywhere in the input.
    Keyword(Regex),
}

impl MatchRule {
    /// Test `input` against the rule.
    ///
    /// Returns `None` on no match, `Some(argument)` on a match; only
    /// [`MatchRule::Pattern`] rules ever produce an argument.
    pub fn apply(&self, input: &str) -> Option<Option<String>> {
        match self {
            MatchRule::Exact(token) => (input == *token).then_some(None),
            MatchRule::Pattern(pattern) => {
                let caps = pattern.captures(input)?;
                Some(caps.get(1).map(|m| m.as_str().to_string()))
            }
            MatchRule::Keyword(pattern) => pattern.is_match(input).then_some(None),
        }
    }
}

/// A registered command: match rule plus the transition it carries.
///
/// Static once registered; commands never change at runtime.
pub struct CommandSpec {
    /// Which command this is.
    pub kind: CommandKind,

    /// The transition the command requests from the state machine.
    /// `None` marks a side-channel command (help) that is legal from
    /// every state and never moves the workflow.
    pub transition: Option<Transition>,

    rule: MatchRule,
}

impl CommandSpec {
    /// Create a command definition.
    pub fn new(kind: CommandKind, transition: Option<Transition>, rule: MatchRule) -> Self {
        Self {
            kind,
            transition,
            rule,
        }
    }

    /// Test an input against this command's match rule.
    pub fn matches(&self, input: &str) -> Option<ResolvedCommand> {
        let argument = self.rule.apply(input)?;
        Some(ResolvedCommand {
            kind: self.kind,
            transition: self.transition,
            argument,
        })
    }
}

/// A successfully resolved command, ready for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// Which command matched.
    pub kind: CommandKind,

    /// The transition it carries, if any.
    pub transition: Option<Transition>,

    /// Structured argument extracted by the match rule (e.g. the item id
    /// of `!order 62`).
    pub argument: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_rule_requires_whole_input() {
        let rule = MatchRule::Exact(".inder");
        assert_eq!(rule.apply(".inder"), Some(None));
        assert_eq!(rule.apply(".inder please"), None);
        assert_eq!(rule.apply("x.inder"), None);
    }

    #[test]
    fn test_pattern_rule_extracts_argument() {
        let rule = MatchRule::Pattern(Regex::new(r"^!order (\w?\d+)$").unwrap());
        assert_eq!(rule.apply("!order 42"), Some(Some("42".to_string())));
        assert_eq!(rule.apply("!order M12"), Some(Some("M12".to_string())));
        assert_eq!(rule.apply("!order "), None);
        assert_eq!(rule.apply("!order 42 extra"), None);
    }

    #[test]
    fn test_keyword_rule_matches_anywhere() {
        let rule = MatchRule::Keyword(Regex::new(r"\.help").unwrap());
        assert_eq!(rule.apply(".help"), Some(None));
        assert_eq!(rule.apply("could someone send .help please"), Some(None));
        assert_eq!(rule.apply("helpless"), None);
    }
}
