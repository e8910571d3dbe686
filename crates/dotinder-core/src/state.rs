//! Workflow vocabulary: states and transitions of a group-order cycle.

use serde::{Deserialize, Serialize};

/// State of the single group-order workflow.
///
/// Exactly one order cycle exists at a time; the state lives for the
/// whole process and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// No order cycle is running.
    #[default]
    Idle,
    /// Participants may add items.
    TakingOrders,
    /// The order has been placed with the restaurant.
    Ordered,
    /// The food has arrived.
    Delivered,
}

impl OrderState {
    /// Returns true if an order cycle is currently running.
    pub fn is_active(&self) -> bool {
        !matches!(self, OrderState::Idle)
    }
}

/// Named trigger a command carries into the state machine.
///
/// The machine decides legality, not the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Open a new order cycle.
    StartOrder,
    /// Add an item to the shared order.
    AddItem,
    /// Place the order, or close a delivered cycle.
    Finalize,
    /// Abort the running cycle.
    Cancel,
    /// The food has arrived.
    Arrived,
}

/// A transition that is not legal in the current state.
///
/// This is a first-class, user-facing outcome rather than a fault; the
/// workflow state is unchanged when it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalTransition {
    /// State the machine was in when the transition was attempted.
    pub from: OrderState,
    /// The transition that was attempted.
    pub transition: Transition,
}

impl std::fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "transition {:?} is not allowed in state {:?}",
            self.transition, self.from
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_is_not_active() {
        assert!(!OrderState::Idle.is_active());
        assert!(OrderState::TakingOrders.is_active());
        assert!(OrderState::Ordered.is_active());
        assert!(OrderState::Delivered.is_active());
    }

    #[test]
    fn test_illegal_transition_display() {
        let err = IllegalTransition {
            from: OrderState::Idle,
            transition: Transition::Arrived,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("Arrived"));
        assert!(rendered.contains("Idle"));
    }
}
