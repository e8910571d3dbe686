//! The finite-state workflow controller for the group order.

use dotinder_core::{IllegalTransition, OrderState, Transition};
use tracing::debug;

/// Sole authority over workflow-state transitions.
///
/// The machine holds the single process-wide workflow state and knows the
/// full transition table; commands only carry a [`Transition`], legality
/// is decided here. An illegal transition is an expected outcome, not a
/// fault - the state is simply left unchanged.
#[derive(Debug, Default)]
pub struct OrderStateMachine {
    current: OrderState,
}

impl OrderStateMachine {
    /// Create a machine in [`OrderState::Idle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The current workflow state.
    pub fn current(&self) -> OrderState {
        self.current
    }

    /// Look up the tabulated next state without committing.
    ///
    /// The session uses this to run the command effect between the
    /// legality check and [`commit`](Self::commit); no other inbound
    /// event may interleave in between.
    pub fn peek(&self, transition: Transition) -> Option<OrderState> {
        Self::next_state(self.current, transition)
    }

    /// Commit a previously peeked next state.
    pub fn commit(&mut self, next: OrderState) {
        debug!(from = ?self.current, to = ?next, "workflow state committed");
        self.current = next;
    }

    /// Check and commit a transition in one step.
    pub fn apply(&mut self, transition: Transition) -> Result<OrderState, IllegalTransition> {
        match self.peek(transition) {
            Some(next) => {
                self.commit(next);
                Ok(next)
            }
            None => Err(IllegalTransition {
                from: self.current,
                transition,
            }),
        }
    }

    /// The transition table. Absent pairs are illegal.
    fn next_state(from: OrderState, transition: Transition) -> Option<OrderState> {
        use OrderState::*;
        use Transition::*;

        match (from, transition) {
            (Idle, StartOrder) => Some(TakingOrders),
            (TakingOrders, AddItem) => Some(TakingOrders),
            (TakingOrders, Finalize) => Some(Ordered),
            (TakingOrders, Cancel) => Some(Idle),
            (Ordered, Arrived) => Some(Delivered),
            (Delivered, Finalize) => Some(Idle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [OrderState; 4] = [
        OrderState::Idle,
        OrderState::TakingOrders,
        OrderState::Ordered,
        OrderState::Delivered,
    ];

    const ALL_TRANSITIONS: [Transition; 5] = [
        Transition::StartOrder,
        Transition::AddItem,
        Transition::Finalize,
        Transition::Cancel,
        Transition::Arrived,
    ];

    fn machine_in(state: OrderState) -> OrderStateMachine {
        let mut machine = OrderStateMachine::new();
        machine.commit(state);
        machine
    }

    #[test]
    fn test_full_order_cycle_returns_to_idle() {
        let mut machine = OrderStateMachine::new();
        assert_eq!(machine.current(), OrderState::Idle);

        assert_eq!(
            machine.apply(Transition::StartOrder).unwrap(),
            OrderState::TakingOrders
        );
        assert_eq!(
            machine.apply(Transition::AddItem).unwrap(),
            OrderState::TakingOrders
        );
        assert_eq!(
            machine.apply(Transition::AddItem).unwrap(),
            OrderState::TakingOrders
        );
        assert_eq!(
            machine.apply(Transition::Finalize).unwrap(),
            OrderState::Ordered
        );
        assert_eq!(
            machine.apply(Transition::Arrived).unwrap(),
            OrderState::Delivered
        );
        assert_eq!(machine.apply(Transition::Finalize).unwrap(), OrderState::Idle);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut machine = OrderStateMachine::new();
        machine.apply(Transition::StartOrder).unwrap();
        machine.apply(Transition::AddItem).unwrap();
        machine.apply(Transition::AddItem).unwrap();

        assert_eq!(machine.apply(Transition::Cancel).unwrap(), OrderState::Idle);

        // A delivery announcement straight out of Idle is illegal.
        let err = machine.apply(Transition::Arrived).unwrap_err();
        assert_eq!(err.from, OrderState::Idle);
        assert_eq!(machine.current(), OrderState::Idle);
    }

    #[test]
    fn test_illegal_transitions_leave_state_unchanged() {
        for state in ALL_STATES {
            for transition in ALL_TRANSITIONS {
                let mut machine = machine_in(state);
                match machine.apply(transition) {
                    Ok(_) => {}
                    Err(err) => {
                        assert_eq!(err.from, state);
                        assert_eq!(err.transition, transition);
                        assert_eq!(machine.current(), state);
                    }
                }
            }
        }
    }

    #[test]
    fn test_transition_table_is_exactly_the_specified_one() {
        use OrderState::*;
        use Transition::*;

        let legal: &[(OrderState, Transition, OrderState)] = &[
            (Idle, StartOrder, TakingOrders),
            (TakingOrders, AddItem, TakingOrders),
            (TakingOrders, Finalize, Ordered),
            (TakingOrders, Cancel, Idle),
            (Ordered, Arrived, Delivered),
            (Delivered, Finalize, Idle),
        ];

        for state in ALL_STATES {
            for transition in ALL_TRANSITIONS {
                let expected = legal
                    .iter()
                    .find(|(s, t, _)| *s == state && *t == transition)
                    .map(|(_, _, next)| *next);
                let machine = machine_in(state);
                assert_eq!(
                    machine.peek(transition),
                    expected,
                    "state {:?} x transition {:?}",
                    state,
                    transition
                );
            }
        }
    }
}
