//! Per-participant accumulation of ordered items for the current cycle.

use std::collections::HashMap;

use crate::menu::MenuItem;

/// The shared order of the running cycle.
///
/// Maps each participant to their items in placement order. Ordering the
/// same item twice yields two entries. A participant with no entries is
/// absent from the map, never present with an empty list.
#[derive(Debug, Default)]
pub struct OrderLedger {
    items: HashMap<String, Vec<MenuItem>>,
}

impl OrderLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to a participant's order.
    pub fn order_item(&mut self, user: &str, item: MenuItem) {
        self.items.entry(user.to_string()).or_default().push(item);
    }

    /// Drop a participant's order entirely. No-op if they have none.
    pub fn reset_items(&mut self, user: &str) {
        self.items.remove(user);
    }

    /// Clear every participant's order (start of a new cycle).
    pub fn reset_all(&mut self) {
        self.items.clear();
    }

    /// Render a participant's current order as a chat message.
    ///
    /// Returns `None` when the participant has no entries; that is the
    /// "nothing ordered" signal, distinct from a message with an empty
    /// item list.
    pub fn summary(&self, user: &str) -> Option<String> {
        let items = self.items.get(user)?;
        let mut message = format!("@{}: Your current order:", user);
        for item in items {
            message.push('\n');
            message.push_str(&item.to_string());
        }
        Some(message)
    }

    /// Participants with at least one item.
    pub fn participants(&self) -> usize {
        self.items.len()
    }

    /// Total number of ordered items across all participants.
    pub fn item_count(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    /// Returns true when no participant has ordered anything.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
