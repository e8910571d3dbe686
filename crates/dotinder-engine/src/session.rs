//! The order session: owns the workflow state, ledger, and menu for the
//! one room the bot serves.

use std::sync::Arc;

use dotinder_core::{BotError, Menu, MenuUpdate, OrderLedger, OrderState, Result, Transition};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::command::{CommandKind, ResolvedCommand};
use crate::gateway::{ChatGateway, MenuSource};
use crate::machine::OrderStateMachine;
use crate::registry::CommandRegistry;

const HELP_TEXT: &str = "+++ dotinder +++\n\
    .inder - start taking orders\n\
    !order <id> - add a menu item to your order\n\
    .order - place the group order\n\
    .cancel - abort the running order\n\
    .delivered - announce that the food is here\n\
    .help - this message";

/// A single room's order session.
///
/// Exactly one session exists per room; it is the sole owner of the
/// workflow state and the ledger. [`OrderSession::handle_message`]
/// takes `&mut self`, so processing of one inbound message always
/// completes before the next is considered - the legality check and the
/// state commit can never interleave with another command.
pub struct OrderSession {
    registry: CommandRegistry,
    machine: OrderStateMachine,
    ledger: OrderLedger,
    menu: Menu,
    gateway: Arc<dyn ChatGateway>,
    menu_source: Option<Arc<dyn MenuSource>>,
    cycle_id: Option<Uuid>,
}

impl OrderSession {
    /// Create a session with the standard command set.
    ///
    /// `menu_source` is optional by design: its absence is reported when
    /// someone tries to start an order, never at startup.
    pub fn new(gateway: Arc<dyn ChatGateway>, menu_source: Option<Arc<dyn MenuSource>>) -> Self {
        Self {
            registry: CommandRegistry::standard(),
            machine: OrderStateMachine::new(),
            ledger: OrderLedger::new(),
            menu: Menu::new(),
            gateway,
            menu_source,
            cycle_id: None,
        }
    }

    /// The current workflow state.
    pub fn state(&self) -> OrderState {
        self.machine.current()
    }

    /// The shared ledger of the running cycle.
    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    /// Process one inbound chat message to completion.
    pub async fn handle_message(&mut self, text: &str, sender: &str) {
        let input = text.trim();
        if input.is_empty() {
            return;
        }

        let Some(command) = self.registry.resolve(input) else {
            self.send(&format!(
                "Sorry, I did not understand \"{}\". Try .help",
                input
            ))
            .await;
            return;
        };

        match command.transition {
            // Side-channel commands are legal from every state and never
            // move the workflow.
            None => self.run_effect(&command, input, sender).await,
            Some(transition) => {
                self.handle_state(&command, transition, input, sender).await;
            }
        }
    }

    /// Check legality, run the effect, commit the new state.
    ///
    /// On an illegal transition the command effect does not run and the
    /// state is unchanged; the sender gets an error reply instead.
    async fn handle_state(
        &mut self,
        command: &ResolvedCommand,
        transition: Transition,
        raw: &str,
        sender: &str,
    ) -> OrderState {
        let from = self.machine.current();
        let Some(next) = self.machine.peek(transition) else {
            warn!(?from, ?transition, "illegal transition requested");
            self.send(&format!(
                "@{}: \"{}\" does not work right now ({:?}).",
                sender, raw, from
            ))
            .await;
            return from;
        };

        self.run_effect(command, raw, sender).await;
        self.machine.commit(next);

        if from == OrderState::Idle && next != OrderState::Idle {
            let cycle = Uuid::new_v4();
            info!(%cycle, "order cycle opened");
            self.cycle_id = Some(cycle);
        }
        // A new cycle always starts empty, so clear the shared ledger
        // whenever the workflow returns to Idle (cancel included).
        if next == OrderState::Idle && from != OrderState::Idle {
            if let Some(cycle) = self.cycle_id.take() {
                info!(%cycle, "order cycle closed, clearing ledger");
            }
            self.ledger.reset_all();
        }

        next
    }

    /// Execute a command's business effect. Only called on the legal path.
    async fn run_effect(&mut self, command: &ResolvedCommand, raw: &str, sender: &str) {
        match command.kind {
            CommandKind::Start => self.effect_start().await,
            CommandKind::Order => self.effect_order(command, raw, sender).await,
            CommandKind::Finalize => self.effect_finalize().await,
            CommandKind::Cancel => self.effect_cancel().await,
            CommandKind::Delivered => self.effect_delivered().await,
            CommandKind::Help => self.send(HELP_TEXT).await,
        }
    }

    async fn effect_start(&mut self) {
        if self.menu_source.is_none() {
            warn!("start requested but no menu source is configured");
            self.send("No menu source is configured, I cannot look anything up. Set MENU_URL and restart me.")
                .await;
            return;
        }

        if let Err(err) = self.refresh_menu().await {
            warn!(%err, "menu refresh failed");
            if self.menu.is_loaded() {
                self.send("Heads up: I could not load today's menu, the last one I know is still in effect.")
                    .await;
            } else {
                self.send("Heads up: I could not load the menu. Orders will not work until it comes back.")
                    .await;
            }
        }

        self.send("Hey, dotinder here. I'm able to take your orders now.")
            .await;
    }

    async fn effect_order(&mut self, command: &ResolvedCommand, raw: &str, sender: &str) {
        let Some(item_id) = command.argument.as_deref() else {
            // The pattern guarantees a capture; reaching this is a bug in
            // the match rule, not a user error.
            error!(raw, "order command resolved without an item id");
            return;
        };

        if !self.menu.is_loaded() {
            self.send(&format!(
                "@{}: The menu is not loaded yet, please try again in a bit.",
                sender
            ))
            .await;
            return;
        }

        let Some(item) = self.menu.find(item_id).cloned() else {
            self.send(&format!("@{}: [{}] is not on the menu", sender, item_id))
                .await;
            return;
        };

        self.ledger.order_item(sender, item);
        match self.ledger.summary(sender) {
            Some(summary) => self.send(&summary).await,
            None => error!(sender, "summary empty right after ordering"),
        }
    }

    async fn effect_finalize(&mut self) {
        match self.machine.current() {
            OrderState::TakingOrders => {
                self.send(&format!(
                    "The order is out! {} items for {} hungry people.",
                    self.ledger.item_count(),
                    self.ledger.participants()
                ))
                .await;
            }
            OrderState::Delivered => {
                self.send("That closes this round. Until next time!").await;
            }
            state => debug!(?state, "finalize effect in unexpected state"),
        }
    }

    async fn effect_cancel(&mut self) {
        self.send("Order cancelled. Maybe tomorrow!").await;
    }

    async fn effect_delivered(&mut self) {
        self.send("@ALL: Food is here!").await;
        self.send("Bon appetit!").await;
        // TODO: Abrechnung - split the bill per participant.
    }

    /// Fetch the raw document and feed it into the menu.
    async fn refresh_menu(&mut self) -> Result<()> {
        let source = self
            .menu_source
            .as_ref()
            .ok_or_else(|| BotError::Config {
                key: "MENU_URL".to_string(),
            })?
            .clone();

        let raw = source.fetch().await?;
        match self.menu.update(&raw)? {
            MenuUpdate::Unchanged => debug!("menu source unchanged"),
            MenuUpdate::Replaced { items } => info!(items, "menu updated"),
        }
        Ok(())
    }

    /// Post a reply; failures are logged, never escalated.
    async fn send(&self, text: &str) {
        if let Err(err) = self.gateway.send_message(text).await {
            error!(%err, "failed to post reply to the room");
        }
    }
}
