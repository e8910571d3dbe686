//! # dotinder Bot
//!
//! Process bootstrap: configuration, transport, and the single event
//! loop that feeds inbound chat messages to the order session.

use std::sync::Arc;

use chrono::{Duration, Utc};
use dotinder_engine::{ChatGateway, MenuSource, OrderSession};
use tokio::sync::mpsc;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod gateway;
mod menu_source;

use config::Config;
use gateway::{ConsoleGateway, InboundMessage};
use menu_source::HttpMenuSource;

/// Inbound events older than this are dropped unprocessed.
const FRESHNESS_WINDOW_SECS: i64 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the console gateway's room.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("dotinder starting");

    let config = Config::from_env();
    if config.menu_url.is_none() {
        info!("MENU_URL is not set; orders will be rejected until it is configured");
    }

    let gateway = Arc::new(ConsoleGateway::new("local"));
    let menu_source = config
        .menu_url
        .clone()
        .map(|url| Arc::new(HttpMenuSource::new(url)) as Arc<dyn MenuSource>);

    let mut session = OrderSession::new(gateway.clone(), menu_source);

    let (events_tx, mut events_rx) = mpsc::channel::<InboundMessage>(64);
    gateway.listen(events_tx);

    let _ = gateway.send_message(".inder is back!").await;

    // Single consumer: one message is handled to completion before the
    // next is taken, so the transition check and state commit never
    // interleave.
    while let Some(message) = events_rx.recv().await {
        let age = Utc::now() - message.received_at;
        if age > Duration::seconds(FRESHNESS_WINDOW_SECS) {
            debug!(sender = %message.sender, "dropping stale inbound message");
            continue;
        }
        session.handle_message(&message.text, &message.sender).await;
    }

    info!("input closed, shutting down");
    Ok(())
}
