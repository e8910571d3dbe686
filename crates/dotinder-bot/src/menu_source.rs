//! HTTP retrieval of the raw menu document.

use async_trait::async_trait;
use dotinder_core::{BotError, Result};
use dotinder_engine::MenuSource;
use tracing::debug;

/// Menu source backed by a plain HTTP GET.
///
/// Failures surface as [`BotError::MenuUnavailable`]; the engine keeps
/// its previous menu in that case. No retry here - the next start
/// command simply fetches again.
pub struct HttpMenuSource {
    url: String,
    client: reqwest::Client,
}

impl HttpMenuSource {
    /// Create a source fetching from `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MenuSource for HttpMenuSource {
    async fn fetch(&self) -> Result<String> {
        debug!(url = %self.url, "fetching menu document");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| BotError::MenuUnavailable {
                message: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(BotError::MenuUnavailable {
                message: format!("unexpected status {}", response.status()),
            });
        }

        response.text().await.map_err(|err| BotError::MenuUnavailable {
            message: err.to_string(),
        })
    }
}
