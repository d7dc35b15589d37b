//! AnkiConnect transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::HistoryError;

pub const REVIEWS_BY_DAY_ACTION: &str = "getNumCardsReviewedByDay";
const ANKI_CONNECT_VERSION: u32 = 6;

/// Decoded AnkiConnect envelope. Entries of `result` are validated later,
/// one by one, so a single odd row does not sink the whole response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnkiResponse {
    #[serde(default)]
    pub result: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// Source of raw per-day review rows.
#[async_trait]
pub trait ReviewLog: Send + Sync {
    async fn reviews_by_day(&self) -> Result<AnkiResponse, HistoryError>;
}

/// Talks to the AnkiConnect add-on over HTTP.
pub struct AnkiConnectClient {
    client: Client,
    url: String,
}

impl AnkiConnectClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, HistoryError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ReviewLog for AnkiConnectClient {
    async fn reviews_by_day(&self) -> Result<AnkiResponse, HistoryError> {
        let body = json!({
            "action": REVIEWS_BY_DAY_ACTION,
            "version": ANKI_CONNECT_VERSION,
        });

        debug!("POST {} ({})", self.url, REVIEWS_BY_DAY_ACTION);
        let response = self.client.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HistoryError::Status(status));
        }

        let bytes = response.bytes().await?;
        debug!("Raw review payload: {}", String::from_utf8_lossy(&bytes));

        Ok(serde_json::from_slice(&bytes)?)
    }
}
