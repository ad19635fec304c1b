//! HTTP client for the published event data file.

use catalyst_core::EventRecord;
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::FeedError;

/// Fetches the event list from a fixed URL.
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Create a client for the data file at `url`,
    /// e.g. `https://example.org/data/data.json`.
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim().to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the data file and decode it as a JSON array of events.
    ///
    /// A 404 means nothing has been published yet and yields an empty list.
    /// Any other non-success status is a [`FeedError::Server`].
    pub async fn fetch_events(&self) -> Result<Vec<EventRecord>, FeedError> {
        info!(url = %self.url, "fetching events");
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            warn!(url = %self.url, "event feed returned 404, treating as empty");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FeedError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let events: Vec<EventRecord> = serde_json::from_str(&body)?;
        info!(count = events.len(), "fetched events");
        Ok(events)
    }
}
