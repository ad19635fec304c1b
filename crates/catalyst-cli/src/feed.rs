//! Resolve a `--source` string to a loaded event list.

use std::path::Path;

use catalyst_core::EventRecord;
use catalyst_sync::{FeedClient, FeedError, is_remote, load_events};

/// Load events from a URL (HTTP GET) or a local path.
///
/// Called once per invocation. Every tab is rendered from the returned list.
pub async fn load(source: &str) -> Result<Vec<EventRecord>, FeedError> {
    if is_remote(source) {
        FeedClient::new(source.to_string()).fetch_events().await
    } else {
        load_events(Path::new(source))
    }
}
