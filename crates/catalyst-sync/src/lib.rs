//! Feed layer: fetch the event data file over HTTP or read it from disk.

mod error;
pub mod file;

#[cfg(feature = "http")]
pub mod http;

pub use error::FeedError;
pub use file::{load_events, save_events};

#[cfg(feature = "http")]
pub use http::FeedClient;

/// Whether a source string names a remote feed rather than a local path.
pub fn is_remote(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
