//! Local data-file IO.

use std::io::ErrorKind;
use std::path::Path;

use catalyst_core::EventRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{info, warn};

use crate::FeedError;

/// Read a JSON array of events from `path`.
///
/// A missing file is an empty feed, same as a 404 from the HTTP source.
/// A blank file is also empty.
pub fn load_events(path: &Path) -> Result<Vec<EventRecord>, FeedError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "data file not found, treating as empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(FeedError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let events: Vec<EventRecord> = serde_json::from_str(&contents)?;
    info!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}

/// Write events to `path` as a 4-space indented JSON array.
///
/// Parent directories are created as needed.
pub fn save_events(path: &Path, events: &[EventRecord]) -> Result<(), FeedError> {
    let io_err = |source: std::io::Error| FeedError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    events.serialize(&mut ser)?;
    std::fs::write(path, buf).map_err(io_err)?;

    info!(path = %path.display(), count = events.len(), "saved events");
    Ok(())
}
