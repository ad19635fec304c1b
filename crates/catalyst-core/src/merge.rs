//! Merging freshly scraped events into the data file.
//!
//! Records are deduplicated on `(company, date, title prefix)`, trimmed to a
//! cutoff date, and sorted by date. Date comparisons here are plain string
//! comparisons on the `YYYY-MM-DD` form the scrapers write.

use std::collections::HashSet;

use tracing::debug;

use crate::event::EventRecord;

/// Records dated before this are dropped from the data file.
pub const DEFAULT_CUTOFF: &str = "2024-01-01";

/// Number of title characters that take part in the duplicate signature.
pub const TITLE_SIGNATURE_CHARS: usize = 50;

/// Sort key for records without a date, so they land at the end.
const UNDATED_SORT_KEY: &str = "9999-12-31";

/// Result of [`merge_events`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub events: Vec<EventRecord>,
    /// Incoming records that were not duplicates and not before the cutoff.
    pub added: usize,
}

/// Duplicate-detection key for a record.
pub fn signature(event: &EventRecord) -> (String, String, String) {
    (
        event.company.clone(),
        event.date.clone(),
        event.title.chars().take(TITLE_SIGNATURE_CHARS).collect(),
    )
}

fn before_cutoff(date: &str, cutoff: &str) -> bool {
    !date.is_empty() && date < cutoff
}

/// Merge `incoming` into `existing`.
///
/// Incoming records older than `cutoff`, or sharing a signature with a
/// record already kept, are skipped. The merged list is then sorted by date
/// string (undated last) and anything not on or after `cutoff` is dropped,
/// including undated records.
pub fn merge_events(
    existing: Vec<EventRecord>,
    incoming: impl IntoIterator<Item = EventRecord>,
    cutoff: &str,
) -> MergeOutcome {
    let mut seen: HashSet<(String, String, String)> = existing
        .iter()
        .filter(|e| !before_cutoff(&e.date, cutoff))
        .map(signature)
        .collect();

    let mut events = existing;
    let mut added = 0;
    for event in incoming {
        if before_cutoff(&event.date, cutoff) {
            continue;
        }
        if seen.insert(signature(&event)) {
            events.push(event);
            added += 1;
        }
    }

    events.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
    events.retain(|e| e.date.as_str() >= cutoff);
    debug!(added, total = events.len(), cutoff, "merged events");

    MergeOutcome { events, added }
}

fn sort_key(event: &EventRecord) -> &str {
    if event.date.is_empty() {
        UNDATED_SORT_KEY
    } else {
        &event.date
    }
}
