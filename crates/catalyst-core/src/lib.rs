pub mod category;
pub mod event;
pub mod export;
pub mod merge;
pub mod view;
pub mod window;

pub use category::{Category, ParseTabError, Tab, classify};
pub use event::{EventRecord, UNKNOWN, parse_event_date};
pub use export::{DEFAULT_EXPORT_FILE, ExportError, to_csv};
pub use merge::{DEFAULT_CUTOFF, MergeOutcome, merge_events};
pub use view::{TimelineView, render_view};
pub use window::{Counts, DatedEvent, MonthGroup, count_by_category, filter_by_tab, visible_events};
