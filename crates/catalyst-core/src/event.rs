//! Regulatory event records as they appear in the scraped data file.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::{Category, classify};

/// Placeholder shown for missing company, drug, or type values.
pub const UNKNOWN: &str = "Unknown";

/// One regulatory event from the data file.
///
/// Every field is optional upstream. Field values are read leniently: a
/// string is taken as-is, numbers and booleans are stringified, and a
/// missing key, `null`, array, or object becomes the empty string.
///
/// The object as read is kept in `raw`. Serialising writes it back with only
/// the modelled fields that were changed in code overlaid, so absent keys,
/// nulls, numbers, and unknown keys survive a merge untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct EventRecord {
    pub company: String,
    pub drug: String,
    /// The `type` key.
    pub event_type: String,
    /// Calendar date string, usually `YYYY-MM-DD`. May be empty or garbage.
    pub date: String,
    pub title: String,
    pub link: String,
    pub source: String,
    pub raw: Map<String, Value>,
}

impl EventRecord {
    /// Parsed event date, or `None` when the date string is absent or invalid.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        parse_event_date(&self.date)
    }

    pub fn category(&self) -> Category {
        classify(self)
    }

    /// Look up a field by its lower-cased column name.
    pub fn field(&self, name: &str) -> &str {
        match name {
            "company" => &self.company,
            "drug" => &self.drug,
            "type" => &self.event_type,
            "date" => &self.date,
            "title" => &self.title,
            "link" => &self.link,
            "source" => &self.source,
            _ => self
                .raw
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default(),
        }
    }

    pub fn company_or_unknown(&self) -> &str {
        or_unknown(&self.company)
    }

    pub fn drug_or_unknown(&self) -> &str {
        or_unknown(&self.drug)
    }

    pub fn type_or_unknown(&self) -> &str {
        or_unknown(&self.event_type)
    }
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN
    } else {
        value
    }
}

/// Text of a scalar JSON value; empty for anything else.
fn lenient_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

impl From<Map<String, Value>> for EventRecord {
    fn from(raw: Map<String, Value>) -> Self {
        Self {
            company: lenient_text(raw.get("company")),
            drug: lenient_text(raw.get("drug")),
            event_type: lenient_text(raw.get("type")),
            date: lenient_text(raw.get("date")),
            title: lenient_text(raw.get("title")),
            link: lenient_text(raw.get("link")),
            source: lenient_text(raw.get("source")),
            raw,
        }
    }
}

impl From<EventRecord> for Map<String, Value> {
    fn from(ev: EventRecord) -> Self {
        let mut out = ev.raw;
        let fields = [
            ("company", ev.company),
            ("drug", ev.drug),
            ("type", ev.event_type),
            ("date", ev.date),
            ("title", ev.title),
            ("link", ev.link),
            ("source", ev.source),
        ];
        for (key, value) in fields {
            let unchanged = match out.get(key) {
                Some(original) => lenient_text(Some(original)) == value,
                None => value.is_empty(),
            };
            if !unchanged {
                out.insert(key.to_string(), Value::String(value));
            }
        }
        out
    }
}

/// Parse an event date string into a UTC instant.
///
/// Accepted forms:
///
/// - `2025-06-01` (midnight UTC)
/// - RFC 3339 timestamps, e.g. `2025-06-01T14:00:00-04:00`
/// - naive timestamps, e.g. `2025-06-01T14:00:00` (read as UTC)
/// - long-form dates, e.g. `June 1, 2025` or `Jun 1, 2025` (midnight UTC)
///
/// Anything else, including placeholders like `"Unknown"`, is `None`.
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return midnight_utc(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    // %B accepts abbreviated month names too.
    if let Ok(d) = NaiveDate::parse_from_str(s, "%B %d, %Y") {
        return midnight_utc(d);
    }
    None
}

fn midnight_utc(d: NaiveDate) -> Option<DateTime<Utc>> {
    d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}
