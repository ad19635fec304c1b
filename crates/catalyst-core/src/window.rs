//! Date windowing, month grouping, and badge counts.
//!
//! Both grouping and counting go through [`is_visible`] so the badge numbers
//! always match what the timeline shows. `now` is always a parameter.

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::category::{Category, Tab};
use crate::event::EventRecord;

/// Past events older than this many days are dropped (labels excepted).
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Visibility rule for a classified, validly dated event.
///
/// Visible when `(date >= now || label) && !(date older than the recent
/// window && !label)`. Label updates stay visible at any age.
pub fn is_visible(date: DateTime<Utc>, category: Category, now: DateTime<Utc>) -> bool {
    let is_label = category == Category::Label;
    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    (date >= now || is_label) && !(date < cutoff && !is_label)
}

/// An event that passed the window, with its parsed date and category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedEvent<'a> {
    pub event: &'a EventRecord,
    pub date: DateTime<Utc>,
    pub category: Category,
}

/// Events of one calendar month, date-ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<'a> {
    /// "March 2025"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub events: Vec<DatedEvent<'a>>,
}

/// Events whose category belongs to `tab`, in source order.
pub fn filter_by_tab(events: &[EventRecord], tab: Tab) -> Vec<&EventRecord> {
    events.iter().filter(|e| tab.includes(e.category())).collect()
}

/// Window and group events by month.
///
/// Events are stably sorted by date (unparseable dates last), passed through
/// [`is_visible`], and split into month buckets in chronological order.
/// Events with unparseable dates never reach a group.
pub fn visible_events<'a, I>(events: I, now: DateTime<Utc>) -> Vec<MonthGroup<'a>>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut dated: Vec<(Option<DateTime<Utc>>, &EventRecord)> =
        events.into_iter().map(|e| (e.parsed_date(), e)).collect();
    dated.sort_by_key(|(date, _)| (date.is_none(), *date));

    let mut groups: Vec<MonthGroup<'a>> = Vec::new();
    for (date, event) in dated {
        let Some(date) = date else { continue };
        let category = event.category();
        if !is_visible(date, category, now) {
            continue;
        }

        let entry = DatedEvent {
            event,
            date,
            category,
        };
        match groups.last_mut() {
            Some(g) if g.year == date.year() && g.month == date.month() => g.events.push(entry),
            _ => groups.push(MonthGroup {
                label: date.format("%B %Y").to_string(),
                year: date.year(),
                month: date.month(),
                events: vec![entry],
            }),
        }
    }
    groups
}

/// Visible-event counts per category, used for tab badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub pdufa: usize,
    pub adcomm: usize,
    pub trial: usize,
    pub approval: usize,
    pub label: usize,
}

impl Counts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Pdufa => self.pdufa,
            Category::Adcomm => self.adcomm,
            Category::Trial => self.trial,
            Category::Approval => self.approval,
            Category::Label => self.label,
        }
    }

    fn bump(&mut self, category: Category) {
        self.total += 1;
        match category {
            Category::Pdufa => self.pdufa += 1,
            Category::Adcomm => self.adcomm += 1,
            Category::Trial => self.trial += 1,
            Category::Approval => self.approval += 1,
            Category::Label => self.label += 1,
        }
    }

    /// Badge value for a tab.
    pub fn for_tab(&self, tab: Tab) -> usize {
        match tab {
            Tab::All => self.total,
            _ => Category::ALL
                .into_iter()
                .filter(|c| tab.includes(*c))
                .map(|c| self.get(c))
                .sum(),
        }
    }
}

/// Count visible events across the whole list, ignoring any tab.
pub fn count_by_category(events: &[EventRecord], now: DateTime<Utc>) -> Counts {
    let mut counts = Counts::default();
    for event in events {
        let Some(date) = event.parsed_date() else {
            continue;
        };
        let category = event.category();
        if is_visible(date, category, now) {
            counts.bump(category);
        }
    }
    counts
}
