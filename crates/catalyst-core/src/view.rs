//! Stateless view orchestration.
//!
//! Every render starts from the loaded event list, the selected tab, and the
//! current time. Nothing is cached between renders, so switching tabs is just
//! another call with a different `tab`.

use chrono::{DateTime, Utc};

use crate::category::Tab;
use crate::event::EventRecord;
use crate::window::{Counts, MonthGroup, count_by_category, filter_by_tab, visible_events};

/// Everything needed to draw one screen of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView<'a> {
    pub tab: Tab,
    /// Badge counts over the whole list, independent of `tab`.
    pub counts: Counts,
    pub groups: Vec<MonthGroup<'a>>,
    /// Shown as "Last updated".
    pub updated_at: DateTime<Utc>,
}

impl TimelineView<'_> {
    pub fn event_count(&self) -> usize {
        self.groups.iter().map(|g| g.events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Build the view for `tab`: filter by tab, then window and group.
pub fn render_view(events: &[EventRecord], tab: Tab, now: DateTime<Utc>) -> TimelineView<'_> {
    TimelineView {
        tab,
        counts: count_by_category(events, now),
        groups: visible_events(filter_by_tab(events, tab), now),
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<EventRecord> {
        let raw = r#"[
            {"company": "Acme", "drug": "AX-1", "type": "PDUFA Date", "date": "2025-04-10", "title": "AX-1 PDUFA", "link": "", "source": "SEC EDGAR 8-K"},
            {"company": "Beta", "drug": "BX-2", "type": "AdComm", "date": "2025-05-02", "title": "ODAC", "link": "", "source": "FDA Scraper"},
            {"company": "Gamma", "drug": "GX-3", "type": "Phase 3 Completion", "date": "2025-04-20", "title": "GX-3 readout", "link": "", "source": "ClinicalTrials.gov"},
            {"company": "Delta", "drug": "DX-4", "type": "Label Update", "date": "2024-02-01", "title": "DX-4 label", "link": "", "source": "OpenFDA"},
            {"company": "Eps", "drug": "EX-5", "type": "FDA Approval", "date": "2025-06-30", "title": "EX-5 approved", "link": "", "source": "openFDA API"},
            {"company": "Zeta", "type": "Press Release", "date": "Unknown", "title": "No date"}
        ]"#;
        serde_json::from_str(raw).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn all_tab_matches_all_count() {
        let events = sample();
        let view = render_view(&events, Tab::All, now());
        assert_eq!(view.event_count(), view.counts.for_tab(Tab::All));
        assert_eq!(view.event_count(), 5);
        assert_eq!(view.updated_at, now());
    }

    #[test]
    fn switching_tabs_reuses_source_and_keeps_counts() {
        let events = sample();
        let snapshot = events.clone();

        let all = render_view(&events, Tab::All, now());
        let pdufa = render_view(&events, Tab::Pdufa, now());
        let labels = render_view(&events, Tab::Labels, now());

        assert_eq!(all.counts, pdufa.counts);
        assert_eq!(pdufa.event_count(), 2);
        assert_eq!(labels.event_count(), 1);
        assert_eq!(labels.groups[0].label, "February 2024");
        assert_eq!(events, snapshot);
    }

    #[test]
    fn every_tab_agrees_with_its_badge() {
        let events = sample();
        for tab in Tab::ALL {
            let view = render_view(&events, tab, now());
            assert_eq!(view.event_count(), view.counts.for_tab(tab), "{tab}");
        }
    }

    #[test]
    fn empty_list_renders_empty_view() {
        let view = render_view(&[], Tab::Trials, now());
        assert!(view.is_empty());
        assert_eq!(view.counts.total, 0);
    }
}
