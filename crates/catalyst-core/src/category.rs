//! Keyword classification of events into categories, and the display tabs
//! that select them.
//!
//! Event records come from heterogeneous scrapers (SEC filings, press
//! releases, openFDA, ClinicalTrials.gov) and carry free-text `type` values,
//! so classification is an ordered series of substring tests. The first rule
//! that matches wins.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::event::EventRecord;

/// The category assigned to every event. Exactly one per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Pdufa,
    Adcomm,
    Trial,
    Approval,
    Label,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Pdufa,
        Self::Adcomm,
        Self::Trial,
        Self::Approval,
        Self::Label,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdufa => "pdufa",
            Self::Adcomm => "adcomm",
            Self::Trial => "trial",
            Self::Approval => "approval",
            Self::Label => "label",
        }
    }

    /// Short badge text shown next to an event.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Pdufa => "PDUFA",
            Self::Adcomm => "AdComm",
            Self::Trial => "Trial",
            Self::Approval => "Approval",
            Self::Label => "Label",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an event. Pure, total, and deterministic.
///
/// Rules, in priority order (first match wins):
///
/// 1. `pdufa`: type or title mentions "pdufa", or type mentions "fda decision"
/// 2. `adcomm`: type mentions "adcomm" or "advisory", or title mentions
///    "advisory committee"
/// 3. `trial`: type mentions "phase" or "trial", or source mentions
///    "clinicaltrials"
/// 4. `approval`: type mentions "approval" or "approved"
/// 5. `label`: type mentions "label" or "boxed warning"
///
/// Falls back to `pdufa`.
pub fn classify(event: &EventRecord) -> Category {
    let kind = event.event_type.to_lowercase();
    let title = event.title.to_lowercase();
    let source = event.source.to_lowercase();

    if kind.contains("pdufa") || title.contains("pdufa") || kind.contains("fda decision") {
        Category::Pdufa
    } else if kind.contains("adcomm")
        || kind.contains("advisory")
        || title.contains("advisory committee")
    {
        Category::Adcomm
    } else if kind.contains("phase") || kind.contains("trial") || source.contains("clinicaltrials")
    {
        Category::Trial
    } else if kind.contains("approval") || kind.contains("approved") {
        Category::Approval
    } else if kind.contains("label") || kind.contains("boxed warning") {
        Category::Label
    } else {
        Category::Pdufa
    }
}

/// A display tab. Each tab selects a fixed subset of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    All,
    Pdufa,
    Adcomm,
    Trials,
    Labels,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Self::All,
        Self::Pdufa,
        Self::Adcomm,
        Self::Trials,
        Self::Labels,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pdufa => "pdufa",
            Self::Adcomm => "adcomm",
            Self::Trials => "trials",
            Self::Labels => "labels",
        }
    }

    /// Button caption.
    pub fn title(&self) -> &'static str {
        match self {
            Self::All => "All Events",
            Self::Pdufa => "PDUFA Dates",
            Self::Adcomm => "AdComms",
            Self::Trials => "Trials",
            Self::Labels => "Label Updates",
        }
    }

    /// Whether events of `category` are shown under this tab.
    ///
    /// The PDUFA tab also carries approvals: an approval is the resolution
    /// of a PDUFA date.
    pub fn includes(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Pdufa => matches!(category, Category::Pdufa | Category::Approval),
            Self::Adcomm => category == Category::Adcomm,
            Self::Trials => category == Category::Trial,
            Self::Labels => category == Category::Label,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown tab '{0}' (expected one of: all, pdufa, adcomm, trials, labels)")]
pub struct ParseTabError(String);

impl FromStr for Tab {
    type Err = ParseTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ParseTabError(s.to_string()))
    }
}
