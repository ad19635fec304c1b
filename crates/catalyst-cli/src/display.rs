//! Terminal rendering for the timeline view.
//!
//! Layout, top to bottom: tab bar with count badges, "Last updated" line,
//! then one block per month with its events in date order.

use std::io::{self, Write};

use catalyst_core::{Counts, DatedEvent, Tab, TimelineView};
use chrono::{DateTime, Local, Utc};

const MAX_TITLE_CHARS: usize = 80;

// ── Public API ──

/// Print a full timeline view to stdout.
pub fn print_timeline(view: &TimelineView<'_>) -> io::Result<()> {
    write_timeline(&mut io::stdout().lock(), view)
}

/// Print the message shown when the feed could not be loaded.
pub fn print_load_error(err: &dyn std::fmt::Display) {
    println!("Could not load events: {err}");
    println!("No events to display.");
}

/// Print the per-tab badge counts as a small table.
pub fn print_counts(counts: &Counts) -> io::Result<()> {
    write_counts(&mut io::stdout().lock(), counts)
}

// ── Rendering ──

pub fn write_timeline(out: &mut impl Write, view: &TimelineView<'_>) -> io::Result<()> {
    write_tab_bar(out, &view.counts, view.tab)?;
    writeln!(out, "Last updated: {}", format_updated(view.updated_at))?;
    writeln!(out)?;

    if view.is_empty() {
        writeln!(out, "No upcoming events for {}.", view.tab.title())?;
        return Ok(());
    }

    for group in &view.groups {
        writeln!(out, "{} ({})", group.label, group.events.len())?;
        for event in &group.events {
            write_event(out, event)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_tab_bar(out: &mut impl Write, counts: &Counts, selected: Tab) -> io::Result<()> {
    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|&tab| {
            let text = format!("{} ({})", tab.title(), counts.for_tab(tab));
            if tab == selected {
                format!("[{text}]")
            } else {
                format!(" {text} ")
            }
        })
        .collect();
    writeln!(out, "{}", tabs.join(" "))
}

fn write_event(out: &mut impl Write, dated: &DatedEvent<'_>) -> io::Result<()> {
    let ev = dated.event;
    writeln!(
        out,
        "  {:<6}  {:<10} {} · {} · {}",
        dated.date.format("%b %d"),
        format!("[{}]", dated.category.badge()),
        ev.company_or_unknown(),
        ev.drug_or_unknown(),
        ev.type_or_unknown(),
    )?;
    if !ev.title.trim().is_empty() {
        writeln!(out, "{:20}{}", "", truncate(ev.title.trim(), MAX_TITLE_CHARS))?;
    }
    if !ev.link.trim().is_empty() && ev.link != "#" {
        writeln!(out, "{:20}{}", "", ev.link.trim())?;
    }
    Ok(())
}

pub fn write_counts(out: &mut impl Write, counts: &Counts) -> io::Result<()> {
    for tab in Tab::ALL {
        writeln!(out, "  {:<16} {}", tab.title(), counts.for_tab(tab))?;
    }
    Ok(())
}

// ── Helpers ──

fn format_updated(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}
