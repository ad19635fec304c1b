mod display;
mod feed;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use catalyst_core::{
    DEFAULT_CUTOFF, DEFAULT_EXPORT_FILE, EventRecord, Tab, count_by_category, filter_by_tab,
    merge_events, render_view, to_csv,
};
use catalyst_sync::{FeedError, load_events, save_events};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

/// Pharmaceutical regulatory event tracker: PDUFA dates, AdComms, trials,
/// label updates.
#[derive(Parser)]
#[command(name = "catalyst", version, about)]
struct Cli {
    /// Event data file: a local path or an http(s) URL.
    #[arg(long, global = true, env = "CATALYST_SOURCE", default_value = "data/data.json")]
    source: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show upcoming events grouped by month.
    Show {
        /// Category tab: all, pdufa, adcomm, trials, labels.
        #[arg(long, env = "CATALYST_TAB", default_value = "all")]
        tab: Tab,

        /// Render every tab in turn from a single load. Overrides `--tab`.
        #[arg(long)]
        all_tabs: bool,
    },
    /// Show visible-event counts per tab.
    Counts,
    /// Export the events of a tab as CSV.
    Export {
        #[arg(long, env = "CATALYST_TAB", default_value = "all")]
        tab: Tab,

        /// Output file, or `-` for stdout.
        #[arg(short, long, env = "CATALYST_EXPORT", default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
    /// Merge newly scraped event files into the data file.
    Merge {
        /// Data file to update.
        #[arg(long, env = "CATALYST_DATA", default_value = "data/data.json")]
        data: PathBuf,

        /// Drop events dated before this (YYYY-MM-DD).
        #[arg(long, env = "CATALYST_SINCE", default_value = DEFAULT_CUTOFF)]
        since: String,

        /// JSON files of new events.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    info!("catalyst v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Show { tab, all_tabs } => cmd_show(&cli.source, tab, all_tabs).await,
        Command::Counts => cmd_counts(&cli.source).await,
        Command::Export { tab, output } => cmd_export(&cli.source, tab, &output).await,
        Command::Merge {
            data,
            since,
            inputs,
        } => cmd_merge(&data, &since, &inputs),
    }
}

/// Load the feed, degrading to `None` (with the empty-state message) on failure.
async fn load_or_empty_state(source: &str) -> Option<Vec<EventRecord>> {
    match feed::load(source).await {
        Ok(events) => Some(events),
        Err(e) => {
            warn!(source, error = %e, "failed to load events");
            display::print_load_error(&e);
            None
        }
    }
}

async fn cmd_show(source: &str, tab: Tab, all_tabs: bool) -> anyhow::Result<()> {
    let Some(events) = load_or_empty_state(source).await else {
        return Ok(());
    };

    let now = Utc::now();
    let tabs = if all_tabs { Tab::ALL.to_vec() } else { vec![tab] };
    for tab in tabs {
        let view = render_view(&events, tab, now);
        display::print_timeline(&view)?;
    }
    Ok(())
}

async fn cmd_counts(source: &str) -> anyhow::Result<()> {
    let Some(events) = load_or_empty_state(source).await else {
        return Ok(());
    };
    let counts = count_by_category(&events, Utc::now());
    display::print_counts(&counts)?;
    Ok(())
}

async fn cmd_export(source: &str, tab: Tab, output: &Path) -> anyhow::Result<()> {
    let events = feed::load(source)
        .await
        .with_context(|| format!("loading events from {source}"))?;
    let selected = filter_by_tab(&events, tab);
    let csv = to_csv(selected.iter().copied()).context("rendering CSV")?;

    if output == Path::new("-") {
        write_csv(std::io::stdout().lock(), &csv)?;
    } else {
        std::fs::write(output, &csv)
            .with_context(|| format!("writing {}", output.display()))?;
        println!("Exported {} events to {}", selected.len(), output.display());
    }
    Ok(())
}

/// Write the CSV body as-is, matching the bytes of the file export.
fn write_csv<W: Write>(mut out: W, csv: &str) -> std::io::Result<()> {
    out.write_all(csv.as_bytes())?;
    out.flush()
}

fn cmd_merge(data: &Path, since: &str, inputs: &[PathBuf]) -> anyhow::Result<()> {
    let existing = match load_events(data) {
        Ok(events) => events,
        Err(e @ FeedError::Json(_)) => {
            warn!(path = %data.display(), error = %e, "data file unreadable, starting fresh");
            Vec::new()
        }
        Err(e) => return Err(e).with_context(|| format!("reading {}", data.display())),
    };

    let mut incoming = Vec::new();
    for path in inputs {
        let events =
            load_events(path).with_context(|| format!("reading {}", path.display()))?;
        incoming.extend(events);
    }

    let outcome = merge_events(existing, incoming, since);
    save_events(data, &outcome.events).with_context(|| format!("writing {}", data.display()))?;

    println!(
        "Database updated. Total events: {} (Added {} new).",
        outcome.events.len(),
        outcome.added
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_tab() {
        let cli = Cli::try_parse_from(["catalyst", "show", "--tab", "trials"]).unwrap();
        match cli.command {
            Command::Show { tab, all_tabs } => {
                assert_eq!(tab, Tab::Trials);
                assert!(!all_tabs);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn rejects_unknown_tab() {
        assert!(Cli::try_parse_from(["catalyst", "show", "--tab", "approvals"]).is_err());
    }

    #[test]
    fn source_is_global() {
        let cli =
            Cli::try_parse_from(["catalyst", "counts", "--source", "https://example.org/d.json"])
                .unwrap();
        assert_eq!(cli.source, "https://example.org/d.json");
    }

    #[test]
    fn merge_requires_inputs() {
        assert!(Cli::try_parse_from(["catalyst", "merge"]).is_err());
    }

    #[test]
    fn merge_writes_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        let new = dir.path().join("new.json");
        std::fs::write(
            &data,
            r#"[{"company": "Acme", "date": "2025-01-10", "title": "A", "type": "PDUFA"}]"#,
        )
        .unwrap();
        std::fs::write(
            &new,
            r#"[
                {"company": "Acme", "date": "2025-01-10", "title": "A", "type": "PDUFA"},
                {"company": "Beta", "date": "2024-09-01", "title": "B", "type": "AdComm"},
                {"company": "Old", "date": "2023-02-01", "title": "C", "type": "AdComm"}
            ]"#,
        )
        .unwrap();

        cmd_merge(&data, DEFAULT_CUTOFF, &[new]).unwrap();

        let merged = load_events(&data).unwrap();
        let companies: Vec<&str> = merged.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, vec!["Beta", "Acme"]);
    }

    #[test]
    fn merge_recovers_from_corrupt_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        let new = dir.path().join("new.json");
        std::fs::write(&data, "{ truncated").unwrap();
        std::fs::write(&new, r#"[{"company": "Acme", "date": "2025-01-10", "title": "A"}]"#)
            .unwrap();

        cmd_merge(&data, DEFAULT_CUTOFF, &[new]).unwrap();
        assert_eq!(load_events(&data).unwrap().len(), 1);
    }

    #[test]
    fn merge_keeps_records_with_odd_field_types() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        let new = dir.path().join("new.json");
        std::fs::write(
            &data,
            r#"[
                {"company": "Keep1", "date": "2025-01-10", "title": "A"},
                {"company": "Keep2", "date": "2025-02-10", "title": "B", "link": null},
                {"company": "Odd", "drug": 42, "date": "2025-03-10", "title": "C"}
            ]"#,
        )
        .unwrap();
        std::fs::write(&new, r#"[{"company": "New", "date": "2025-04-10", "title": "D"}]"#)
            .unwrap();

        cmd_merge(&data, DEFAULT_CUTOFF, &[new]).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&data).unwrap()).unwrap();
        let rows = written.as_array().unwrap();
        let companies: Vec<&str> = rows
            .iter()
            .map(|r| r["company"].as_str().unwrap())
            .collect();
        assert_eq!(companies, vec!["Keep1", "Keep2", "Odd", "New"]);
        assert!(rows[0].get("drug").is_none());
        assert!(rows[1]["link"].is_null());
        assert_eq!(rows[2]["drug"], 42);
    }

    #[tokio::test]
    async fn export_writes_csv_for_tab() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        let out = dir.path().join("out.csv");
        std::fs::write(
            &data,
            r#"[
                {"company": "Acme", "drug": "Drug-X", "type": "PDUFA", "date": "2025-06-01",
                 "title": "Acme Drug-X PDUFA", "link": "http://x", "source": "FDA"},
                {"company": "Beta", "type": "Label Update", "date": "2024-06-01"}
            ]"#,
        )
        .unwrap();

        cmd_export(data.to_str().unwrap(), Tab::Pdufa, &out)
            .await
            .unwrap();

        let csv = std::fs::read_to_string(&out).unwrap();
        assert!(!csv.ends_with('\n'));
        assert_eq!(
            csv,
            "Company,Drug,Type,Date,Title,Link,Source\n\
             \"Acme\",\"Drug-X\",\"PDUFA\",\"2025-06-01\",\"Acme Drug-X PDUFA\",\"http://x\",\"FDA\""
        );
    }

    #[test]
    fn stdout_export_matches_file_bytes() {
        let ev = EventRecord {
            company: "Acme".into(),
            ..Default::default()
        };
        let csv = to_csv([&ev]).unwrap();
        let mut out = Vec::new();
        write_csv(&mut out, &csv).unwrap();
        assert_eq!(out, csv.as_bytes());
        assert!(!out.ends_with(b"\n"));
    }
}
