//! CSV export of event records.

use thiserror::Error;

use crate::event::EventRecord;

/// Default download file name.
pub const DEFAULT_EXPORT_FILE: &str = "fda_catalysts.csv";

/// Column headers, in output order. Each maps to the lower-cased field name.
pub const COLUMNS: [&str; 7] = ["Company", "Drug", "Type", "Date", "Title", "Link", "Source"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render events as CSV.
///
/// The header row is bare. Every data cell is double-quoted with inner quotes
/// doubled. Rows are `\n`-separated with no trailing newline.
pub fn to_csv<'a, I>(events: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut buf = Vec::new();

    {
        let mut header = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(&mut buf);
        header.write_record(COLUMNS)?;
        header.flush()?;
    }

    {
        let mut rows = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(&mut buf);
        for event in events {
            rows.write_record(COLUMNS.iter().map(|c| event.field(&c.to_lowercase())))?;
        }
        rows.flush()?;
    }

    let mut out = String::from_utf8(buf)?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}
