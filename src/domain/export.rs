//! Spreadsheet export of the trade log.
//!
//! Every cell is double-quoted and rows are `\n`-joined with no trailing
//! newline. Embedded double quotes are doubled, so free-text fields such as
//! notes always produce well-formed CSV.

use crate::domain::error::JournalError;
use crate::domain::trade::TradeRecord;
use chrono::NaiveDate;

pub const CSV_MIME_TYPE: &str = "text/csv";

pub const CSV_HEADERS: [&str; 13] = [
    "Date",
    "Session",
    "Time Zone",
    "Pair",
    "Setup Type",
    "Entry Quality",
    "Entry",
    "SL",
    "TP",
    "R:R",
    "Outcome",
    "Pips/Points",
    "Notes",
];

/// `ict_trades_<YYYY-MM-DD>.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("ict_trades_{}.csv", date.format("%Y-%m-%d"))
}

fn row(record: &TradeRecord) -> [String; 13] {
    fn label<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    [
        record.date.format("%Y-%m-%d").to_string(),
        record.session.to_string(),
        label(record.time_zone),
        record.pair.to_string(),
        record.setup_type.to_string(),
        label(record.entry_quality),
        record.entry.clone(),
        record.sl.clone(),
        record.tp.clone(),
        record.rr.clone(),
        label(record.outcome),
        record.pips.clone(),
        record.notes.clone(),
    ]
}

/// Renders `records` in the order given (storage order, oldest first).
pub fn to_csv(records: &[TradeRecord]) -> Result<String, JournalError> {
    let export_err = |reason: String| JournalError::Export { reason };

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| export_err(e.to_string()))?;
    for record in records {
        writer
            .write_record(row(record))
            .map_err(|e| export_err(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| export_err(e.to_string()))?;
    let mut csv = String::from_utf8(bytes).map_err(|e| export_err(e.to_string()))?;
    if csv.ends_with('\n') {
        csv.pop();
    }
    Ok(csv)
}
