//! Six-column CSV export in the layout the Cashew budgeting app imports:
//! `Date,Amount,Category,Title,Note,Account`.

use std::io::Write;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{error, info};

use passbook_core::finance::{CanonicalTransaction, parse_amount};

use crate::category_map::CategoryMap;

pub const HEADER: [&str; 6] = ["Date", "Amount", "Category", "Title", "Note", "Account"];

const SOURCE_TIMESTAMP: &str = "%Y-%m-%d %I:%M %p";
const EXPORT_TIMESTAMP: &str = "%d-%m-%Y %H:%M";

/// Writer-level failures. Bad rows are skipped, not reported here.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq)]
enum RowError {
    #[error("invalid date/time {0:?}")]
    Timestamp(String),

    #[error("invalid amount {0:?}")]
    Amount(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: usize,
    pub skipped: usize,
}

fn to_row(txn: &CanonicalTransaction, categories: Option<&CategoryMap>) -> Result<[String; 6], RowError> {
    let stamp = format!("{} {}", txn.date, txn.time);
    let dt = NaiveDateTime::parse_from_str(&stamp, SOURCE_TIMESTAMP)
        .map_err(|_| RowError::Timestamp(stamp.clone()))?;

    let amount = parse_amount(&txn.amount).ok_or_else(|| RowError::Amount(txn.amount.clone()))?;
    let signed = if amount == 0.0 { 0.0 } else { amount * txn.direction.sign() };

    let category = categories
        .and_then(|m| m.get(&txn.payee))
        .unwrap_or(txn.category.as_str());

    let title = if txn.payee.is_empty() {
        txn.direction.fallback_title()
    } else {
        txn.payee.as_str()
    };

    Ok([
        dt.format(EXPORT_TIMESTAMP).to_string(),
        format!("{signed:.2}"),
        category.to_string(),
        title.to_string(),
        txn.note.clone(),
        String::new(),
    ])
}

/// Write all transactions; rows that fail to re-parse are logged and skipped.
pub fn export_cashew_csv<W: Write>(
    txns: &[CanonicalTransaction],
    categories: Option<&CategoryMap>,
    writer: W,
) -> Result<ExportSummary, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    let mut summary = ExportSummary::default();
    for txn in txns {
        match to_row(txn, categories) {
            Ok(row) => {
                wtr.write_record(&row)?;
                summary.written += 1;
            }
            Err(e) => {
                error!("Error processing transaction ({}): {e}", txn.note);
                summary.skipped += 1;
            }
        }
    }
    wtr.flush()?;

    info!("Exported {} rows ({} skipped)", summary.written, summary.skipped);
    Ok(summary)
}

/// Export into an in-memory string.
pub fn export_cashew_string(
    txns: &[CanonicalTransaction],
    categories: Option<&CategoryMap>,
) -> Result<(String, ExportSummary), ExportError> {
    let mut buf = Vec::new();
    let summary = export_cashew_csv(txns, categories, &mut buf)?;
    let content = String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok((content, summary))
}
