//! Layout-specific record parsers.
//!
//! The statement layout has changed over time without notice, so every
//! record is offered to each known layout in priority order and the first
//! that accepts it wins. A new layout is a new `RecordParser`; existing
//! parsers are never widened to cover it.

mod keyword;
mod positional;

pub use keyword::KeywordParser;
pub use positional::PositionalParser;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;
use tracing::trace;

use crate::types::{RawRecord, StatementTransaction};

/// Why a parser declined a record. Declining is expected, not a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoMatch {
    #[error("record has {len} lines, need at least {min}")]
    TooShort { len: usize, min: usize },

    #[error("precondition failed: {0}")]
    Precondition(&'static str),

    #[error("unparseable {field}: {value:?}")]
    Field { field: &'static str, value: String },
}

/// One statement layout.
pub trait RecordParser: Send + Sync {
    /// Short layout name for logs
    fn layout(&self) -> &'static str;

    fn attempt(&self, record: &RawRecord) -> Result<StatementTransaction, NoMatch>;
}

/// Ordered set of layouts; earlier entries take priority.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn RecordParser>>,
}

impl Default for ParserRegistry {
    /// Positional (older) layout first, then keyword layout.
    fn default() -> Self {
        Self::empty()
            .with(PositionalParser)
            .with(KeywordParser)
    }
}

impl ParserRegistry {
    pub fn empty() -> Self {
        Self { parsers: Vec::new() }
    }

    /// Append a parser at the lowest priority.
    pub fn with(mut self, parser: impl RecordParser + 'static) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    pub fn layouts(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|p| p.layout()).collect()
    }

    /// First successful parse, with the layout that produced it.
    pub fn parse(&self, record: &RawRecord) -> Option<(&'static str, StatementTransaction)> {
        for parser in &self.parsers {
            match parser.attempt(record) {
                Ok(txn) => return Some((parser.layout(), txn)),
                Err(reason) => trace!(
                    layout = parser.layout(),
                    first_line = record.line(0).unwrap_or(""),
                    "no match: {reason}"
                ),
            }
        }
        None
    }
}

const TIMESTAMP_FORMAT: &str = "%b %d, %Y %I:%M %p";

pub(crate) fn ensure_len(record: &RawRecord, min: usize) -> Result<(), NoMatch> {
    if record.len() < min {
        return Err(NoMatch::TooShort { len: record.len(), min });
    }
    Ok(())
}

/// Line `idx`; a record too short to have it is `TooShort`.
pub(crate) fn required(record: &RawRecord, idx: usize) -> Result<&str, NoMatch> {
    record.line(idx).ok_or(NoMatch::TooShort { len: record.len(), min: idx + 1 })
}

/// Date line 0 + time line 1, e.g. "Jan 05, 2024" + "10:30 AM".
pub(crate) fn parse_timestamp(record: &RawRecord) -> Result<(NaiveDate, NaiveTime), NoMatch> {
    let raw = format!(
        "{} {}",
        required(record, 0)?.trim(),
        required(record, 1)?.trim()
    );
    let dt = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
        .map_err(|_| NoMatch::Field { field: "timestamp", value: raw.clone() })?;
    Ok((dt.date(), dt.time()))
}

/// Last whitespace-delimited token of a line ("Transaction ID T123" -> "T123").
pub(crate) fn last_token<'a>(
    record: &'a RawRecord,
    idx: usize,
    field: &'static str,
) -> Result<&'a str, NoMatch> {
    let line = required(record, idx)?;
    line.split_whitespace()
        .last()
        .ok_or_else(|| NoMatch::Field { field, value: line.to_string() })
}

/// Reference numbers keep the leading tab the statement export has always carried.
pub(crate) fn tab_prefixed(token: &str) -> String {
    format!("\t{token}")
}
