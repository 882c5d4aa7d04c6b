//! passbook-ingest: record segmentation, layout-specific parsers, and PDF text extraction.

pub mod types;
pub mod segment;
pub mod parsers;
pub mod pdf;

pub use types::{RawRecord, StatementTransaction};
pub use segment::{Records, is_record_marker, segment};
pub use parsers::{KeywordParser, NoMatch, ParserRegistry, PositionalParser, RecordParser};
pub use pdf::PdfTextExtractor;
