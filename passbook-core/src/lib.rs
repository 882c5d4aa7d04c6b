//! passbook-core: canonical transaction types and the document-extraction seam

pub mod extract;
pub mod finance;

pub use extract::{ExtractError, PlainTextExtractor, TextExtractor};
pub use finance::{CURRENCY_PREFIX, CanonicalTransaction, Direction, format_amount, parse_amount};
