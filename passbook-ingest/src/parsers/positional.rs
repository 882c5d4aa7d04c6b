//! Older statement layout: every field sits on a fixed line.
//!
//! ```text
//!   0  Jan 05, 2024
//!   1  10:30 AM
//!   2  DEBIT
//!   3  ₹1,250
//!   4  Acme Store
//!   5  Transaction ID T2401051030
//!   6  UTR No. 401234567890
//!   7  Paid by
//!   8  XXXXXXXX1234          (optional)
//! ```

use passbook_core::finance::{CURRENCY_PREFIX, format_amount, parse_amount};

use super::{NoMatch, RecordParser, ensure_len, last_token, parse_timestamp, required, tab_prefixed};
use crate::types::{RawRecord, StatementTransaction};

const MIN_LINES: usize = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalParser;

impl RecordParser for PositionalParser {
    fn layout(&self) -> &'static str {
        "positional"
    }

    fn attempt(&self, record: &RawRecord) -> Result<StatementTransaction, NoMatch> {
        ensure_len(record, MIN_LINES)?;

        let amount_line = required(record, 3)?;
        if !amount_line.trim_start().starts_with(CURRENCY_PREFIX) && !is_plain_number(amount_line) {
            return Err(NoMatch::Precondition("line 3 is not an amount"));
        }

        let (date, time) = parse_timestamp(record)?;
        let kind = required(record, 2)?.trim().to_string();
        let amount = parse_amount(amount_line)
            .map(format_amount)
            .ok_or_else(|| NoMatch::Field { field: "amount", value: amount_line.to_string() })?;
        let payee = required(record, 4)?.trim().to_string();
        let txn_id = last_token(record, 5, "txn_id")?.to_string();
        let utr_no = tab_prefixed(last_token(record, 6, "utr_no")?);
        let payer = record.line(8).map(str::trim).unwrap_or_default().to_string();

        Ok(StatementTransaction {
            date,
            time,
            payee,
            txn_id,
            utr_no,
            payer,
            kind,
            amount,
        })
    }
}

/// "1,250.00" -> true, "T123" -> false
fn is_plain_number(s: &str) -> bool {
    let digits = s.replace(',', "");
    let digits = digits.trim().replace('.', "");
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
