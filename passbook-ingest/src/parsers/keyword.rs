//! Newer statement layout: line 2 carries a verb phrase ("Paid to ...",
//! "Received from ...") and the amount may be split from its "INR" label.
//!
//! ```text
//!   0  Feb 14, 2024
//!   1  07:45 PM
//!   2  Received from Jane Doe
//!   3  Transaction ID T2402141945
//!   4  UTR No. 123456789012
//!   5  Credited to XXXXXXXX5678
//!   6  CREDIT
//!   7  INR                    (or the amount itself)
//!   8  2,000.50
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use passbook_core::finance::format_amount;

use super::{NoMatch, RecordParser, ensure_len, last_token, parse_timestamp, required, tab_prefixed};
use crate::types::{RawRecord, StatementTransaction};

const MIN_LINES: usize = 8;

const PAYEE_KEYWORDS: [&str; 4] = ["Paid to", "Received from", "Refund", "Payment to"];

lazy_static! {
    static ref AMOUNT_NUMBER: Regex = Regex::new(r"[\d,]+(?:\.\d+)?").unwrap();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordParser;

impl RecordParser for KeywordParser {
    fn layout(&self) -> &'static str {
        "keyword"
    }

    fn attempt(&self, record: &RawRecord) -> Result<StatementTransaction, NoMatch> {
        ensure_len(record, MIN_LINES)?;

        let payee_line = required(record, 2)?;
        if !PAYEE_KEYWORDS.iter().any(|kw| payee_line.contains(kw)) {
            return Err(NoMatch::Precondition("line 2 has no payee keyword"));
        }

        let (date, time) = parse_timestamp(record)?;
        let txn_id = last_token(record, 3, "txn_id")?.to_string();
        let utr_no = tab_prefixed(last_token(record, 4, "utr_no")?);
        let payer = required(record, 5)?.trim().to_string();
        let kind = required(record, 6)?.trim().to_string();
        let amount = format_amount(extract_amount(amount_line(record)?)?);

        Ok(StatementTransaction {
            date,
            time,
            payee: payee_line.trim().to_string(),
            txn_id,
            utr_no,
            payer,
            kind,
            amount,
        })
    }
}

/// Line 8 when line 7 is just the "INR" label, else line 7.
fn amount_line(record: &RawRecord) -> Result<&str, NoMatch> {
    let line7 = required(record, 7)?;
    match record.line(8) {
        Some(line8) if line7.trim().ends_with("INR") => Ok(line8.trim()),
        _ => Ok(line7.trim()),
    }
}

/// First decimal number in the line; zero when there is none.
fn extract_amount(line: &str) -> Result<f64, NoMatch> {
    let Some(m) = AMOUNT_NUMBER.find(line) else {
        return Ok(0.0);
    };
    m.as_str()
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| NoMatch::Field { field: "amount", value: line.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(lines: &[&str]) -> RawRecord {
        lines.iter().copied().collect()
    }

    fn sample() -> Vec<&'static str> {
        vec![
            "Feb 14, 2024",
            "07:45 PM",
            "Received from Jane Doe",
            "Transaction ID T2402141945",
            "UTR No. 123456789012",
            "Credited to XXXXXXXX5678",
            "CREDIT",
            "INR",
            "2,000.5",
        ]
    }

    #[test]
    fn test_parses_split_inr_amount() {
        let txn = KeywordParser.attempt(&rec(&sample())).unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(txn.time_12h(), "07:45 PM");
        assert_eq!(txn.payee, "Received from Jane Doe");
        assert_eq!(txn.txn_id, "T2402141945");
        assert_eq!(txn.utr_no, "\t123456789012");
        assert_eq!(txn.payer, "Credited to XXXXXXXX5678");
        assert_eq!(txn.kind, "CREDIT");
        assert_eq!(txn.amount, "₹2000.50");
    }

    #[test]
    fn test_amount_on_line_seven() {
        let lines = [
            "Jan 05, 2024",
            "10:30 AM",
            "Paid to Acme Store",
            "T123456",
            "U987654",
            "John",
            "DEBIT",
            "₹1,250.00",
        ];
        let txn = KeywordParser.attempt(&rec(&lines)).unwrap();
        assert_eq!(txn.amount, "₹1250.00");
        assert_eq!(txn.txn_id, "T123456");
        assert_eq!(txn.utr_no, "\tU987654");
    }

    #[test]
    fn test_inr_label_without_following_line_uses_line_seven() {
        let lines = sample();
        let txn = KeywordParser.attempt(&rec(&lines[..8])).unwrap();
        assert_eq!(txn.amount, "₹0.00");
    }

    #[test]
    fn test_inline_inr_suffix_reads_next_line() {
        let mut lines = sample();
        lines[7] = "Amount INR";
        lines[8] = "15";
        assert_eq!(KeywordParser.attempt(&rec(&lines)).unwrap().amount, "₹15.00");
    }

    #[test]
    fn test_more_than_two_decimals_is_rounded() {
        let mut lines = sample();
        lines[8] = "99.999";
        assert_eq!(KeywordParser.attempt(&rec(&lines)).unwrap().amount, "₹100.00");
    }

    #[test]
    fn test_requires_keyword() {
        let mut lines = sample();
        lines[2] = "Jane Doe";
        let err = KeywordParser.attempt(&rec(&lines)).unwrap_err();
        assert_eq!(err, NoMatch::Precondition("line 2 has no payee keyword"));
    }

    #[test]
    fn test_every_keyword_accepted() {
        for payee in ["Paid to X", "Received from X", "Refund for X", "Payment to X"] {
            let mut lines = sample();
            lines[2] = payee;
            assert!(KeywordParser.attempt(&rec(&lines)).is_ok(), "{payee}");
        }
    }

    #[test]
    fn test_rejects_short_record() {
        let err = KeywordParser.attempt(&rec(&sample()[..5])).unwrap_err();
        assert_eq!(err, NoMatch::TooShort { len: 5, min: 8 });
    }

    #[test]
    fn test_lone_separator_is_no_match() {
        let mut lines = sample();
        lines[8] = ", pending";
        let err = KeywordParser.attempt(&rec(&lines)).unwrap_err();
        assert!(matches!(err, NoMatch::Field { field: "amount", .. }));
    }
}
