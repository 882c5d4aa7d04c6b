use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Lines believed to describe one transaction, marker line first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    lines: Vec<String>,
}

impl RawRecord {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

impl<S: Into<String>> FromIterator<S> for RawRecord {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Layout-native output of a record parser, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTransaction {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Free text; may embed a verb phrase such as "Paid to X"
    pub payee: String,
    pub txn_id: String,
    /// Reference (UTR) number, tab-prefixed as the statement renders it
    pub utr_no: String,
    /// Counterparty account holder; may be empty
    pub payer: String,
    /// Layout-dependent transaction type label
    pub kind: String,
    /// Currency-prefixed, positive, two decimal places
    pub amount: String,
}

impl StatementTransaction {
    /// ISO calendar date, e.g. "2024-01-05"
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// 12-hour clock with meridiem, e.g. "10:30 AM"
    pub fn time_12h(&self) -> String {
        self.time.format("%I:%M %p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accessors() {
        let rec: RawRecord = ["Jan 05, 2024", "10:30 AM"].into_iter().collect();
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.line(1), Some("10:30 AM"));
        assert_eq!(rec.line(2), None);
        assert!(!rec.is_empty());
    }

    #[test]
    fn test_date_time_rendering() {
        let txn = StatementTransaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            time: NaiveTime::from_hms_opt(21, 7, 0).unwrap(),
            payee: String::new(),
            txn_id: String::new(),
            utr_no: String::new(),
            payer: String::new(),
            kind: String::new(),
            amount: "₹1.00".to_string(),
        };
        assert_eq!(txn.date_iso(), "2024-01-05");
        assert_eq!(txn.time_12h(), "09:07 PM");
    }
}
