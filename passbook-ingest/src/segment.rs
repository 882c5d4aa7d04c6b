//! Record segmentation.
//!
//! A statement's extracted text is a flat run of lines. Each transaction
//! begins with a bare date line such as `Jan 05, 2024`; everything up to the
//! next such line belongs to it. Lines before the first marker are noise.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::RawRecord;

lazy_static! {
    static ref RECORD_MARKER: Regex = Regex::new(
        r"^(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) \d{2}, 20\d{2}$"
    ).unwrap();
}

/// True when `line` is exactly a "Mon DD, 20YY" record-start marker.
pub fn is_record_marker(line: &str) -> bool {
    RECORD_MARKER.is_match(line)
}

/// Lazy iterator of records over a line source.
///
/// Not restartable: once the underlying lines are consumed the records are gone.
pub struct Records<I> {
    lines: I,
    /// Marker that opened the next record, already pulled from `lines`
    pending: Option<String>,
    started: bool,
}

impl<I> Records<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            pending: None,
            started: false,
        }
    }

    fn next_marker(&mut self) -> Option<String> {
        if let Some(marker) = self.pending.take() {
            return Some(marker);
        }
        if self.started {
            return None;
        }
        self.started = true;
        // discard preamble
        self.lines
            .by_ref()
            .map(Into::<String>::into)
            .find(|line| is_record_marker(line))
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        let marker = self.next_marker()?;
        let mut record = RawRecord::new(vec![marker]);

        for line in self.lines.by_ref() {
            let line: String = line.into();
            if is_record_marker(&line) {
                self.pending = Some(line);
                break;
            }
            record.push(line);
        }

        // A marker always opens the record, so it is never empty here.
        Some(record)
    }
}

/// Split extracted text into records.
pub fn segment(text: &str) -> Records<std::str::Lines<'_>> {
    Records::new(text.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_exact_match() {
        assert!(is_record_marker("Jan 05, 2024"));
        assert!(is_record_marker("Dec 31, 2099"));
        assert!(!is_record_marker("Jan 5, 2024"));
        assert!(!is_record_marker("Jan 05, 1999"));
        assert!(!is_record_marker(" Jan 05, 2024"));
        assert!(!is_record_marker("Jan 05, 2024 10:30 AM"));
        assert!(!is_record_marker("Foo 05, 2024"));
    }

    #[test]
    fn test_no_marker_yields_nothing() {
        let text = "Transaction Statement\nPage 1 of 3\n10:30 AM\n";
        assert_eq!(segment(text).count(), 0);
        assert_eq!(segment("").count(), 0);
    }

    #[test]
    fn test_preamble_discarded_and_records_split() {
        let text = "Statement header\nJan 05, 2024\na\nb\nFeb 10, 2024\nc\n";
        let recs: Vec<RawRecord> = segment(text).collect();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].lines(), ["Jan 05, 2024", "a", "b"]);
        assert_eq!(recs[1].lines(), ["Feb 10, 2024", "c"]);
    }

    #[test]
    fn test_back_to_back_markers_each_start_a_record() {
        let text = "Jan 05, 2024\nJan 06, 2024\nbody\n";
        let recs: Vec<RawRecord> = segment(text).collect();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].lines(), ["Jan 05, 2024"]);
        assert_eq!(recs[1].lines(), ["Jan 06, 2024", "body"]);
    }

    #[test]
    fn test_trailing_marker_is_its_own_record() {
        let recs: Vec<RawRecord> = segment("Jan 05, 2024\nx\nMar 01, 2024").collect();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].len(), 1);
    }

    #[test]
    fn test_works_over_owned_lines() {
        let lines = vec!["noise".to_string(), "Apr 01, 2025".to_string(), "y".to_string()];
        let recs: Vec<RawRecord> = Records::new(lines.into_iter()).collect();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].line(1), Some("y"));
    }
}
