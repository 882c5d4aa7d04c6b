use std::cell::Cell;

use passbook_core::extract::{ExtractError, TextExtractor};
use passbook_core::finance::Direction;
use passbook_finance::{CategoryMap, Pipeline, export_cashew_string};

const SCENARIO: &str =
    "Jan 05, 2024\n10:30 AM\nPaid to Acme Store\nT123456\nU987654\nJohn\nDEBIT\n₹1,250.00";

/// Extractor stub that records how often it was called.
struct StubExtractor {
    result: Result<String, ExtractError>,
    calls: Cell<usize>,
}

impl StubExtractor {
    fn new(result: Result<String, ExtractError>) -> Self {
        Self { result, calls: Cell::new(0) }
    }
}

impl TextExtractor for StubExtractor {
    fn extract_text(&self, _data: &[u8], _password: Option<&str>) -> Result<String, ExtractError> {
        self.calls.set(self.calls.get() + 1);
        self.result.clone()
    }
}

/// Keyword-layout record with "Paid to" payee becomes one outgoing transaction.
#[test]
fn test_keyword_scenario_end_to_end() {
    let txns = Pipeline::default().parse_text(SCENARIO);
    assert_eq!(txns.len(), 1);

    let t = &txns[0];
    assert_eq!(t.date, "2024-01-05");
    assert_eq!(t.time, "10:30 AM");
    assert_eq!(t.amount, "₹1250.00");
    assert_eq!(t.direction, Direction::Outgoing);
    assert_eq!(t.payee, "Paid to Acme Store");
    assert!(t.note.contains("TxnID: T123456"));
    assert_eq!(t.note, "TxnID: T123456, UTR: U987654");
    assert_eq!(t.category, "");
}

/// Back-to-back markers: the body-less record is dropped, the rest still parses.
#[test]
fn test_empty_bodied_record_dropped() {
    let text = format!("Jan 04, 2024\n{SCENARIO}");
    let (txns, report) = Pipeline::default().run_text(&text);
    assert_eq!(report.records, 2);
    assert_eq!(report.dropped, 1);
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].date, "2024-01-05");
}

#[test]
fn test_text_without_markers_is_empty_success() {
    let txns = Pipeline::default().parse_text("Statement for 9876543210\nNo transactions\n");
    assert!(txns.is_empty());
}

#[test]
fn test_pipeline_is_idempotent() {
    let text = format!(
        "{SCENARIO}\nFeb 01, 2024\n09:00 AM\nCREDIT\n500\nJane Doe\nTxn T9\nUTR 77\nRcvd\n"
    );
    let pipeline = Pipeline::default();
    let first = pipeline.parse_text(&text);
    let second = pipeline.parse_text(&text);
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(first[1].direction, Direction::Incoming);
    assert_eq!(first[1].amount, "₹500.00");
}

/// Extraction failure is fatal and no records are attempted.
#[test]
fn test_password_required_is_fatal() {
    let extractor = StubExtractor::new(Err(ExtractError::PasswordRequired));
    let err = Pipeline::default()
        .parse_document(&extractor, b"%PDF-1.7", None)
        .unwrap_err();
    assert_eq!(err, ExtractError::PasswordRequired);
    assert_eq!(extractor.calls.get(), 1);
}

#[test]
fn test_document_with_no_transactions_is_ok() {
    let extractor = StubExtractor::new(Ok("cover page only".to_string()));
    let (txns, report) = Pipeline::default()
        .parse_document(&extractor, b"%PDF-1.7", Some("1234"))
        .unwrap();
    assert!(txns.is_empty());
    assert_eq!(report.records, 0);
}

#[test]
fn test_document_to_csv_with_category_lookup() {
    let extractor = StubExtractor::new(Ok(SCENARIO.to_string()));
    let (txns, _) = Pipeline::default()
        .parse_document(&extractor, b"%PDF-1.7", None)
        .unwrap();

    let categories: CategoryMap = [("Paid to Acme Store", "Shopping")].into_iter().collect();
    let (csv, summary) = export_cashew_string(&txns, Some(&categories)).unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(
        csv.lines().nth(1),
        Some("05-01-2024 10:30,-1250.00,Shopping,Paid to Acme Store,\"TxnID: T123456, UTR: U987654\",")
    );
}
