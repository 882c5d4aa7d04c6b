//! Statement pipeline: text -> records -> statement transactions -> canonical transactions.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use passbook_core::extract::{ExtractError, TextExtractor};
use passbook_core::finance::CanonicalTransaction;
use passbook_ingest::{ParserRegistry, segment};

use crate::normalizer::normalize;

/// Counts from one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Records produced by segmentation
    pub records: usize,
    /// Records accepted, per layout
    pub matched: BTreeMap<&'static str, usize>,
    /// Records no layout accepted
    pub dropped: usize,
}

impl RunReport {
    pub fn matched_total(&self) -> usize {
        self.matched.values().sum()
    }
}

/// Holds the layout registry; no state survives between runs.
#[derive(Default)]
pub struct Pipeline {
    registry: ParserRegistry,
}

impl Pipeline {
    pub fn new(registry: ParserRegistry) -> Self {
        Self { registry }
    }

    /// Parse already-extracted text, keeping source order.
    pub fn run_text(&self, text: &str) -> (Vec<CanonicalTransaction>, RunReport) {
        let mut report = RunReport::default();
        let mut out = Vec::new();

        for record in segment(text) {
            report.records += 1;
            match self.registry.parse(&record) {
                Some((layout, txn)) => {
                    debug!(layout, date = %txn.date, "record matched");
                    *report.matched.entry(layout).or_insert(0) += 1;
                    out.push(normalize(&txn));
                }
                None => report.dropped += 1,
            }
        }

        info!(
            "Parsed {} transactions from {} records ({} dropped)",
            out.len(),
            report.records,
            report.dropped
        );
        if out.is_empty() {
            warn!("No transactions found in statement text");
        }

        (out, report)
    }

    pub fn parse_text(&self, text: &str) -> Vec<CanonicalTransaction> {
        self.run_text(text).0
    }

    /// Extract and parse a whole document. Extraction failure aborts the run;
    /// zero parsed transactions is still `Ok`.
    pub fn parse_document(
        &self,
        extractor: &dyn TextExtractor,
        data: &[u8],
        password: Option<&str>,
    ) -> Result<(Vec<CanonicalTransaction>, RunReport), ExtractError> {
        let text = extractor.extract_text(data, password)?;
        info!("Extracted text length: {} characters", text.chars().count());
        Ok(self.run_text(&text))
    }
}
