//! Document text extraction seam.
//!
//! The pipeline never reads documents itself; it asks a `TextExtractor` for
//! the full text and treats any failure as fatal for the run.

use thiserror::Error;

/// Conditions reported by a document text extractor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The document is encrypted and the password is missing or wrong.
    #[error("password required or incorrect password")]
    PasswordRequired,

    /// The document could not be read or its text could not be extracted.
    #[error("failed to extract text: {0}")]
    ExtractionFailed(String),
}

/// Anything that can turn raw document bytes into plain text.
pub trait TextExtractor {
    fn extract_text(&self, data: &[u8], password: Option<&str>) -> Result<String, ExtractError>;
}

/// Plain UTF-8 documents: the bytes already are the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, data: &[u8], _password: Option<&str>) -> Result<String, ExtractError> {
        String::from_utf8(data.to_vec()).map_err(|e| ExtractError::ExtractionFailed(e.to_string()))
    }
}
