//! PDF text extraction using lopdf (decryption) and pdf-extract (text).

use lopdf::encryption::DecryptionError;
use lopdf::{Document, Object, dictionary};
use tracing::debug;

use passbook_core::extract::{ExtractError, TextExtractor};

/// Extracts the full text of a possibly password-protected PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Decrypt if needed and return bytes pdf-extract can read.
    fn unlock(&self, data: &[u8], password: Option<&str>) -> Result<Vec<u8>, ExtractError> {
        let mut doc =
            Document::load_mem(data).map_err(|e| ExtractError::ExtractionFailed(e.to_string()))?;

        if !doc.is_encrypted() {
            return Ok(data.to_vec());
        }

        add_rc4_crypt_filter(&mut doc);

        // Owner-only encryption opens with the empty user password.
        match doc.decrypt(password.unwrap_or("")) {
            Ok(()) => {}
            Err(lopdf::Error::Decryption(DecryptionError::IncorrectPassword)) => {
                return Err(ExtractError::PasswordRequired);
            }
            Err(e) => return Err(ExtractError::ExtractionFailed(e.to_string())),
        }
        debug!("Decrypted PDF ({} pages)", doc.get_pages().len());

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| ExtractError::ExtractionFailed(format!("failed to save decrypted PDF: {e}")))?;
        Ok(decrypted)
    }
}

/// `Document::decrypt` reads the cipher from `/CF/StdCF/CFM`, which only V4
/// encryption dictionaries carry. V1/V2 documents are plain RC4, so give them
/// the equivalent `/V2` filter entry.
fn add_rc4_crypt_filter(doc: &mut Document) {
    let Ok(id) = doc.trailer.get(b"Encrypt").and_then(Object::as_reference) else {
        return;
    };
    let Ok(dict) = doc.get_object_mut(id).and_then(Object::as_dict_mut) else {
        return;
    };
    let legacy = matches!(dict.get(b"V").and_then(Object::as_i64), Ok(1..=2) | Err(_));
    if legacy && !dict.has(b"CF") {
        dict.set("CF", dictionary! { "StdCF" => dictionary! { "CFM" => "V2" } });
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, data: &[u8], password: Option<&str>) -> Result<String, ExtractError> {
        let readable = self.unlock(data, password)?;
        pdf_extract::extract_text_from_mem(&readable)
            .map_err(|e| ExtractError::ExtractionFailed(e.to_string()))
    }
}
