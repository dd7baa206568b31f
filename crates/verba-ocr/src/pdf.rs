use std::panic::{self, AssertUnwindSafe};

use verba_core::preprocess::{DefaultPreprocessor, Preprocessor};

use crate::ExtractError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Plain text of every page, with page breaks turned into newlines
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractError::InvalidPdf);
    }

    // pdf-extract can panic on malformed documents
    let result = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|_| ExtractError::Pdf("document could not be parsed".to_string()))?;

    let text = result.map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(DefaultPreprocessor.process(&text))
}
