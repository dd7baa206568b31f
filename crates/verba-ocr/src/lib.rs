mod ocr;
mod pdf;

use std::path::Path;

use verba_config::ocr::OcrConfig;
use verba_types::Language;

pub use ocr::{recognize, to_rgb_png};
pub use pdf::extract_pdf_text;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("OCR is disabled")]
    OcrDisabled,

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Invalid PDF file: missing %PDF header")]
    InvalidPdf,

    #[error("Failed to extract PDF text: {0}")]
    Pdf(String),
}

impl ExtractError {
    /// Message shown in place of a result
    pub fn user_message(&self) -> String {
        match self {
            ExtractError::UnsupportedFormat => self.to_string(),
            other => format!("Error processing file: {other}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Image,
    Pdf,
}

fn file_kind(path: &Path) -> Option<FileKind> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "png" | "jpg" | "jpeg" => Some(FileKind::Image),
        "pdf" => Some(FileKind::Pdf),
        _ => None,
    }
}

/// Text content of an image (through OCR) or a PDF, picked by file extension
pub fn extract_text(
    path: &Path,
    language: Language,
    config: &OcrConfig,
) -> Result<String, ExtractError> {
    let Some(kind) = file_kind(path) else {
        tracing::warn!("Unsupported file: {}", path.display());
        return Err(ExtractError::UnsupportedFormat);
    };

    tracing::info!("Extracting text from {} ({:?})", path.display(), kind);

    let bytes = std::fs::read(path)?;
    let text = match kind {
        FileKind::Image => {
            if !config.enabled {
                return Err(ExtractError::OcrDisabled);
            }
            let png = to_rgb_png(&bytes)?;
            recognize(&png, language, config)?
        }
        FileKind::Pdf => extract_pdf_text(&bytes)?,
    };

    tracing::debug!("Extracted {} chars from {}", text.chars().count(), path.display());
    Ok(text)
}
