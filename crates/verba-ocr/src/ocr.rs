use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

use image::{DynamicImage, ImageFormat};
use verba_config::ocr::OcrConfig;
use verba_core::preprocess::{DefaultPreprocessor, Preprocessor};
use verba_types::Language;

use crate::ExtractError;

/// Decode an image and re-encode it as an RGB PNG, which tesseract reads reliably
pub fn to_rgb_png(bytes: &[u8]) -> Result<Vec<u8>, ExtractError> {
    let mut image = image::load_from_memory(bytes)?;
    if image.color().has_alpha() {
        image = DynamicImage::ImageRgb8(image.to_rgb8());
    }

    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}

/// Run the tesseract CLI over PNG bytes
pub fn recognize(png: &[u8], language: Language, config: &OcrConfig) -> Result<String, ExtractError> {
    tracing::debug!(
        "Running {} for {} ({} bytes)",
        config.tesseract_path,
        language.ocr_code(),
        png.len()
    );

    let mut child = Command::new(&config.tesseract_path)
        .args(["stdin", "stdout", "-l", language.ocr_code(), "--psm"])
        .arg(config.page_segmentation_mode.to_string())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ExtractError::Ocr(format!("failed to run {}: {e}", config.tesseract_path)))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| ExtractError::Ocr("tesseract stdin unavailable".to_string()))?;
    let input = png.to_vec();
    let writer = std::thread::spawn(move || stdin.write_all(&input));

    let output = child.wait_with_output()?;

    match writer.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!("Writing image to tesseract failed: {e}"),
        Err(_) => tracing::warn!("Tesseract stdin writer panicked"),
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractError::Ocr(stderr.trim().to_string()));
    }

    let text = DefaultPreprocessor.process(&String::from_utf8_lossy(&output.stdout));
    tracing::debug!("OCR produced {} chars", text.chars().count());
    Ok(text)
}
