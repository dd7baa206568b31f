use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_tesseract_path() -> String {
    "tesseract".to_string()
}

/// Fully automatic page segmentation, no OSD
fn default_page_segmentation_mode() -> u8 {
    3
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: String,
    #[serde(default = "default_page_segmentation_mode")]
    pub page_segmentation_mode: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            tesseract_path: default_tesseract_path(),
            page_segmentation_mode: default_page_segmentation_mode(),
        }
    }
}
