use std::env;

use serde::{Deserialize, Serialize};

use self::ocr::OcrConfig;
use self::thesaurus::ThesaurusConfig;
use self::translator::TranslatorConfig;

pub mod ocr;
pub mod thesaurus;
pub mod translator;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub ocr: OcrConfig,
    pub thesaurus: ThesaurusConfig,
}

impl Config {
    /// Defaults with overrides from the process environment
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults with overrides from `lookup`, keyed by environment variable name
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(url) = lookup("TRANSLATE_API_URL") {
            config.translator.api_url = url;
        }

        if let Some(timeout) = lookup("TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            config.translator.timeout_seconds = timeout;
        }

        if let Some(max_chars) = lookup("MAX_CHARS")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
        {
            config.translator.max_chars = max_chars;
        }

        if let Some(path) = lookup("TESSERACT_PATH") {
            config.ocr.tesseract_path = path;
        }

        if let Some(dir) = lookup("WORDNET_DIR") {
            config.thesaurus.wordnet_dir = Some(dir);
        }

        config
    }
}
