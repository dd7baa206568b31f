use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Languages offered for translation, OCR and thesaurus lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Russian,
    Chinese,
    Italian,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Russian,
        Language::Chinese,
        Language::Italian,
    ];

    /// ISO 639-1 code sent to the translation API
    pub fn api_code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Russian => "ru",
            Language::Chinese => "zh",
            Language::Italian => "it",
        }
    }

    /// Tesseract traineddata name(s)
    pub fn ocr_code(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Spanish => "spa",
            Language::French => "fra",
            Language::German => "deu",
            Language::Russian => "rus",
            // Simplified and traditional together
            Language::Chinese => "chi_sim+chi_tra",
            Language::Italian => "ita",
        }
    }

    /// Lower-case name, used in config files and commands
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
            Language::Russian => "russian",
            Language::Chinese => "chinese",
            Language::Italian => "italian",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Russian => "Russian",
            Language::Chinese => "Chinese",
            Language::Italian => "Italian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    /// Accepts either the language name or its API code, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.name() == needle || lang.api_code() == needle)
            .ok_or_else(|| ParseError::UnknownLanguage(s.to_string()))
    }
}
