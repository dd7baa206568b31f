use serde::{Deserialize, Serialize};
use verba_types::{Engine, Language};

fn default_engine() -> Engine {
    Engine::Google
}

fn default_from_lang() -> Language {
    Language::English
}

fn default_to_lang() -> Language {
    Language::Spanish
}

fn default_api_url() -> String {
    "https://translate.librenode.com/api/translate".to_string()
}

/// Characters per request accepted by the translation API
fn default_max_chars() -> usize {
    1000
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_engine")]
    pub engine: Engine,
    #[serde(default = "default_from_lang")]
    pub from_lang: Language,
    #[serde(default = "default_to_lang")]
    pub to_lang: Language,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            api_url: default_api_url(),
            max_chars: default_max_chars(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
