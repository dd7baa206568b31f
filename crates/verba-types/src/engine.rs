use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Upstream backend the translation API should route a request to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Google,
    DuckDuckGo,
    Yandex,
    DeepL,
}

impl Engine {
    pub const ALL: [Engine; 4] = [Engine::Google, Engine::DuckDuckGo, Engine::Yandex, Engine::DeepL];

    /// Identifier for the `engine` form field
    pub fn api_name(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::DuckDuckGo => "duckduckgo",
            Engine::Yandex => "yandex",
            Engine::DeepL => "deepl",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Engine::Google => "Google",
            Engine::DuckDuckGo => "DuckDuckGo",
            Engine::Yandex => "Yandex",
            Engine::DeepL => "DeepL",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Engine {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Engine::ALL
            .into_iter()
            .find(|engine| engine.api_name() == needle)
            .ok_or_else(|| ParseError::UnknownEngine(s.to_string()))
    }
}
