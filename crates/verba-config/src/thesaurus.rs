use serde::{Deserialize, Serialize};
use verba_types::Language;

fn default_enabled_languages() -> Vec<Language> {
    vec![Language::English]
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ThesaurusConfig {
    /// Languages for which a single-word translation expands into a thesaurus entry
    #[serde(default = "default_enabled_languages")]
    pub enabled_languages: Vec<Language>,
    /// WordNet dict directory; searched in the usual places when unset
    #[serde(default)]
    pub wordnet_dir: Option<String>,
}

impl Default for ThesaurusConfig {
    fn default() -> Self {
        Self {
            enabled_languages: default_enabled_languages(),
            wordnet_dir: None,
        }
    }
}
