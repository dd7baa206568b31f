use std::path::PathBuf;
use std::sync::Arc;

use verba_core::LexicalDatabase;

use crate::wordnet::WordNet;

const SYSTEM_DIRS: &[&str] = &[
    "/usr/share/nltk_data/corpora/wordnet",
    "/usr/share/wordnet",
    "/usr/local/share/wordnet",
];

pub struct WordNetLoader;

impl WordNetLoader {
    /// Locate a WordNet directory: the configured path, then `WORDNET_DIR`,
    /// then the usual NLTK and system install locations.
    pub fn find_dir(configured: Option<&str>) -> Option<PathBuf> {
        let env_dir = std::env::var("WORDNET_DIR").ok();
        let home = std::env::var("HOME").ok();

        candidates(configured, env_dir.as_deref(), home.as_deref())
            .into_iter()
            .find(|dir| dir.is_dir())
    }

    /// Open WordNet if one can be found. The thesaurus degrades to
    /// "not found" results without it, so failure is only logged.
    pub fn load(configured: Option<&str>) -> Option<Arc<dyn LexicalDatabase>> {
        let Some(dir) = Self::find_dir(configured) else {
            tracing::warn!("WordNet data not found, English thesaurus lookups will be empty");
            return None;
        };

        match WordNet::open(&dir) {
            Ok(wordnet) => Some(Arc::new(wordnet)),
            Err(e) => {
                tracing::warn!("Failed to open WordNet at {}: {}", dir.display(), e);
                None
            }
        }
    }
}

fn candidates(configured: Option<&str>, env_dir: Option<&str>, home: Option<&str>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    dirs.extend(configured.filter(|d| !d.is_empty()).map(PathBuf::from));
    dirs.extend(env_dir.filter(|d| !d.is_empty()).map(PathBuf::from));
    if let Some(home) = home.filter(|h| !h.is_empty()) {
        dirs.push(PathBuf::from(home).join("nltk_data/corpora/wordnet"));
    }
    dirs.extend(SYSTEM_DIRS.iter().map(PathBuf::from));

    dirs
}
