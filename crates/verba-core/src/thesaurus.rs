use std::fmt;
use std::sync::Arc;

use verba_types::Language;

use crate::lexicon::LexicalDatabase;

const UNSUPPORTED_NOTE: &str =
    "(Thesaurus is only available for English or when supported by the translation API.)";

/// Alternative translation offered by the translation API alongside its main result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordChoice {
    pub word: Option<String>,
}

impl WordChoice {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: Some(word.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThesaurusEntry {
    pub word: String,
    pub language: Language,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub note: Option<&'static str>,
}

impl fmt::Display for ThesaurusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thesaurus for '{}' ({}):", self.word, self.language)?;

        if self.synonyms.is_empty() {
            write!(f, "\nNo synonyms found.")?;
        } else {
            write!(f, "\nSynonyms: {}", self.synonyms.join(", "))?;
        }

        if self.antonyms.is_empty() {
            write!(f, "\nNo antonyms found.")?;
        } else {
            write!(f, "\nAntonyms: {}", self.antonyms.join(", "))?;
        }

        if let Some(note) = self.note {
            write!(f, "\n{note}")?;
        }

        Ok(())
    }
}

/// Synonym/antonym lookup. English goes through the lexical database, other
/// languages fall back to the word choices returned with the last translation.
#[derive(Clone, Default)]
pub struct Thesaurus {
    database: Option<Arc<dyn LexicalDatabase>>,
}

impl Thesaurus {
    pub fn new(database: Option<Arc<dyn LexicalDatabase>>) -> Self {
        Self { database }
    }

    /// Formatted entry for `word`; never fails
    pub fn lookup(&self, word: &str, language: Language, word_choices: &[WordChoice]) -> String {
        self.entry(word, language, word_choices).to_string()
    }

    pub fn entry(&self, word: &str, language: Language, word_choices: &[WordChoice]) -> ThesaurusEntry {
        let mut entry = ThesaurusEntry {
            word: word.to_string(),
            language,
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            note: None,
        };

        if language == Language::English {
            self.fill_from_database(&mut entry);
        } else if !word_choices.is_empty() {
            entry.synonyms = word_choices
                .iter()
                .filter_map(|choice| choice.word.as_deref())
                .filter(|word| !word.is_empty())
                .map(str::to_string)
                .collect();
        } else {
            entry.note = Some(UNSUPPORTED_NOTE);
        }

        entry
    }

    fn fill_from_database(&self, entry: &mut ThesaurusEntry) {
        let Some(database) = &self.database else {
            tracing::warn!("No lexical database loaded, skipping thesaurus lookup");
            return;
        };

        let synsets = match database.synsets(&entry.word) {
            Ok(synsets) => synsets,
            Err(e) => {
                tracing::warn!("{} lookup for '{}' failed: {}", database.name(), entry.word, e);
                return;
            }
        };

        for synset in &synsets {
            for lemma in &synset.lemmas {
                push_unique(&mut entry.synonyms, &lemma.name);
                for antonym in &lemma.antonyms {
                    push_unique(&mut entry.antonyms, antonym);
                }
            }
        }

        tracing::debug!(
            "'{}': {} synsets, {} synonyms, {} antonyms",
            entry.word,
            synsets.len(),
            entry.synonyms.len(),
            entry.antonyms.len()
        );
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    let name = name.to_lowercase();
    if !list.contains(&name) {
        list.push(name);
    }
}
