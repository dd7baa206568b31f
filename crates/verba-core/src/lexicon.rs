/// A lexical database exposing synonym sets, such as WordNet
pub trait LexicalDatabase: Send + Sync {
    /// All synsets the word (or one of its base forms) belongs to, in database order
    fn synsets(&self, word: &str) -> Result<Vec<Synset>, LexiconError>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synset {
    /// Database-specific identifier, e.g. `happy.a.01` style or an offset
    pub id: String,
    pub lemmas: Vec<Lemma>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lemma {
    pub name: String,
    /// Names of lemmas registered as direct antonyms of this one
    pub antonyms: Vec<String>,
}

impl Lemma {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            antonyms: Vec::new(),
        }
    }

    pub fn with_antonyms<I, S>(mut self, antonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.antonyms = antonyms.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("Lexical database not found: {0}")]
    NotFound(String),

    #[error("Invalid format in {file}: {reason}")]
    InvalidFormat { file: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
