use std::path::PathBuf;

use crate::{Engine, Language};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Text to translate with the current session settings
    TextInput { text: String, source: TextSource },
    Command(SessionCommand),
    /// Result ready for display
    ShowTranslation { text: String, from: Language, to: Language },
    ShowMessage(String),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Manual,
    File,
    Clipboard,
}

/// Actions a user can take in an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    SetSource(Language),
    SetTarget(Language),
    SetEngine(Engine),
    SwapLanguages,
    ExtractFile(PathBuf),
    TranslateClipboard,
    CopyResult,
    /// Replaces the enabled thesaurus languages wholesale
    SetThesaurusLanguages(Vec<Language>),
    Thesaurus(String),
    ShowSettings,
    Help,
}
