pub mod engine;
pub mod language;
pub mod types;

pub use engine::Engine;
pub use language::Language;
pub use types::{AppEvent, SessionCommand, TextSource};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown engine: {0}")]
    UnknownEngine(String),
}
