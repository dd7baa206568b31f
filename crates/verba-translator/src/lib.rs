pub mod backend;
pub mod response;
pub mod session;

pub use backend::{HttpBackend, RawResponse, TranslationBackend};
pub use response::ChunkOutcome;
pub use session::TranslationSession;

use verba_types::{Engine, Language};

/// One chunk's worth of work for the translation API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source: Language,
    pub target: Language,
    pub engine: Engine,
    pub text: String,
}

/// Failures that abort a whole translation. The display text is what the user sees.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Error: {0}")]
    BadRequest(String),

    #[error("HTTP Error: {status} {reason} for url: {url}")]
    Http {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Request Error: {0}")]
    Request(String),

    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            tracing::warn!("Translation request timed out: {e}");
        }
        TranslateError::Request(e.to_string())
    }
}
