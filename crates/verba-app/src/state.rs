use std::path::PathBuf;

use verba_config::Config;
use verba_core::Thesaurus;
use verba_lang_english::WordNetLoader;
use verba_ocr::ExtractError;
use verba_translator::{HttpBackend, TranslationSession};
use verba_types::{Engine, Language};

/// Everything the event loop owns: config, the translation session and the
/// current language/engine selection
pub struct AppState {
    pub config: Config,
    pub session: TranslationSession<HttpBackend>,
    pub source: Language,
    pub target: Language,
    pub engine: Engine,
    pub last_result: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let database = WordNetLoader::load(config.thesaurus.wordnet_dir.as_deref());
        Self::with_thesaurus(config, Thesaurus::new(database))
    }

    pub fn with_thesaurus(config: Config, thesaurus: Thesaurus) -> anyhow::Result<Self> {
        let backend = HttpBackend::from_config(&config.translator)?;
        let session = TranslationSession::from_config(backend, thesaurus, &config);

        Ok(Self {
            source: config.translator.from_lang,
            target: config.translator.to_lang,
            engine: config.translator.engine,
            session,
            config,
            last_result: None,
        })
    }

    /// Translate with the current selection; remembers the result for copying
    pub async fn translate(&mut self, text: &str) -> Option<String> {
        let result = self
            .session
            .translate_to_display(text, self.source, self.target, self.engine)
            .await;

        if let Some(result) = &result {
            self.last_result = Some(result.clone());
        }
        result
    }

    pub async fn extract(&self, path: PathBuf) -> Result<String, ExtractError> {
        let ocr = self.config.ocr.clone();
        let source = self.source;

        tokio::task::spawn_blocking(move || verba_ocr::extract_text(&path, source, &ocr))
            .await
            .map_err(|e| ExtractError::Io(std::io::Error::other(e)))?
    }

    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
        tracing::info!("Swapped languages: {} -> {}", self.source, self.target);
    }

    pub fn settings(&self) -> String {
        let thesaurus = self
            .session
            .thesaurus_languages()
            .iter()
            .map(Language::display_name)
            .collect::<Vec<_>>();

        format!(
            "From: {} | To: {} | Engine: {} | Thesaurus: {}",
            self.source,
            self.target,
            self.engine.display_name(),
            if thesaurus.is_empty() {
                "none".to_string()
            } else {
                thesaurus.join(", ")
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::with_thesaurus(Config::default(), Thesaurus::default()).unwrap()
    }

    #[test]
    fn selection_starts_from_config() {
        let state = state();
        assert_eq!(state.source, Language::English);
        assert_eq!(state.target, Language::Spanish);
        assert_eq!(state.engine, Engine::Google);
        assert!(state.last_result.is_none());
    }

    #[test]
    fn swap_and_settings() {
        let mut state = state();
        state.swap_languages();
        assert_eq!(
            state.settings(),
            "From: Spanish | To: English | Engine: Google | Thesaurus: English"
        );

        state.session.set_thesaurus_languages([]);
        assert!(state.settings().ends_with("Thesaurus: none"));
    }

    #[tokio::test]
    async fn empty_text_sends_nothing() {
        let mut state = state();
        assert_eq!(state.translate("").await, None);
        assert!(state.last_result.is_none());
    }
}
