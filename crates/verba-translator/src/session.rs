use std::collections::BTreeSet;

use tracing::Instrument;
use uuid::Uuid;
use verba_config::Config;
use verba_core::{DEFAULT_MAX_CHARS, Thesaurus, WordChoice, chunk_text};
use verba_types::{Engine, Language};

use crate::response::{ChunkOutcome, interpret};
use crate::{TranslateError, TranslationBackend, TranslationRequest};

/// Owns everything that outlives a single translation: the backend, the
/// enabled thesaurus languages and the word choices from the last response.
pub struct TranslationSession<B> {
    backend: B,
    thesaurus: Thesaurus,
    max_chars: usize,
    thesaurus_languages: BTreeSet<Language>,
    last_word_choices: Vec<WordChoice>,
}

impl<B: TranslationBackend> TranslationSession<B> {
    pub fn new(backend: B, thesaurus: Thesaurus) -> Self {
        Self {
            backend,
            thesaurus,
            max_chars: DEFAULT_MAX_CHARS,
            thesaurus_languages: BTreeSet::from([Language::English]),
            last_word_choices: Vec::new(),
        }
    }

    pub fn from_config(backend: B, thesaurus: Thesaurus, config: &Config) -> Self {
        let mut session = Self::new(backend, thesaurus).with_max_chars(config.translator.max_chars);
        session.set_thesaurus_languages(config.thesaurus.enabled_languages.iter().copied());
        session
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars.max(1);
        self
    }

    pub fn thesaurus_languages(&self) -> &BTreeSet<Language> {
        &self.thesaurus_languages
    }

    /// Replace the enabled thesaurus languages wholesale
    pub fn set_thesaurus_languages(&mut self, languages: impl IntoIterator<Item = Language>) {
        self.thesaurus_languages = languages.into_iter().collect();
        tracing::info!("Thesaurus languages: {:?}", self.thesaurus_languages);
    }

    pub fn last_word_choices(&self) -> &[WordChoice] {
        &self.last_word_choices
    }

    pub fn lookup_thesaurus(&self, word: &str, language: Language) -> String {
        self.thesaurus.lookup(word, language, &self.last_word_choices)
    }

    /// Translate `text` chunk by chunk.
    ///
    /// Returns `Ok(None)` without sending anything when `text` is empty.
    /// Per-chunk failures are rendered inline; a 400, any other error status or
    /// a transport failure aborts the remaining chunks.
    pub async fn translate(
        &mut self,
        text: &str,
        source: Language,
        target: Language,
        engine: Engine,
    ) -> Result<Option<String>, TranslateError> {
        if text.is_empty() {
            return Ok(None);
        }

        let span = tracing::info_span!(
            "translate",
            request_id = %Uuid::new_v4(),
            from = source.api_code(),
            to = target.api_code(),
            engine = engine.api_name(),
        );

        let joined = self
            .translate_chunks(text, source, target, engine)
            .instrument(span)
            .await?;

        Ok(Some(self.post_process(joined, target)))
    }

    /// Like [`translate`](Self::translate), with a fatal error rendered as its message
    pub async fn translate_to_display(
        &mut self,
        text: &str,
        source: Language,
        target: Language,
        engine: Engine,
    ) -> Option<String> {
        match self.translate(text, source, target, engine).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Translation failed: {e}");
                Some(e.to_string())
            }
        }
    }

    async fn translate_chunks(
        &mut self,
        text: &str,
        source: Language,
        target: Language,
        engine: Engine,
    ) -> Result<String, TranslateError> {
        let chunks = chunk_text(text, self.max_chars);
        tracing::info!(
            "Translating {} chars in {} chunks via {}",
            text.chars().count(),
            chunks.len(),
            self.backend.endpoint()
        );

        let mut outcomes = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            let number = chunk.index + 1;

            // A blank-line chunk is never sent; its empty outcome keeps the break when joined
            if chunk.content.trim().is_empty() {
                tracing::debug!("Chunk {number}/{}: blank, not sent", chunks.len());
                outcomes.push(ChunkOutcome::Translated(String::new()));
                continue;
            }

            let request = TranslationRequest {
                source,
                target,
                engine,
                text: chunk.content.clone(),
            };

            tracing::debug!("Chunk {number}/{}: {} chars", chunks.len(), chunk.char_count());
            let response = self.backend.send(&request).await?;
            tracing::debug!("Chunk {number}: status {}", response.status);

            let reply = interpret(number, engine, &response)?;

            // Only the first chunk decides what the thesaurus sees
            if chunk.index == 0
                && let Some(choices) = reply.word_choices
            {
                self.last_word_choices = choices;
            }

            outcomes.push(reply.outcome);
        }

        let failed = outcomes.iter().filter(|o| !o.is_translated()).count();
        if failed > 0 {
            tracing::warn!("{failed} of {} chunks failed", outcomes.len());
        }

        Ok(outcomes
            .iter()
            .map(ChunkOutcome::as_text)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// A single-word result in an enabled language becomes a thesaurus entry
    fn post_process(&self, joined: String, target: Language) -> String {
        let trimmed = joined.trim();
        let mut tokens = trimmed.split_whitespace();

        if let (Some(_), None) = (tokens.next(), tokens.next())
            && target != Language::Chinese
            && self.thesaurus_languages.contains(&target)
        {
            tracing::debug!("Single-word result, looking up thesaurus for '{trimmed}'");
            return self.lookup_thesaurus(trimmed, target);
        }

        joined
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use verba_core::{Lemma, LexicalDatabase, LexiconError, Synset};

    use super::*;
    use crate::RawResponse;

    /// Replies from a script, or with `fallback` once the script runs out
    #[derive(Default)]
    struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<RawResponse, TranslateError>>>,
        fallback: Option<fn(&TranslationRequest) -> RawResponse>,
        requests: Mutex<Vec<TranslationRequest>>,
    }

    impl ScriptedBackend {
        fn reply(self, status: u16, body: &str) -> Self {
            self.replies.lock().unwrap().push_back(Ok(response(status, body)));
            self
        }

        fn fail(self, err: TranslateError) -> Self {
            self.replies.lock().unwrap().push_back(Err(err));
            self
        }

        fn echo() -> Self {
            Self {
                fallback: Some(|request| {
                    let body = serde_json::json!({
                        "translated-text": request.text.to_uppercase(),
                    });
                    response(200, &body.to_string())
                }),
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<TranslationRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TranslationBackend for Arc<ScriptedBackend> {
        async fn send(&self, request: &TranslationRequest) -> Result<RawResponse, TranslateError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(reply) = self.replies.lock().unwrap().pop_front() {
                return reply;
            }
            match self.fallback {
                Some(fallback) => Ok(fallback(request)),
                None => panic!("unexpected request: {request:?}"),
            }
        }

        fn endpoint(&self) -> &str {
            "scripted"
        }
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            url: "https://translate.example/api/translate".to_string(),
            body: body.to_string(),
        }
    }

    fn session(backend: &Arc<ScriptedBackend>) -> TranslationSession<Arc<ScriptedBackend>> {
        TranslationSession::new(backend.clone(), Thesaurus::default())
    }

    struct HappyLexicon;

    impl LexicalDatabase for HappyLexicon {
        fn synsets(&self, word: &str) -> Result<Vec<Synset>, LexiconError> {
            Ok(match word {
                "happy" => vec![Synset {
                    id: "happy.a.01".to_string(),
                    lemmas: vec![Lemma::new("happy").with_antonyms(["unhappy"]), Lemma::new("glad")],
                }],
                _ => Vec::new(),
            })
        }

        fn name(&self) -> &str {
            "happy"
        }
    }

    #[tokio::test]
    async fn empty_text_sends_nothing() {
        let backend = Arc::new(ScriptedBackend::default());
        let mut session = session(&backend);

        let output = session
            .translate("", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();

        assert_eq!(output, None);
        assert!(backend.sent().is_empty());
    }

    #[tokio::test]
    async fn request_carries_codes_and_engine() {
        let backend = Arc::new(ScriptedBackend::default().reply(200, r#"{"translated-text":"Guten Tag"}"#));
        let mut session = session(&backend);

        let output = session
            .translate("Good day", Language::English, Language::German, Engine::Yandex)
            .await
            .unwrap();

        assert_eq!(output.as_deref(), Some("Guten Tag"));
        assert_eq!(
            backend.sent(),
            vec![TranslationRequest {
                source: Language::English,
                target: Language::German,
                engine: Engine::Yandex,
                text: "Good day".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn bad_request_aborts_with_api_message() {
        let backend = Arc::new(
            ScriptedBackend::default().reply(400, r#"{"error":{"message":"bad language pair"}}"#),
        );
        let mut session = session(&backend).with_max_chars(10);

        let output = session
            .translate_to_display(
                "first line\nsecond line",
                Language::English,
                Language::Russian,
                Engine::Google,
            )
            .await;

        assert_eq!(output.as_deref(), Some("Error: bad language pair"));
        assert_eq!(backend.sent().len(), 1);
    }

    #[tokio::test]
    async fn malformed_chunk_is_reported_inline() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .reply(200, r#"{"translated-text":"Hola"}"#)
                .reply(200, "{not json"),
        );
        let mut session = session(&backend);
        let text = format!("{}\n{}", "a".repeat(600), "b".repeat(600));

        let output = session
            .translate(&text, Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap()
            .unwrap();

        assert!(output.starts_with("Hola\n[Chunk 2 error: "), "{output}");
        assert!(output.ends_with(']'));
        assert_eq!(backend.sent().len(), 2);
    }

    #[tokio::test]
    async fn per_chunk_failures_do_not_stop_later_chunks() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .reply(200, r#"{}"#)
                .reply(200, r#"{"translated-text":""}"#)
                .reply(200, r#"{"translated-text":"fin"}"#),
        );
        let mut session = session(&backend).with_max_chars(4);

        let output = session
            .translate("uno\ndos\ntres", Language::Spanish, Language::English, Engine::DeepL)
            .await
            .unwrap()
            .unwrap();

        let marker = "[Deepl translation failed: No result returned. Try another engine or check API status.]";
        assert_eq!(output, format!("{marker}\n{marker}\nfin"));
    }

    #[tokio::test]
    async fn server_error_aborts_remaining_chunks() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .reply(200, r#"{"translated-text":"one"}"#)
                .reply(500, "boom"),
        );
        let mut session = session(&backend).with_max_chars(3);

        let err = session
            .translate("uno\ndos\ntres", Language::Spanish, Language::English, Engine::Google)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Http { status: 500, .. }));
        assert_eq!(
            err.to_string(),
            "HTTP Error: 500 Server Error: Internal Server Error for url: https://translate.example/api/translate"
        );
        assert_eq!(backend.sent().len(), 2);
    }

    #[tokio::test]
    async fn non_object_body_aborts_remaining_chunks() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .reply(200, r#"{"translated-text":"one"}"#)
                .reply(200, "5"),
        );
        let mut session = session(&backend).with_max_chars(3);

        let output = session
            .translate_to_display("uno\ndos\ntres", Language::Spanish, Language::English, Engine::Google)
            .await;

        assert_eq!(
            output.as_deref(),
            Some("Unexpected Error: chunk 2 response is a number, not an object")
        );
        assert_eq!(backend.sent().len(), 2);
    }

    #[tokio::test]
    async fn null_translated_text_aborts() {
        let backend = Arc::new(ScriptedBackend::default().reply(200, r#"{"translated-text": null}"#));
        let mut session = session(&backend).with_max_chars(3);

        let err = session
            .translate("uno\ndos", Language::Spanish, Language::English, Engine::Google)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::Unexpected(_)));
        assert_eq!(backend.sent().len(), 1);
    }

    #[tokio::test]
    async fn blank_line_chunks_are_not_sent() {
        let backend = Arc::new(ScriptedBackend::echo());
        let mut session = session(&backend).with_max_chars(3);
        let text = format!("{}\n\n{}", "p".repeat(6), "q".repeat(7));

        let output = session
            .translate(&text, Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();

        assert_eq!(output.as_deref(), Some("PPP\nPPP\n\nQQQ\nQQQ\nQ"));
        let sent = backend.sent();
        assert_eq!(sent.len(), 5);
        assert!(sent.iter().all(|request| !request.text.trim().is_empty()), "{sent:?}");
    }

    #[tokio::test]
    async fn trailing_blank_line_is_kept_without_a_request() {
        let backend = Arc::new(ScriptedBackend::echo());
        let mut session = session(&backend).with_max_chars(3);

        let output = session
            .translate("abc\n", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();

        assert_eq!(output.as_deref(), Some("ABC\n"));
        assert_eq!(backend.sent().len(), 1);
    }

    #[tokio::test]
    async fn whitespace_only_input_sends_nothing() {
        let backend = Arc::new(ScriptedBackend::default());
        let mut session = session(&backend);

        let output = session
            .translate("\n  \n", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();

        assert_eq!(output.as_deref(), Some(""));
        assert!(backend.sent().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_aborts() {
        let backend = Arc::new(
            ScriptedBackend::default().fail(TranslateError::Request("operation timed out".to_string())),
        );
        let mut session = session(&backend);

        let output = session
            .translate_to_display("hello there", Language::English, Language::French, Engine::Google)
            .await;

        assert_eq!(output.as_deref(), Some("Request Error: operation timed out"));
    }

    #[tokio::test]
    async fn repeated_calls_are_identical() {
        let backend = Arc::new(ScriptedBackend::echo());
        let mut session = session(&backend).with_max_chars(16);
        let text = "the quick brown fox\njumps over\nthe lazy dog";

        let first = session
            .translate(text, Language::English, Language::Italian, Engine::Google)
            .await
            .unwrap();
        let second = session
            .translate(text, Language::English, Language::Italian, Engine::Google)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.as_deref(),
            Some("THE QUICK BROWN \nFOX\nJUMPS OVER\nTHE LAZY DOG")
        );
    }

    #[tokio::test]
    async fn word_choices_come_from_first_chunk_only() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .reply(200, r#"{"translated-text":"a","word_choices":[{"word":"uno"}]}"#)
                .reply(200, r#"{"translated-text":"b","word_choices":[{"word":"dos"}]}"#)
                .reply(200, r#"{"translated-text":"c"}"#),
        );
        let mut session = session(&backend).with_max_chars(1);

        session
            .translate("x\ny\nz", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();

        assert_eq!(session.last_word_choices(), &[WordChoice::new("uno")]);
    }

    #[tokio::test]
    async fn first_chunk_without_choices_clears_them() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .reply(200, r#"{"translated-text":"a","word_choices":[{"word":"uno"}]}"#)
                .reply(200, r#"{"translated-text":"b"}"#),
        );
        let mut session = session(&backend);

        session
            .translate("x", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();
        assert_eq!(session.last_word_choices().len(), 1);

        session
            .translate("y", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();
        assert!(session.last_word_choices().is_empty());
    }

    #[tokio::test]
    async fn failed_first_chunk_leaves_choices_stale() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .reply(200, r#"{"translated-text":"a","word_choices":[{"word":"uno"}]}"#)
                .reply(200, "garbage"),
        );
        let mut session = session(&backend);

        session
            .translate("x", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();
        session
            .translate("y", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();

        assert_eq!(session.last_word_choices(), &[WordChoice::new("uno")]);
    }

    #[tokio::test]
    async fn single_english_word_becomes_thesaurus_entry() {
        let backend = Arc::new(ScriptedBackend::default().reply(200, r#"{"translated-text":" happy "}"#));
        let thesaurus = Thesaurus::new(Some(Arc::new(HappyLexicon)));
        let mut session = TranslationSession::new(backend.clone(), thesaurus);

        let output = session
            .translate("feliz", Language::Spanish, Language::English, Engine::Google)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            output,
            "Thesaurus for 'happy' (English):\nSynonyms: happy, glad\nAntonyms: unhappy"
        );
    }

    #[tokio::test]
    async fn thesaurus_only_for_enabled_languages() {
        let body = r#"{"translated-text":"feliz","word_choices":[{"word":"feliz"},{"word":"contento"}]}"#;
        let backend = Arc::new(ScriptedBackend::default().reply(200, body).reply(200, body));
        let mut session = session(&backend);

        let plain = session
            .translate("happy", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();
        assert_eq!(plain.as_deref(), Some("feliz"));

        session.set_thesaurus_languages([Language::Spanish]);
        let expanded = session
            .translate("happy", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();
        assert_eq!(
            expanded.as_deref(),
            Some("Thesaurus for 'feliz' (Spanish):\nSynonyms: feliz, contento\nNo antonyms found.")
        );
    }

    #[tokio::test]
    async fn chinese_never_gets_thesaurus() {
        let backend = Arc::new(ScriptedBackend::default().reply(200, r#"{"translated-text":"快乐"}"#));
        let mut session = session(&backend);
        session.set_thesaurus_languages(Language::ALL);

        let output = session
            .translate("happy", Language::English, Language::Chinese, Engine::Google)
            .await
            .unwrap();

        assert_eq!(output.as_deref(), Some("快乐"));
    }

    #[tokio::test]
    async fn config_sets_limit_and_languages() {
        let backend = Arc::new(ScriptedBackend::echo());
        let mut config = Config::default();
        config.translator.max_chars = 2;
        config.thesaurus.enabled_languages = vec![Language::French, Language::German];

        let mut session = TranslationSession::from_config(backend.clone(), Thesaurus::default(), &config);
        session
            .translate("abcde", Language::English, Language::Spanish, Engine::Google)
            .await
            .unwrap();

        assert_eq!(backend.sent().len(), 3);
        assert_eq!(
            session.thesaurus_languages().iter().copied().collect::<Vec<_>>(),
            vec![Language::French, Language::German]
        );
    }
}
