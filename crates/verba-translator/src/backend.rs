use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use verba_config::translator::TranslatorConfig;

use crate::{TranslateError, TranslationRequest};

/// Status and body of one translation API call, before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

/// Transport to the translation API
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Send a single chunk. Only transport failures are errors here,
    /// any HTTP status comes back as a response.
    async fn send(&self, request: &TranslationRequest) -> Result<RawResponse, TranslateError>;

    fn endpoint(&self) -> &str;
}

/// Form-encoded POST against a translation API such as translate.librenode.com
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
}

impl HttpBackend {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslateError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_url })
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

#[async_trait]
impl TranslationBackend for HttpBackend {
    async fn send(&self, request: &TranslationRequest) -> Result<RawResponse, TranslateError> {
        let params = [
            ("from", request.source.api_code()),
            ("to", request.target.api_code()),
            ("engine", request.engine.api_name()),
            ("text", request.text.as_str()),
        ];

        tracing::debug!(
            "POST {} with payload length {}",
            self.api_url,
            request.text.chars().count()
        );

        let response = self
            .client
            .post(&self.api_url)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;

        tracing::debug!(
            "Response {status}: {}",
            body.chars().take(500).collect::<String>()
        );

        Ok(RawResponse { status, url, body })
    }

    fn endpoint(&self) -> &str {
        &self.api_url
    }
}
