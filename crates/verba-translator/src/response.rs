use serde_json::Value;
use verba_core::WordChoice;
use verba_types::Engine;

use crate::{RawResponse, TranslateError};

const DEEPL_FAILED: &str =
    "[Deepl translation failed: No result returned. Try another engine or check API status.]";

/// Result of a single chunk. Failures here are shown inline and do not stop
/// the remaining chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    Translated(String),
    Failed(String),
}

impl ChunkOutcome {
    pub fn as_text(&self) -> &str {
        match self {
            ChunkOutcome::Translated(text) | ChunkOutcome::Failed(text) => text,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, ChunkOutcome::Translated(_))
    }
}

#[derive(Debug)]
pub(crate) struct ChunkReply {
    pub outcome: ChunkOutcome,
    /// Present only for a successful translation; empty when the API sent none
    pub word_choices: Option<Vec<WordChoice>>,
}

impl ChunkReply {
    fn failed(marker: String) -> Self {
        Self {
            outcome: ChunkOutcome::Failed(marker),
            word_choices: None,
        }
    }
}

/// Turn a raw response for chunk `number` (1-based) into its outcome.
///
/// HTTP 400, any other non-2xx status and a JSON body of the wrong shape are
/// fatal for the whole translation.
pub(crate) fn interpret(
    number: usize,
    engine: Engine,
    response: &RawResponse,
) -> Result<ChunkReply, TranslateError> {
    if response.status == 400 {
        return Err(TranslateError::BadRequest(bad_request_message(&response.body)));
    }

    if !(200..300).contains(&response.status) {
        let reason = reqwest::StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status");
        return Err(TranslateError::Http {
            status: response.status,
            reason: format!("{}: {reason}", status_class(response.status)),
            url: response.url.clone(),
        });
    }

    let json: Value = match serde_json::from_str(&response.body) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Chunk {number}: response is not JSON: {e}");
            return Ok(ChunkReply::failed(format!("[Chunk {number} error: {e}]")));
        }
    };

    let Some(object) = json.as_object() else {
        return Err(TranslateError::Unexpected(format!(
            "chunk {number} response is {}, not an object",
            kind(&json)
        )));
    };

    let translated = object.get("translated-text");

    if engine == Engine::DeepL && !is_truthy(translated) {
        return Ok(ChunkReply::failed(DEEPL_FAILED.to_string()));
    }

    match translated {
        Some(Value::String(text)) => Ok(ChunkReply {
            outcome: ChunkOutcome::Translated(text.clone()),
            word_choices: Some(word_choices(&json)),
        }),
        Some(other) => Err(TranslateError::Unexpected(format!(
            "chunk {number} translated-text is {}, not a string",
            kind(other)
        ))),
        None => {
            tracing::warn!("Chunk {number}: no translated-text in response");
            Ok(ChunkReply::failed(format!(
                "[Chunk {number} failed: Unexpected response format]"
            )))
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn status_class(status: u16) -> &'static str {
    match status {
        400..=499 => "Client Error",
        500..=599 => "Server Error",
        _ => "Unexpected Status",
    }
}

/// `error.message` from a 400 body, or the start of the body when it is not JSON
fn bad_request_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("error").and_then(|e| e.get("message")) {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => "Unknown error".to_string(),
        },
        Err(_) => body.chars().take(100).collect(),
    }
}

fn word_choices(json: &Value) -> Vec<WordChoice> {
    json.get("word_choices")
        .and_then(Value::as_array)
        .map(|choices| {
            choices
                .iter()
                .map(|choice| WordChoice {
                    word: choice
                        .get("word")
                        .and_then(Value::as_str)
                        .filter(|w| !w.is_empty())
                        .map(str::to_string),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Falsy values are absent, null, false, zero and empty strings, arrays or objects
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}
