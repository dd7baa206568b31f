use kanal::AsyncSender;
use verba_types::{AppEvent, SessionCommand, TextSource};

use super::extract_file::handle_file_extraction;
use super::text_input::handle_text_input;
use crate::commands::HELP;
use crate::state::AppState;

pub async fn handle_session_command(
    state: &mut AppState,
    command: SessionCommand,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let message = match command {
        SessionCommand::SetSource(language) => {
            state.source = language;
            format!("Source language: {language}")
        }
        SessionCommand::SetTarget(language) => {
            state.target = language;
            format!("Target language: {language}")
        }
        SessionCommand::SetEngine(engine) => {
            state.engine = engine;
            format!("Engine: {engine}")
        }
        SessionCommand::SwapLanguages => {
            state.swap_languages();
            format!("From {} to {}", state.source, state.target)
        }
        SessionCommand::SetThesaurusLanguages(languages) => {
            state.session.set_thesaurus_languages(languages);
            state.settings()
        }
        SessionCommand::Thesaurus(word) => state.session.lookup_thesaurus(&word, state.target),
        SessionCommand::CopyResult => copy_last_result(state).await,
        SessionCommand::TranslateClipboard => match clipboard_input(read_clipboard().await) {
            Ok(text) => {
                return handle_text_input(state, text, TextSource::Clipboard, app_to_ui_tx).await;
            }
            Err(message) => message,
        },
        SessionCommand::ShowSettings => state.settings(),
        SessionCommand::Help => HELP.to_string(),
        SessionCommand::ExtractFile(path) => {
            return handle_file_extraction(state, path, app_to_ui_tx).await;
        }
    };

    app_to_ui_tx.send(AppEvent::ShowMessage(message)).await?;
    Ok(())
}

pub async fn read_clipboard() -> anyhow::Result<Option<String>> {
    tokio::task::spawn_blocking(verba_io::read_text).await?
}

/// Clipboard text to translate, or the message to show instead
pub fn clipboard_input(read: anyhow::Result<Option<String>>) -> Result<String, String> {
    match read {
        Ok(Some(text)) => Ok(text),
        Ok(None) => Err("Clipboard is empty".to_string()),
        Err(e) => {
            tracing::warn!("Clipboard read failed: {e:#}");
            Err(format!("Clipboard error: {e}"))
        }
    }
}

async fn copy_last_result(state: &AppState) -> String {
    let Some(result) = state.last_result.clone().filter(|r| !r.is_empty()) else {
        return "Nothing to copy yet".to_string();
    };

    match tokio::task::spawn_blocking(move || verba_io::copy_text(&result)).await {
        Ok(Ok(())) => "Copied translation to clipboard".to_string(),
        Ok(Err(e)) => {
            tracing::warn!("Clipboard write failed: {e:#}");
            format!("Clipboard error: {e}")
        }
        Err(e) => format!("Clipboard error: {e}"),
    }
}
