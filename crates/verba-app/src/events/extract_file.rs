use std::path::PathBuf;

use kanal::AsyncSender;
use verba_types::{AppEvent, TextSource};

use super::text_input::handle_text_input;
use crate::state::AppState;

/// Extract text from an image or PDF, show it, then translate it
pub async fn handle_file_extraction(
    state: &mut AppState,
    path: PathBuf,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("Extracting text from {}", path.display());

    let text = match state.extract(path).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Extraction failed: {e}");
            app_to_ui_tx.send(AppEvent::ShowMessage(e.user_message())).await?;
            return Ok(());
        }
    };

    if text.is_empty() {
        app_to_ui_tx
            .send(AppEvent::ShowMessage("No text found in file".to_string()))
            .await?;
        return Ok(());
    }

    app_to_ui_tx
        .send(AppEvent::ShowMessage(format!("Extracted text:\n{text}")))
        .await?;

    handle_text_input(state, text, TextSource::File, app_to_ui_tx).await
}
