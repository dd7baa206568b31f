use kanal::AsyncSender;
use verba_types::{AppEvent, TextSource};

use crate::state::AppState;

pub async fn handle_text_input(
    state: &mut AppState,
    text: String,
    source: TextSource,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!("TextInput from {:?}: {} chars", source, text.chars().count());
    let (from, to) = (state.source, state.target);

    match state.translate(&text).await {
        Some(result) => {
            app_to_ui_tx
                .send(AppEvent::ShowTranslation {
                    text: result,
                    from,
                    to,
                })
                .await?;
        }
        None => tracing::debug!("Empty input, nothing sent"),
    }

    Ok(())
}
