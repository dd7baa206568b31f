use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use verba_types::AppEvent;

use crate::state::AppState;

pub mod extract_file;
pub mod session_command;
pub mod text_input;

use session_command::handle_session_command;
use text_input::handle_text_input;

/// App's main loop. Owns the state, so events are handled one at a time.
pub async fn event_loop(
    mut state: AppState,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");

    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", std::mem::discriminant(&event));

        if matches!(event, AppEvent::Quit) {
            app_to_ui_tx.send(AppEvent::Quit).await?;
            break;
        }

        tokio::select! {
            result = handle_events(&mut state, &app_to_ui_tx, event) => result?,
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled while handling an event");
                break;
            }
        }
    }

    tracing::info!("[EVENT_LOOP] Stopping");
    cancel.cancel();
    Ok(())
}

async fn handle_events(
    state: &mut AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::TextInput { text, source } => {
            handle_text_input(state, text, source, app_to_ui_tx).await?;
        }
        AppEvent::Command(command) => {
            handle_session_command(state, command, app_to_ui_tx).await?;
        }
        AppEvent::ShowMessage(message) => {
            // Input-side messages such as parse errors go straight to the output
            app_to_ui_tx.send(AppEvent::ShowMessage(message)).await?;
        }
        AppEvent::ShowTranslation { .. } => {
            // Output-only event
        }
        AppEvent::Quit => {}
    }

    Ok(())
}
