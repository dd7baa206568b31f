use std::io::Write;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use verba_types::AppEvent;

/// Text printed for an output event, if any
pub fn render(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::ShowTranslation { text, from, to } => Some(format!("[{from} -> {to}]\n{text}")),
        AppEvent::ShowMessage(message) => Some(message.clone()),
        _ => None,
    }
}

/// Writes results to `out` until `Quit` arrives or the token is cancelled.
/// Events already queued are written before a cancellation is noticed.
pub async fn output_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    mut out: impl Write,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            biased;
            event = app_to_ui_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        if matches!(event, AppEvent::Quit) {
            break;
        }

        match render(&event) {
            Some(text) => {
                writeln!(out, "{text}")?;
                out.flush()?;
            }
            None => tracing::debug!("Nothing to show for {:?}", event),
        }
    }

    tracing::info!("Output loop stopping");
    Ok(())
}
