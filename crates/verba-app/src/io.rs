use std::io::{self, BufRead, Write};
use std::thread::JoinHandle;

use kanal::AsyncSender;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use verba_types::AppEvent;

use crate::commands::parse_line;

/// Read lines from `reader` and hand each resulting event to `emit` until
/// `:quit`, end of input, or `emit` reports that nobody is listening.
/// A parse error is reported as a message event.
pub fn read_events(
    mut reader: impl BufRead,
    cancel: &CancellationToken,
    mut prompt: impl FnMut(),
    mut emit: impl FnMut(AppEvent) -> bool,
) {
    loop {
        if cancel.is_cancelled() {
            break;
        }
        prompt();

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                tracing::debug!("End of input");
                emit(AppEvent::Quit);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Failed to read input: {e}");
                emit(AppEvent::Quit);
                break;
            }
        }

        let event = match parse_line(line.trim_end_matches(['\r', '\n'])) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => AppEvent::ShowMessage(e.to_string()),
        };

        let quit = matches!(event, AppEvent::Quit);
        if !emit(event) || quit {
            break;
        }
    }
}

/// Stdin reader on a plain thread. A blocked read must not hold up runtime
/// shutdown, so the thread is never joined.
pub fn spawn_stdin_reader(
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
    show_prompt: bool,
) -> JoinHandle<()> {
    let runtime = Handle::current();

    std::thread::spawn(move || {
        let stdin = io::stdin();
        let prompt = || {
            if show_prompt {
                print!("> ");
                let _ = io::stdout().flush();
            }
        };
        let emit = |event: AppEvent| match runtime.block_on(event_tx.send(event)) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Input channel closed: {e}");
                false
            }
        };

        read_events(stdin.lock(), &cancel, prompt, emit);
        tracing::info!("Stdin reader stopping");
    })
}
