use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use verba_types::AppEvent;

use crate::events::event_loop;
use crate::io::spawn_stdin_reader;
use crate::state::AppState;
use crate::ui::output_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

/// Task spawning and lifecycle for interactive mode
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            channels: ChannelSet::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Event loop and output loop. Input is fed through [`input_sender`](Self::input_sender).
    pub fn spawn_tasks(&self, state: AppState) -> JoinSet<anyhow::Result<()>> {
        let mut tasks: JoinSet<anyhow::Result<()>> = JoinSet::new();

        tasks.spawn(event_loop(
            state,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.clone(),
        ));

        tasks.spawn(output_loop(
            self.channels.app_to_ui.1.clone(),
            std::io::stdout(),
            self.cancel_token.child_token(),
        ));

        let cancel = self.cancel_token.clone();
        tasks.spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    result?;
                    tracing::info!("Shutdown requested");
                    cancel.cancel();
                }
                _ = cancel.cancelled() => {}
            }
            Ok::<(), anyhow::Error>(())
        });

        tasks
    }

    pub fn spawn_stdin(&self, show_prompt: bool) {
        spawn_stdin_reader(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
            show_prompt,
        );
    }

    pub fn input_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
