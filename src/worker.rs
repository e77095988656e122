//! Runs API commands issued by the UI.
//!
//! Commands are processed one at a time, in order; each produces exactly one
//! [`ApiEvent`] posted back to the UI event loop.

use std::sync::mpsc as std_mpsc;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::GameApi;
use crate::shutdown::ShutdownHandle;
use crate::ui::app::UiCommand;
use crate::ui::events::{ApiEvent, AppEvent};

pub async fn run_worker(
    api: Arc<dyn GameApi>,
    mut commands: mpsc::Receiver<UiCommand>,
    events: std_mpsc::Sender<AppEvent>,
    shutdown: ShutdownHandle,
) {
    loop {
        let command = tokio::select! {
            _ = shutdown.wait() => break,
            command = commands.recv() => match command {
                Some(command) => command,
                None => break,
            },
        };

        let event = handle_command(api.as_ref(), command).await;
        if events.send(AppEvent::Api(event)).is_err() {
            break;
        }
    }
    tracing::debug!("API worker stopped");
}

pub async fn handle_command(api: &dyn GameApi, command: UiCommand) -> ApiEvent {
    tracing::debug!(command = command.name(), "Handling command");
    match command {
        UiCommand::Register { email } => {
            let result = api.register(&email).await;
            ApiEvent::Registered { email, result }
        }
        UiCommand::Login { email } => ApiEvent::LoggedIn(api.login(&email).await),
        UiCommand::RestoreSession { email } => {
            let result = api.user_data(&email).await;
            ApiEvent::SessionRestored { email, result }
        }
        UiCommand::RefreshUser { email } => ApiEvent::UserRefreshed(api.user_data(&email).await),
        UiCommand::SubmitScan { email, code } => {
            ApiEvent::ScanSubmitted(api.scan_qr(&email, &code).await)
        }
        UiCommand::FetchLeaderboard => ApiEvent::LeaderboardLoaded(api.leaderboard().await),
    }
}
