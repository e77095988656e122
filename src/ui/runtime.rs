use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::api::GameApi;
use crate::config::Config;
use crate::scanner::Decoder;
use crate::session::SessionStore;
use crate::shutdown::ShutdownCoordinator;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::worker::run_worker;

const COMMAND_QUEUE: usize = 16;

/// Run the interactive UI until the user quits or a signal arrives.
pub fn run(
    config: &Config,
    api: Arc<dyn GameApi>,
    session: Box<dyn SessionStore>,
    scanner: Box<dyn Decoder>,
    runtime: &Handle,
) -> io::Result<()> {
    let coordinator = ShutdownCoordinator::new();
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);
    let events = EventHandler::new(tick_rate, coordinator.handle());

    let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE);
    runtime.spawn(run_worker(
        api,
        command_rx,
        events.sender(),
        coordinator.handle(),
    ));

    let signal_tx = events.sender();
    let signal_shutdown = coordinator.handle();
    runtime.spawn(async move {
        tokio::select! {
            _ = wait_for_signal() => {
                let _ = signal_tx.send(AppEvent::Shutdown);
            }
            _ = signal_shutdown.wait() => {}
        }
    });

    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(config, session, scanner, command_tx, events.sender());
    app.restore_session();

    let result = loop {
        if let Err(err) = terminal.draw(|frame| draw(frame, &app)) {
            break Err(err);
        }
        if app.should_quit() {
            break Ok(());
        }

        match events.next(tick_rate) {
            Ok(event) => app.handle_event(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break Ok(()),
        }
    };

    app.shutdown();
    coordinator.signal();
    drop(guard);
    result
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut term) = signal(SignalKind::terminate()) {
            tokio::select! {
                _ = term.recv() => tracing::info!("Received SIGTERM"),
                _ = tokio::signal::ctrl_c() => tracing::info!("Received SIGINT"),
            }
            return;
        }
    }
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Received SIGINT");
    }
}
