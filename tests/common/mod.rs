//! Shared test utilities and fakes.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use parking_lot::Mutex;
use qrquest::api::User;
use qrquest::config::Config;
use qrquest::scanner::{DecodeCallback, Decoder, DecoderError, ScanConfig};
use qrquest::session::{FileSessionStore, SessionStore};
use qrquest::ui::app::{App, UiCommand};
use qrquest::ui::events::{ApiEvent, AppEvent};
use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

pub fn user(email: &str, points: u64, position: Option<u32>) -> User {
    User {
        email: email.to_string(),
        points,
        position,
    }
}

/// Write `content` as a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Decoder fake -------------------------------------------------------------

#[derive(Default)]
pub struct FakeDecoderState {
    pub starts: usize,
    pub stops: usize,
    pub running: bool,
    pub callback: Option<DecodeCallback>,
    pub fail_start: Option<DecoderError>,
    pub fail_stop: Option<DecoderError>,
    pub file_result: Option<Result<String, DecoderError>>,
    pub scanned_files: Vec<PathBuf>,
}

/// Decoder whose results the test delivers by hand.
#[derive(Clone, Default)]
pub struct FakeDecoder {
    state: Arc<Mutex<FakeDecoderState>>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a camera result the way a scan thread would.
    ///
    /// Returns false when no scan is running.
    pub fn deliver(&self, outcome: Result<String, DecoderError>) -> bool {
        let callback = {
            let mut state = self.state.lock();
            state.running = false;
            state.callback.take()
        };
        match callback {
            Some(callback) => {
                callback(outcome);
                true
            }
            None => false,
        }
    }

    pub fn fail_next_start(&self, err: DecoderError) {
        self.state.lock().fail_start = Some(err);
    }

    /// Make the next `stop` report `err`; the source is still released.
    pub fn fail_next_stop(&self, err: DecoderError) {
        self.state.lock().fail_stop = Some(err);
    }

    pub fn set_file_result(&self, result: Result<String, DecoderError>) {
        self.state.lock().file_result = Some(result);
    }

    pub fn starts(&self) -> usize {
        self.state.lock().starts
    }

    pub fn stops(&self) -> usize {
        self.state.lock().stops
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    pub fn scanned_files(&self) -> Vec<PathBuf> {
        self.state.lock().scanned_files.clone()
    }
}

impl Decoder for FakeDecoder {
    fn start(&mut self, _config: &ScanConfig, on_decoded: DecodeCallback) -> Result<(), DecoderError> {
        let mut state = self.state.lock();
        if state.running {
            return Err(DecoderError::AlreadyScanning);
        }
        if let Some(err) = state.fail_start.take() {
            return Err(err);
        }
        state.starts += 1;
        state.running = true;
        state.callback = Some(on_decoded);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DecoderError> {
        let mut state = self.state.lock();
        if state.running {
            state.stops += 1;
        }
        state.running = false;
        state.callback = None;
        match state.fail_stop.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn is_scanning(&self) -> bool {
        self.state.lock().running
    }

    fn scan_file(&self, path: &Path) -> Result<String, DecoderError> {
        let mut state = self.state.lock();
        state.scanned_files.push(path.to_path_buf());
        state
            .file_result
            .clone()
            .unwrap_or(Err(DecoderError::NoCodeFound))
    }
}

// -- App harness --------------------------------------------------------------

/// An `App` wired to channels the test drives directly, in place of the
/// worker and the terminal.
pub struct Harness {
    pub app: App,
    pub commands: mpsc::Receiver<UiCommand>,
    pub events: std_mpsc::Receiver<AppEvent>,
    pub decoder: FakeDecoder,
    pub session: FileSessionStore,
    _dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let session_path = dir.path().join("session.json");
        let decoder = FakeDecoder::new();
        let (command_tx, commands) = mpsc::channel(16);
        let (event_tx, events) = std_mpsc::channel();

        let app = App::new(
            &Config::default(),
            Box::new(FileSessionStore::new(session_path.clone())),
            Box::new(decoder.clone()),
            command_tx,
            event_tx,
        );

        Self {
            app,
            commands,
            events,
            decoder,
            session: FileSessionStore::new(session_path),
            _dir: dir,
        }
    }

    /// Harness on the main screen with `email` logged in.
    pub fn logged_in(email: &str, points: u64) -> Self {
        let mut harness = Self::new();
        harness.app.open_login();
        harness.type_text(email);
        harness.app.submit_form();
        let command = harness.next_command();
        assert_eq!(
            command,
            Some(UiCommand::Login {
                email: email.to_string()
            })
        );
        harness.reply(ApiEvent::LoggedIn(Ok(user(email, points, Some(1)))));
        harness
    }

    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.app.push_char(ch);
        }
    }

    pub fn next_command(&mut self) -> Option<UiCommand> {
        self.commands.try_recv().ok()
    }

    pub fn reply(&mut self, event: ApiEvent) {
        self.app.handle_event(AppEvent::Api(event));
    }

    /// Feed every queued decoder event to the app.
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.app.handle_event(event);
        }
    }

    pub fn status_text(&self) -> Option<String> {
        self.app.status().current().map(|m| m.text.clone())
    }
}
