use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::api::{validate_email, ApiError, LeaderboardEntry, Registration, ScanResult, User};
use crate::config::Config;
use crate::scanner::{Decoder, DecoderError, ScanConfig};
use crate::session::SessionStore;
use crate::ui::events::{ApiEvent, AppEvent};
use crate::ui::input::handle_key;
use crate::ui::mvi::Reducer;
use crate::ui::scan::{ScanIntent, ScanMode, ScanReducer, ScanState};
use crate::ui::screen::{Screen, ScreenIntent, ScreenReducer, ScreenState};
use crate::ui::status::{Severity, StatusLine};

/// Requests the UI hands to the API worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Register { email: String },
    Login { email: String },
    RestoreSession { email: String },
    RefreshUser { email: String },
    SubmitScan { email: String, code: String },
    FetchLeaderboard,
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            UiCommand::Register { .. } => "register",
            UiCommand::Login { .. } => "login",
            UiCommand::RestoreSession { .. } => "restore_session",
            UiCommand::RefreshUser { .. } => "refresh_user",
            UiCommand::SubmitScan { .. } => "submit_scan",
            UiCommand::FetchLeaderboard => "fetch_leaderboard",
        }
    }
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// The request currently waiting for the worker. Only one may be in flight.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PendingRequest {
    Register,
    Login,
    Restore,
    Refresh,
    Scan,
    Leaderboard,
}

/// Entries on the scan-method screen.
pub const SCAN_METHODS: [(ScanMode, &str); 2] = [
    (ScanMode::Camera, "Camera"),
    (ScanMode::Image, "Image file"),
];

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    /// Active screen (MVI pattern).
    screen: ScreenState,
    /// Scan workflow state (MVI pattern).
    scan: ScanState,
    status: StatusLine,
    /// Read-only cached copy of the logged-in user.
    user: Option<User>,
    leaderboard: Vec<LeaderboardEntry>,
    email_input: String,
    image_path_input: String,
    method_selection: usize,
    pending: Option<PendingRequest>,
    next_generation: u64,
    scan_config: ScanConfig,
    camera_source: Option<PathBuf>,
    /// Decoder handle (resource, managed outside MVI).
    scanner: Box<dyn Decoder>,
    session: Box<dyn SessionStore>,
    commands: UiCommandSender,
    events: std_mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(
        config: &Config,
        session: Box<dyn SessionStore>,
        scanner: Box<dyn Decoder>,
        commands: UiCommandSender,
        events: std_mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            should_quit: false,
            screen: ScreenState::default(),
            scan: ScanState::default(),
            status: StatusLine::new(Duration::from_millis(config.ui.message_ttl_ms)),
            user: None,
            leaderboard: Vec::new(),
            email_input: String::new(),
            image_path_input: String::new(),
            method_selection: 0,
            pending: None,
            next_generation: 0,
            scan_config: ScanConfig::from(&config.scanner),
            camera_source: config.scanner.camera_source.clone(),
            scanner,
            session,
            commands,
            events,
        }
    }

    // -- Accessors ----------------------------------------------------------

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn active_screen(&self) -> Screen {
        self.screen.active
    }

    pub fn scan_state(&self) -> &ScanState {
        &self.scan
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    pub fn email_input(&self) -> &str {
        &self.email_input
    }

    pub fn image_path_input(&self) -> &str {
        &self.image_path_input
    }

    pub fn method_selection(&self) -> usize {
        self.method_selection
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scan_config(&self) -> &ScanConfig {
        &self.scan_config
    }

    pub fn camera_source(&self) -> Option<&PathBuf> {
        self.camera_source.as_ref()
    }

    pub fn is_scanner_running(&self) -> bool {
        self.scanner.is_scanning()
    }

    // -- View controller ----------------------------------------------------

    /// Show `screen`, hiding every other one, and clear the status line.
    pub fn activate(&mut self, screen: Screen) {
        if self.screen.active != screen {
            tracing::debug!(from = %self.screen.active, to = %screen, "Screen change");
        }
        dispatch_mvi!(self, screen, ScreenReducer, ScreenIntent::Activate(screen));
        self.status.clear();
    }

    pub fn show_message(&mut self, text: impl Into<String>, severity: Severity) {
        self.status.show(text, severity, Instant::now());
    }

    pub fn on_tick(&mut self) {
        self.status.tick(Instant::now());
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => handle_key(self, key),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::Api(event) => self.on_api_event(event),
            AppEvent::Decoded {
                generation,
                outcome,
            } => self.on_decoded(generation, outcome),
            AppEvent::Shutdown => self.shutdown(),
        }
    }

    /// Release the decoder and stop the event loop.
    pub fn shutdown(&mut self) {
        self.release_scanner();
        dispatch_mvi!(self, scan, ScanReducer, ScanIntent::Reset);
        self.request_quit();
    }

    // -- Navigation and forms -----------------------------------------------

    pub fn open_login(&mut self) {
        self.activate(Screen::Login);
    }

    pub fn open_register(&mut self) {
        self.activate(Screen::Register);
    }

    pub fn back_to_initial(&mut self) {
        self.activate(Screen::Initial);
    }

    pub fn back_to_main(&mut self) {
        self.activate(Screen::Main);
    }

    pub fn push_char(&mut self, ch: char) {
        match self.screen.active {
            Screen::Login | Screen::Register => self.email_input.push(ch),
            Screen::ImageUpload => self.image_path_input.push(ch),
            _ => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.screen.active {
            Screen::Login | Screen::Register => {
                self.email_input.pop();
            }
            Screen::ImageUpload => {
                self.image_path_input.pop();
            }
            _ => {}
        }
    }

    /// Submit the login or register form, whichever is showing.
    pub fn submit_form(&mut self) {
        match self.screen.active {
            Screen::Login => self.submit_login(),
            Screen::Register => self.submit_register(),
            _ => {}
        }
    }

    pub fn submit_login(&mut self) {
        let Some(email) = self.validated_email() else {
            return;
        };
        self.send_command(PendingRequest::Login, UiCommand::Login { email });
    }

    pub fn submit_register(&mut self) {
        let Some(email) = self.validated_email() else {
            return;
        };
        self.send_command(PendingRequest::Register, UiCommand::Register { email });
    }

    fn validated_email(&mut self) -> Option<String> {
        match validate_email(&self.email_input) {
            Ok(email) => Some(email),
            Err(err) => {
                self.show_message(err.user_message(), Severity::Error);
                None
            }
        }
    }

    // -- Session ------------------------------------------------------------

    /// Re-validate a stored session against the backend.
    ///
    /// The stored email is not trusted until the backend confirms it.
    pub fn restore_session(&mut self) {
        let record = match self.session.load() {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read stored session");
                None
            }
        };

        let Some(record) = record else {
            self.activate(Screen::Initial);
            return;
        };

        self.activate(Screen::Initial);
        if self.send_command(
            PendingRequest::Restore,
            UiCommand::RestoreSession {
                email: record.email,
            },
        ) {
            self.show_message("Restoring session...", Severity::Info);
        }
    }

    pub fn logout(&mut self) {
        self.release_scanner();
        dispatch_mvi!(self, scan, ScanReducer, ScanIntent::Reset);

        if let Err(err) = self.session.clear() {
            tracing::warn!(error = %err, "Failed to clear stored session");
        }
        if let Some(user) = self.user.take() {
            tracing::info!(email = %user.email, "Logged out");
        }
        self.leaderboard.clear();
        self.email_input.clear();
        self.image_path_input.clear();

        self.activate(Screen::Login);
        self.show_message("You have been logged out.", Severity::Info);
    }

    pub fn refresh_user(&mut self) {
        let Some(email) = self.user.as_ref().map(|u| u.email.clone()) else {
            return;
        };
        self.send_command(PendingRequest::Refresh, UiCommand::RefreshUser { email });
    }

    pub fn open_leaderboard(&mut self) {
        self.activate(Screen::Leaderboard);
        self.refresh_leaderboard();
    }

    pub fn refresh_leaderboard(&mut self) {
        self.send_command(PendingRequest::Leaderboard, UiCommand::FetchLeaderboard);
    }

    fn establish_session(&mut self, user: User) {
        let saved = self.session.save(&user);
        tracing::info!(email = %user.email, points = user.points, "Logged in");
        let needs_rank = user.position.is_none();
        self.user = Some(user);
        self.email_input.clear();
        self.activate(Screen::Main);
        if let Err(err) = saved {
            tracing::warn!(error = %err, "Failed to persist session");
            self.show_message(
                "Logged in, but the session could not be saved.",
                Severity::Error,
            );
        }
        if needs_rank {
            self.refresh_leaderboard();
        }
    }

    // -- Scan workflow ------------------------------------------------------

    pub fn open_scan_menu(&mut self) {
        if !self.require_login() {
            return;
        }
        if self.is_busy() || !self.scan.is_idle() {
            return;
        }
        self.method_selection = 0;
        self.activate(Screen::ScanMethodChoice);
    }

    pub fn move_method_selection(&mut self, delta: isize) {
        let len = SCAN_METHODS.len() as isize;
        let next = (self.method_selection as isize + delta).rem_euclid(len);
        self.method_selection = next as usize;
    }

    pub fn choose_method(&mut self) {
        match SCAN_METHODS[self.method_selection % SCAN_METHODS.len()].0 {
            ScanMode::Camera => self.start_camera_scan(),
            ScanMode::Image => self.open_image_upload(),
        }
    }

    pub fn open_image_upload(&mut self) {
        if !self.require_login() {
            return;
        }
        self.image_path_input.clear();
        self.activate(Screen::ImageUpload);
    }

    /// Activate the camera screen and start the decoder.
    pub fn start_camera_scan(&mut self) {
        if !self.require_login() {
            return;
        }
        let Some(generation) = self.begin_acquiring(ScanMode::Camera) else {
            return;
        };
        self.activate(Screen::CameraScanner);

        let events = self.events.clone();
        let started = self.scanner.start(
            &self.scan_config,
            Box::new(move |outcome| {
                let _ = events.send(AppEvent::Decoded {
                    generation,
                    outcome,
                });
            }),
        );

        if let Err(err) = started {
            tracing::warn!(error = %err, "Failed to start camera scan");
            dispatch_mvi!(self, scan, ScanReducer, ScanIntent::DecodeFailed { generation });
            self.activate(Screen::Main);
            self.show_message(err.user_message(), Severity::Error);
        }
    }

    /// Decode the image at the typed path.
    pub fn submit_image_path(&mut self) {
        let path = self.image_path_input.trim().to_string();
        if path.is_empty() {
            self.show_message("Enter the path of an image.", Severity::Error);
            return;
        }
        let Some(generation) = self.begin_acquiring(ScanMode::Image) else {
            return;
        };
        let outcome = self.scanner.scan_file(std::path::Path::new(&path));
        self.on_decoded(generation, outcome);
    }

    /// Stop acquiring and go back to the game without submitting.
    pub fn cancel_scan(&mut self) {
        if self.scan.is_submitting() {
            return;
        }
        self.release_scanner();
        dispatch_mvi!(self, scan, ScanReducer, ScanIntent::Cancel);
        self.activate(Screen::Main);
    }

    fn begin_acquiring(&mut self, mode: ScanMode) -> Option<u64> {
        if self.is_busy() || !self.scan.is_idle() {
            return None;
        }
        self.next_generation += 1;
        let generation = self.next_generation;
        dispatch_mvi!(self, scan, ScanReducer, ScanIntent::Begin { mode, generation });
        Some(generation)
    }

    /// Handle the decoder's result for scan `generation`.
    pub fn on_decoded(&mut self, generation: u64, outcome: Result<String, DecoderError>) {
        if !self.scan.accepts(generation) {
            tracing::debug!(generation, "Ignoring decode result for inactive scan");
            return;
        }

        // Release the camera before anything else happens.
        self.release_scanner();

        match outcome {
            Ok(code) => {
                dispatch_mvi!(
                    self,
                    scan,
                    ScanReducer,
                    ScanIntent::Decoded {
                        generation,
                        code: code.clone(),
                    }
                );
                self.submit_scan(code);
            }
            Err(err) => {
                tracing::info!(error = %err, "Scan produced no code");
                dispatch_mvi!(self, scan, ScanReducer, ScanIntent::DecodeFailed { generation });
                self.activate(Screen::Main);
                self.show_message(err.user_message(), Severity::Error);
            }
        }
    }

    fn submit_scan(&mut self, code: String) {
        let Some(email) = self.user.as_ref().map(|u| u.email.clone()) else {
            dispatch_mvi!(self, scan, ScanReducer, ScanIntent::Reset);
            self.activate(Screen::Login);
            self.show_message("You must log in to scan.", Severity::Error);
            return;
        };

        self.activate(Screen::Main);
        if self.send_command(PendingRequest::Scan, UiCommand::SubmitScan { email, code }) {
            self.show_message("Checking code...", Severity::Info);
        } else {
            dispatch_mvi!(self, scan, ScanReducer, ScanIntent::Reset);
        }
    }

    fn release_scanner(&mut self) {
        if let Err(err) = self.scanner.stop() {
            // The scanner's own drop guard still releases the source.
            tracing::warn!(error = %err, "Failed to stop scanner");
        }
    }

    fn require_login(&mut self) -> bool {
        if self.user.is_some() {
            return true;
        }
        self.activate(Screen::Login);
        self.show_message("You must log in to scan.", Severity::Error);
        false
    }

    // -- Worker plumbing ----------------------------------------------------

    /// Hand `command` to the worker unless another request is in flight.
    fn send_command(&mut self, pending: PendingRequest, command: UiCommand) -> bool {
        if let Some(current) = self.pending {
            tracing::debug!(?current, command = command.name(), "Request already in flight");
            self.show_message("Please wait for the current request to finish.", Severity::Info);
            return false;
        }
        match self.commands.try_send(command) {
            Ok(()) => {
                self.pending = Some(pending);
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "API worker unavailable");
                self.show_message("Internal error: request could not be sent.", Severity::Error);
                false
            }
        }
    }

    pub fn on_api_event(&mut self, event: ApiEvent) {
        self.pending = None;
        match event {
            ApiEvent::Registered { email, result } => self.on_registered(email, result),
            ApiEvent::LoggedIn(result) => match result {
                Ok(user) => self.establish_session(user),
                Err(err) => self.show_api_error(&err),
            },
            ApiEvent::SessionRestored { email, result } => self.on_session_restored(email, result),
            ApiEvent::UserRefreshed(result) => match result {
                Ok(snapshot) => self.apply_snapshot(snapshot),
                Err(err) => self.show_api_error(&err),
            },
            ApiEvent::ScanSubmitted(result) => self.on_scan_submitted(result),
            ApiEvent::LeaderboardLoaded(result) => match result {
                Ok(entries) => {
                    let Some(user) = self.user.as_mut() else {
                        tracing::debug!("Dropping leaderboard received after logout");
                        return;
                    };
                    user.apply_leaderboard(&entries);
                    self.leaderboard = entries;
                }
                Err(err) => self.show_api_error(&err),
            },
        }
    }

    fn on_registered(&mut self, email: String, result: Result<Registration, ApiError>) {
        match result {
            Ok(Registration {
                message,
                user: Some(user),
            }) => {
                self.establish_session(user);
                self.show_message(message, Severity::Success);
            }
            Ok(Registration {
                message,
                user: None,
            }) => {
                self.activate(Screen::Login);
                self.email_input = email;
                self.show_message(message, Severity::Success);
            }
            Err(err) => self.show_api_error(&err),
        }
    }

    fn on_session_restored(&mut self, email: String, result: Result<User, ApiError>) {
        match result {
            Ok(user) => self.establish_session(user),
            Err(err) if err.is_remote() => {
                tracing::info!(email = %email, error = %err, "Stored session rejected");
                if let Err(err) = self.session.clear() {
                    tracing::warn!(error = %err, "Failed to clear stored session");
                }
                self.show_restore_failure(&err);
            }
            Err(err) => {
                tracing::warn!(email = %email, error = %err, "Could not re-validate session");
                self.show_restore_failure(&err);
            }
        }
    }

    /// Report a failed restore without leaving a screen the user moved to.
    fn show_restore_failure(&mut self, err: &ApiError) {
        if self.screen.active == Screen::Initial {
            self.activate(Screen::Initial);
        }
        self.show_api_error(err);
    }

    fn on_scan_submitted(&mut self, result: Result<ScanResult, ApiError>) {
        dispatch_mvi!(self, scan, ScanReducer, ScanIntent::Finished);
        if self.user.is_none() {
            tracing::debug!("Dropping scan result received after logout");
            return;
        }
        self.activate(Screen::Main);
        match result {
            Ok(ScanResult { message, user }) => {
                tracing::info!("Scan accepted");
                match user {
                    Some(snapshot) => self.apply_snapshot(snapshot),
                    None => self.refresh_user(),
                }
                self.show_message(message, Severity::Success);
            }
            Err(err) => {
                tracing::info!(error = %err, "Scan rejected");
                self.show_api_error(&err);
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: User) {
        let Some(user) = self.user.as_mut() else {
            // Logged out while the request was in flight.
            return;
        };
        let needs_rank = snapshot.position.is_none();
        user.merge(snapshot);
        if needs_rank {
            self.refresh_leaderboard();
        }
    }

    fn show_api_error(&mut self, err: &ApiError) {
        self.show_message(err.user_message(), Severity::Error);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.release_scanner();
    }
}
