//! The fixed set of screens.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::ui::mvi::UiState;

/// One mutually exclusive panel of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Initial,
    Register,
    Login,
    /// The game dashboard.
    Main,
    ScanMethodChoice,
    CameraScanner,
    ImageUpload,
    Leaderboard,
}

impl Screen {
    pub const ALL: [Screen; 8] = [
        Screen::Initial,
        Screen::Register,
        Screen::Login,
        Screen::Main,
        Screen::ScanMethodChoice,
        Screen::CameraScanner,
        Screen::ImageUpload,
        Screen::Leaderboard,
    ];

    /// Stable name used in logs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Initial => "initial",
            Screen::Register => "register",
            Screen::Login => "login",
            Screen::Main => "main",
            Screen::ScanMethodChoice => "scan-method-choice",
            Screen::CameraScanner => "camera-scanner",
            Screen::ImageUpload => "image-upload",
            Screen::Leaderboard => "leaderboard",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Initial => "Welcome",
            Screen::Register => "Register",
            Screen::Login => "Log in",
            Screen::Main => "Game",
            Screen::ScanMethodChoice => "Scan a code",
            Screen::CameraScanner => "Camera",
            Screen::ImageUpload => "Scan from image",
            Screen::Leaderboard => "Leaderboard",
        }
    }

    /// Screens that take free text input.
    pub fn has_text_input(&self) -> bool {
        matches!(self, Screen::Register | Screen::Login | Screen::ImageUpload)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("Unknown screen '{0}'")]
    Unknown(String),
}

impl FromStr for Screen {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = match name.as_str() {
            "game" => "main",
            "scanner" => "camera-scanner",
            other => other,
        };
        Screen::ALL
            .into_iter()
            .find(|screen| screen.as_str() == name)
            .ok_or_else(|| ScreenError::Unknown(s.to_string()))
    }
}

/// The active screen. Holding a single value makes every other screen
/// inactive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenState {
    pub active: Screen,
}

impl UiState for ScreenState {}

impl ScreenState {
    pub fn is_active(&self, screen: Screen) -> bool {
        self.active == screen
    }
}
