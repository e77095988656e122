use crate::ui::mvi::Intent;

use super::state::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenIntent {
    /// Show `Screen`, hiding all others.
    Activate(Screen),
}

impl Intent for ScreenIntent {}
