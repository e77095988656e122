//! Intents for the scan workflow.

use crate::ui::mvi::Intent;

use super::state::ScanMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanIntent {
    /// Start acquiring a code.
    Begin { mode: ScanMode, generation: u64 },

    /// The decoder produced text.
    Decoded { generation: u64, code: String },

    /// The decoder failed (camera lost, no code in image).
    DecodeFailed { generation: u64 },

    /// User cancelled while acquiring.
    Cancel,

    /// The backend answered the submission (either way).
    Finished,

    /// Drop everything (logout, quit).
    Reset,
}

impl Intent for ScanIntent {}
