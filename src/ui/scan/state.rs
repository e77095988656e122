//! State for the scan workflow.

use crate::ui::mvi::UiState;

/// How the code is being acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Camera,
    Image,
}

/// Scan workflow state machine.
///
/// `Idle → Acquiring → Submitting → Idle`. Each acquisition carries a
/// generation so that a decode result can only be accepted by the scan that
/// started it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,

    /// Decoder running (camera) or decoding a file (image).
    Acquiring { mode: ScanMode, generation: u64 },

    /// Decoded text sent to the backend, waiting for the result.
    Submitting { code: String },
}

impl UiState for ScanState {}

impl ScanState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True while acquiring for `generation`.
    pub fn accepts(&self, generation: u64) -> bool {
        matches!(self, Self::Acquiring { generation: g, .. } if *g == generation)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_matching_generation() {
        let state = ScanState::Acquiring {
            mode: ScanMode::Camera,
            generation: 3,
        };
        assert!(state.accepts(3));
        assert!(!state.accepts(2));
        assert!(!ScanState::Idle.accepts(3));
        assert!(!ScanState::Submitting { code: "x".into() }.accepts(3));
    }
}
