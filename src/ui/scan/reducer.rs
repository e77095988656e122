//! Reducer for the scan workflow.

use crate::ui::mvi::Reducer;

use super::intent::ScanIntent;
use super::state::ScanState;

/// Pure scan transitions. Starting and stopping the decoder and sending the
/// submission are done by the caller around the dispatch.
pub struct ScanReducer;

impl Reducer for ScanReducer {
    type State = ScanState;
    type Intent = ScanIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ScanIntent::Begin { mode, generation } => match state {
                ScanState::Idle => ScanState::Acquiring { mode, generation },
                // Non-reentrant: a running scan must finish or be cancelled first.
                other => other,
            },

            ScanIntent::Decoded { generation, code } => {
                if state.accepts(generation) {
                    ScanState::Submitting { code }
                } else {
                    state
                }
            }

            ScanIntent::DecodeFailed { generation } => {
                if state.accepts(generation) {
                    ScanState::Idle
                } else {
                    state
                }
            }

            ScanIntent::Cancel => match state {
                ScanState::Acquiring { .. } => ScanState::Idle,
                other => other,
            },

            ScanIntent::Finished => match state {
                ScanState::Submitting { .. } => ScanState::Idle,
                other => other,
            },

            ScanIntent::Reset => ScanState::Idle,
        }
    }
}
