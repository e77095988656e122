//! Scan workflow state (MVI).
//!
//! - `state.rs` - Workflow state enum
//! - `intent.rs` - Decoder and user events
//! - `reducer.rs` - State transitions

mod intent;
mod reducer;
mod state;

pub use intent::ScanIntent;
pub use reducer::ScanReducer;
pub use state::{ScanMode, ScanState};
