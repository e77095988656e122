//! Screen navigation (MVI).

mod intent;
mod reducer;
mod state;

pub use intent::ScreenIntent;
pub use reducer::ScreenReducer;
pub use state::{Screen, ScreenError, ScreenState};
