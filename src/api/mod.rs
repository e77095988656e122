//! Client for the spreadsheet-backed game API.
//!
//! One endpoint, one request shape (`{ action, ...fields }`), one response
//! envelope. See [`types`] for the wire format.

mod client;
mod error;
pub mod types;

pub use client::{validate_email, ApiClient, GameApi};
pub use error::ApiError;
pub use types::{position_of, Action, Envelope, LeaderboardEntry, Registration, ScanResult, User};
