//! Wire types for the game API.
//!
//! Requests are a single JSON object `{ "action": ..., ...fields }`.
//! Every response uses one envelope:
//!
//! ```text
//! { "success": bool, "message"?: string, "user"?: User, "leaderboard"?: [Entry] }
//! ```

use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// A named operation sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action")]
pub enum Action {
    #[serde(rename = "register")]
    Register { email: String },
    #[serde(rename = "login")]
    Login { email: String },
    #[serde(rename = "getUserData")]
    GetUserData { email: String },
    #[serde(rename = "scanQR")]
    ScanQr {
        email: String,
        #[serde(rename = "qrData")]
        qr_data: String,
    },
    #[serde(rename = "getLeaderboard")]
    GetLeaderboard,
}

impl Action {
    /// Wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Register { .. } => "register",
            Action::Login { .. } => "login",
            Action::GetUserData { .. } => "getUserData",
            Action::ScanQr { .. } => "scanQR",
            Action::GetLeaderboard => "getLeaderboard",
        }
    }
}

/// Cached copy of a player's server-side record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub points: u64,
    /// Leaderboard position (1-based), when the server reports it.
    #[serde(default)]
    pub position: Option<u32>,
}

impl User {
    /// Apply a fresher snapshot of the same user.
    ///
    /// A snapshot without a position keeps the known one.
    pub fn merge(&mut self, snapshot: User) {
        self.points = snapshot.points;
        if snapshot.position.is_some() {
            self.position = snapshot.position;
        }
        if !snapshot.email.is_empty() {
            self.email = snapshot.email;
        }
    }

    /// Fill in the position from a leaderboard ordered best first.
    pub fn apply_leaderboard(&mut self, entries: &[LeaderboardEntry]) {
        if let Some(rank) = position_of(entries, &self.email) {
            self.position = Some(rank);
            self.points = entries[(rank - 1) as usize].points;
        }
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub email: String,
    #[serde(default)]
    pub points: u64,
}

/// 1-based rank of `email` in `entries`, compared case-insensitively.
pub fn position_of(entries: &[LeaderboardEntry], email: &str) -> Option<u32> {
    let needle = email.to_lowercase();
    entries
        .iter()
        .position(|entry| entry.email.to_lowercase() == needle)
        .map(|idx| idx as u32 + 1)
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub message: String,
    /// Present when the backend logs the new user in directly.
    pub user: Option<User>,
}

/// Outcome of an accepted scan submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub message: String,
    pub user: Option<User>,
}

/// The single response envelope understood by the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub leaderboard: Option<Vec<LeaderboardEntry>>,
}

impl Envelope {
    /// Turn `success: false` into [`ApiError::Remote`].
    pub fn into_result(self, action: &Action) -> Result<Envelope, ApiError> {
        if self.success {
            return Ok(self);
        }
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_failure_message(action).to_string());
        Err(ApiError::Remote { message })
    }

    /// Take the user record, failing if the server omitted it.
    pub fn require_user(&mut self) -> Result<User, ApiError> {
        self.user.take().ok_or_else(|| ApiError::MalformedResponse {
            reason: "missing 'user' in successful response".to_string(),
        })
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn default_failure_message(action: &Action) -> &'static str {
    match action {
        Action::Register { .. } => "Registration failed.",
        Action::Login { .. } => "Login failed.",
        Action::GetUserData { .. } => "User not found.",
        Action::ScanQr { .. } => "The code could not be processed.",
        Action::GetLeaderboard => "Could not load the leaderboard.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scan_action_uses_wire_names() {
        let action = Action::ScanQr {
            email: "ana@example.com".into(),
            qr_data: "CODE-42".into(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({"action": "scanQR", "email": "ana@example.com", "qrData": "CODE-42"})
        );
        assert_eq!(action.name(), "scanQR");
    }

    #[test]
    fn leaderboard_action_has_no_fields() {
        let value = serde_json::to_value(Action::GetLeaderboard).unwrap();
        assert_eq!(value, json!({"action": "getLeaderboard"}));
    }

    #[test]
    fn envelope_with_user_parses() {
        let body = r#"{"success":true,"message":"Welcome","user":{"email":"a@b.c","points":30,"position":2}}"#;
        let mut envelope: Envelope = serde_json::from_str(body).unwrap();
        let user = envelope.require_user().unwrap();
        assert_eq!(user.points, 30);
        assert_eq!(user.position, Some(2));
        assert_eq!(envelope.message.as_deref(), Some("Welcome"));
    }

    #[test]
    fn failed_envelope_becomes_remote_error() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success":false,"message":"Already scanned"}"#).unwrap();
        let err = envelope
            .into_result(&Action::Login {
                email: "x".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Remote {
                message: "Already scanned".into()
            }
        );
    }

    #[test]
    fn failed_envelope_without_message_uses_fallback() {
        let envelope: Envelope = serde_json::from_str(r#"{"success":false}"#).unwrap();
        let err = envelope.into_result(&Action::GetLeaderboard).unwrap_err();
        assert_eq!(err.user_message(), "Could not load the leaderboard.");
    }

    #[test]
    fn merge_keeps_known_position_when_snapshot_has_none() {
        let mut user = User {
            email: "a@b.c".into(),
            points: 10,
            position: Some(3),
        };
        user.merge(User {
            email: "a@b.c".into(),
            points: 20,
            position: None,
        });
        assert_eq!(user.points, 20);
        assert_eq!(user.position, Some(3));
    }

    #[test]
    fn position_lookup_ignores_case() {
        let entries = vec![
            LeaderboardEntry {
                email: "top@example.com".into(),
                points: 90,
            },
            LeaderboardEntry {
                email: "Me@Example.com".into(),
                points: 40,
            },
        ];
        assert_eq!(position_of(&entries, "me@example.com"), Some(2));
        assert_eq!(position_of(&entries, "nobody@example.com"), None);

        let mut user = User {
            email: "me@example.com".into(),
            points: 0,
            position: None,
        };
        user.apply_leaderboard(&entries);
        assert_eq!(user.position, Some(2));
        assert_eq!(user.points, 40);
    }
}
