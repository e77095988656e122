use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};

use crate::config::ApiConfig;

use super::error::ApiError;
use super::types::{Action, Envelope, LeaderboardEntry, Registration, ScanResult, User};

/// The operations the game backend offers.
///
/// [`ApiClient`] talks HTTP; tests substitute their own implementation.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn register(&self, email: &str) -> Result<Registration, ApiError>;

    async fn login(&self, email: &str) -> Result<User, ApiError>;

    /// Fetch the current record for `email` (session re-validation, refresh).
    async fn user_data(&self, email: &str) -> Result<User, ApiError>;

    async fn scan_qr(&self, email: &str, code: &str) -> Result<ScanResult, ApiError>;

    /// Leaderboard ordered best first.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError>;
}

/// Trim an email and reject it when empty.
pub fn validate_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::Validation("Please enter an email.".to_string()));
    }
    Ok(email.to_string())
}

/// HTTP client for the single-endpoint game API.
///
/// No timeouts and no retries: a failed call is reported once and the
/// user starts a new attempt.
pub struct ApiClient {
    client: Client,
    endpoint: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let endpoint = Url::parse(config.endpoint.trim()).map_err(|e| {
            ApiError::Validation(format!("Invalid endpoint '{}': {}", config.endpoint, e))
        })?;
        let client = Client::builder()
            .user_agent(concat!("qrquest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network {
                detail: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `action` as a POST body and unwrap the envelope.
    ///
    /// The body is JSON but labelled `text/plain`: script-hosted backends
    /// read the raw post contents and reject other content types.
    pub async fn call(&self, action: &Action) -> Result<Envelope, ApiError> {
        let body = serde_json::to_vec(action).map_err(|e| ApiError::Validation(e.to_string()))?;
        tracing::debug!(action = action.name(), "POST");

        let result = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await;

        self.finish(action, result).await
    }

    /// Send `action` as query parameters on a GET request.
    async fn call_get(&self, action: &Action, params: &[(&str, &str)]) -> Result<Envelope, ApiError> {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("action", action.name());
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        tracing::debug!(action = action.name(), "GET");

        let result = self.client.get(url).send().await;
        self.finish(action, result).await
    }

    async fn finish(
        &self,
        action: &Action,
        result: Result<Response, reqwest::Error>,
    ) -> Result<Envelope, ApiError> {
        let response = result.map_err(|e| {
            let err = ApiError::Network {
                detail: e.to_string(),
            };
            tracing::warn!(action = action.name(), error_type = err.error_type(), error = %e, "Request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = ApiError::Network {
                detail: format!("HTTP {}", status),
            };
            tracing::warn!(
                action = action.name(),
                error_type = err.error_type(),
                status = status.as_u16(),
                "Non-success status"
            );
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(|e| {
            let err = ApiError::Network {
                detail: format!("failed to read response body: {}", e),
            };
            tracing::warn!(action = action.name(), error_type = err.error_type(), error = %e, "Body read failed");
            err
        })?;

        let envelope: Envelope = serde_json::from_slice(&bytes).map_err(|e| {
            let err = ApiError::MalformedResponse {
                reason: e.to_string(),
            };
            tracing::warn!(action = action.name(), error_type = err.error_type(), error = %e, "Unparseable response");
            err
        })?;

        let envelope = envelope.into_result(action);
        if let Err(err) = &envelope {
            tracing::info!(
                action = action.name(),
                error_type = err.error_type(),
                error = %err,
                "Backend rejected request"
            );
        }
        envelope
    }
}

#[async_trait]
impl GameApi for ApiClient {
    async fn register(&self, email: &str) -> Result<Registration, ApiError> {
        let email = validate_email(email)?;
        let envelope = self.call(&Action::Register { email }).await?;
        Ok(Registration {
            message: envelope.message_or("Registration successful."),
            user: envelope.user,
        })
    }

    async fn login(&self, email: &str) -> Result<User, ApiError> {
        let email = validate_email(email)?;
        let mut envelope = self.call(&Action::Login { email }).await?;
        envelope.require_user()
    }

    async fn user_data(&self, email: &str) -> Result<User, ApiError> {
        let email = validate_email(email)?;
        let action = Action::GetUserData {
            email: email.clone(),
        };
        let mut envelope = self.call_get(&action, &[("email", email.as_str())]).await?;
        envelope.require_user()
    }

    async fn scan_qr(&self, email: &str, code: &str) -> Result<ScanResult, ApiError> {
        let email = validate_email(email)?;
        if code.is_empty() {
            return Err(ApiError::Validation("The scanned code is empty.".to_string()));
        }
        let envelope = self
            .call(&Action::ScanQr {
                email,
                qr_data: code.to_string(),
            })
            .await?;
        Ok(ScanResult {
            message: envelope.message_or("Code accepted."),
            user: envelope.user,
        })
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let envelope = self.call(&Action::GetLeaderboard).await?;
        envelope.leaderboard.ok_or_else(|| ApiError::MalformedResponse {
            reason: "missing 'leaderboard' in successful response".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_email_trims_and_rejects_blank() {
        assert_eq!(validate_email("  a@b.c ").unwrap(), "a@b.c");
        assert!(matches!(validate_email("   "), Err(ApiError::Validation(_))));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let config = ApiConfig {
            endpoint: "not a url".into(),
        };
        assert!(matches!(ApiClient::new(&config), Err(ApiError::Validation(_))));
    }
}
