use reqwest::Client;

use crate::api::{dto, error_message};
use crate::error::AppError;
use crate::session::User;

/// Thin client for the portal's auth endpoints. Token renewal policy stays
/// with the backend; this client just exchanges and invalidates tokens.
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("failed to build http client: {}", e)))?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&dto::LoginRequest { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Auth(error_message(response).await));
        }

        let parsed: dto::LoginResponse = response.json().await?;
        Ok(parsed.data.access_token)
    }

    /// Fetches the authenticated user's profile.
    pub async fn me(&self, token: &str) -> Result<User, AppError> {
        let response = self
            .client
            .get(format!("{}/me", self.base_url))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Auth(error_message(response).await));
        }

        let parsed: dto::MeResponse = response.json().await?;
        Ok(parsed.data)
    }

    /// Invalidates the bearer token server-side.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(format!("{}/logout", self.base_url))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Auth(error_message(response).await));
        }

        Ok(())
    }
}
