use http::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::cache::token::AccessToken;
use crate::config::credentials::Credentials;
use crate::error::AuthError;
use crate::sources::FetchToken;
use crate::utils::constants::{AUTH_GRANT_TYPE, AUTH_SCOPE};

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// OAuth2 password grant against the PRH auth server.
#[derive(Debug, Clone)]
pub struct PasswordGrantSource {
    pub credentials: Credentials,
    pub auth_url: String,
}

impl PasswordGrantSource {
    pub fn new(credentials: Credentials, auth_url: impl Into<String>) -> Self {
        Self { credentials, auth_url: auth_url.into() }
    }
}

impl FetchToken for PasswordGrantSource {
    async fn fetch_token(&self, client: &Client) -> Result<AccessToken, AuthError> {
        let form = [
            ("grant_type", AUTH_GRANT_TYPE),
            ("username", self.credentials.user_name()),
            ("password", self.credentials.password()),
            ("scope", AUTH_SCOPE),
        ];

        debug!(auth_url = %self.auth_url, client_id = %self.credentials.client_id(), "requesting access token");
        let response = client
            .post(&self.auth_url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, self.credentials.basic_auth())
            .form(&form)
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(AuthError::Transport)?;
        if !status.is_success() {
            warn!(%status, "access token request rejected");
            return Err(AuthError::Status { status, body });
        }

        let auth: AuthResponse = serde_json::from_str(&body).map_err(AuthError::InvalidResponse)?;
        info!(
            expires_in = auth.expires_in,
            token_type = auth.token_type.as_deref().unwrap_or("-"),
            "access token received"
        );
        Ok(AccessToken::new(auth.access_token, auth.expires_in))
    }
}
