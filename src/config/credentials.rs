use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::error::ConfigError;

/// Credentials as supplied by the caller. Every field is required; missing
/// ones are reported by [`Credentials::try_from`].
#[derive(Clone, Default, Deserialize)]
pub struct ClientOptions {
    #[serde(alias = "clientId")]
    pub client_id: Option<String>,
    #[serde(alias = "clientSecret")]
    pub client_secret: Option<String>,
    #[serde(alias = "userName")]
    pub user_name: Option<String>,
    pub password: Option<String>,
}

impl ClientOptions {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            user_name: Some(user_name.into()),
            password: Some(password.into()),
        }
    }
}

/// Validated, immutable credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    user_name: String,
    password: String,
}

impl Credentials {
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// `Authorization` header value for the token endpoint.
    pub fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl TryFrom<ClientOptions> for Credentials {
    type Error = ConfigError;

    fn try_from(options: ClientOptions) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: required(options.client_id, "clientId")?,
            client_secret: required(options.client_secret, "clientSecret")?,
            user_name: required(options.user_name, "userName")?,
            password: required(options.password, "password")?,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField { field })
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}
