//! Error taxonomy of the client.
//!
//! Every public operation returns [`VirreError`], which wraps one of the four
//! concrete error kinds. The concrete kinds keep the status code, response
//! body and underlying cause as fields so callers can match on them instead
//! of parsing messages.

use http::StatusCode;
use thiserror::Error;

/// Result alias for client operations.
pub type VirreResult<T> = Result<T, VirreError>;

#[derive(Debug, Error)]
pub enum VirreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Registry(#[from] RegistryRequestError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Raised synchronously while constructing a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required credential is absent or empty. `field` uses the public
    /// option name (`clientId`, `clientSecret`, `userName`, `password`).
    #[error("Missing options.{field}")]
    MissingField { field: &'static str },

    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build http transport: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// The OAuth2 password-grant exchange failed. The token cache stays empty.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("auth request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("auth response is not a valid token response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

/// A registry call did not produce a usable response.
#[derive(Debug, Error)]
pub enum RegistryRequestError {
    /// Non-2xx response. `body` holds the serialized response body when the
    /// registry sent one.
    #[error("{}", status_message(.operation, .status, .body.as_deref()))]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: Option<String>,
    },

    /// DNS, connect, timeout and other transport-level failures, unchanged.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("invalid {operation} response body: {source}")]
    InvalidBody {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn status_message(operation: &str, status: &StatusCode, body: Option<&str>) -> String {
    match body {
        Some(body) => format!("An error occurred while fetching {}: {}", operation, body),
        None => format!("An error occurred while fetching {}: status {}", operation, status),
    }
}

/// The financial statements response could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("No content-type header found in getFinancialStatements response")]
    MissingContentType,

    #[error("No multipart boundary in content-type '{content_type}'")]
    MissingBoundary { content_type: String },

    #[error("No parts found in getFinancialStatements response")]
    NoParts,

    #[error("No metadata found in getFinancialStatements response")]
    MissingMetadata,

    #[error("Invalid metadata in getFinancialStatements response: {0}")]
    InvalidMetadata(#[source] serde_json::Error),

    /// `index` is the attachment position (0 = first part after metadata).
    #[error("Invalid attachment found in getFinancialStatements response: part {index} has no {missing}")]
    InvalidAttachment { index: usize, missing: &'static str },
}

impl DecodeError {
    /// Short label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            DecodeError::MissingContentType => "missing_content_type",
            DecodeError::MissingBoundary { .. } => "missing_boundary",
            DecodeError::NoParts => "no_parts",
            DecodeError::MissingMetadata => "missing_metadata",
            DecodeError::InvalidMetadata(_) => "invalid_metadata",
            DecodeError::InvalidAttachment { .. } => "invalid_attachment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_status_message_embeds_body() {
        let err = RegistryRequestError::Status {
            operation: "financial periods",
            status: StatusCode::FORBIDDEN,
            body: Some(r#"{"error":"forbidden"}"#.to_owned()),
        };
        assert_eq!(
            err.to_string(),
            r#"An error occurred while fetching financial periods: {"error":"forbidden"}"#
        );
    }

    #[test]
    fn registry_status_message_without_body_keeps_status() {
        let err = RegistryRequestError::Status {
            operation: "financial statements",
            status: StatusCode::BAD_GATEWAY,
            body: None,
        };
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn config_error_names_field() {
        let err = VirreError::from(ConfigError::MissingField { field: "clientSecret" });
        assert_eq!(err.to_string(), "Missing options.clientSecret");
    }
}
