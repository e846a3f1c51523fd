use http::header::AUTHORIZATION;
use http::{HeaderMap, StatusCode};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::token::AccessToken;
use crate::config::settings::ClientConfig;
use crate::error::RegistryRequestError;
use crate::utils::constants::{FINANCIAL_PERIODS_PATH, FINANCIAL_STATEMENTS_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryEndpoint {
    FinancialPeriods,
    FinancialStatements,
}

impl RegistryEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            RegistryEndpoint::FinancialPeriods => FINANCIAL_PERIODS_PATH,
            RegistryEndpoint::FinancialStatements => FINANCIAL_STATEMENTS_PATH,
        }
    }

    /// Human readable name used in error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            RegistryEndpoint::FinancialPeriods => "financial periods",
            RegistryEndpoint::FinancialStatements => "financial statements",
        }
    }

    /// Metrics label.
    pub fn label(&self) -> &'static str {
        match self {
            RegistryEndpoint::FinancialPeriods => "financial_periods",
            RegistryEndpoint::FinancialStatements => "financial_statements",
        }
    }
}

/// Successful registry response, body not yet interpreted.
#[derive(Debug, Clone)]
pub struct RegistryResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Authorized GET against a registry endpoint.
pub async fn get(
    client: &Client,
    config: &ClientConfig,
    endpoint: RegistryEndpoint,
    token: &AccessToken,
    query: &[(&str, &str)],
) -> Result<RegistryResponse, RegistryRequestError> {
    let url = config.endpoint(endpoint.path());
    debug!(%url, operation = endpoint.operation(), "registry request");

    let response = client
        .get(&url)
        .header(AUTHORIZATION, token.bearer())
        .query(query)
        .send()
        .await?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    if !status.is_success() {
        warn!(%status, operation = endpoint.operation(), "registry request failed");
        return Err(RegistryRequestError::Status {
            operation: endpoint.operation(),
            status,
            body: serialize_error_body(&body),
        });
    }

    Ok(RegistryResponse { status, headers, body })
}

/// JSON bodies are re-serialized compactly, anything else becomes a JSON
/// string. Empty bodies yield `None`.
pub fn serialize_error_body(body: &[u8]) -> Option<String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    let serialized = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()).to_string(),
    };
    Some(serialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_body_is_compacted() {
        assert_eq!(
            serialize_error_body(b"{ \"error\" : \"forbidden\" }").as_deref(),
            Some(r#"{"error":"forbidden"}"#)
        );
    }

    #[test]
    fn text_error_body_is_quoted() {
        assert_eq!(serialize_error_body(b"Bad \"gateway\"").as_deref(), Some(r#""Bad \"gateway\"""#));
    }

    #[test]
    fn empty_error_body_is_none() {
        assert_eq!(serialize_error_body(b""), None);
        assert_eq!(serialize_error_body(b"  \r\n"), None);
    }

    #[test]
    fn endpoints_map_to_registry_paths() {
        assert_eq!(RegistryEndpoint::FinancialPeriods.path(), "/ttfs/1.0.0/financialPeriods");
        assert_eq!(RegistryEndpoint::FinancialStatements.path(), "/ttfs/1.0.0/financialStatements");
    }
}
