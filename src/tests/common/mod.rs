// tests/common/mod.rs
pub use axum::{Router, body::Body};
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;

use crate::config::{ClientConfig, ClientOptions};
use crate::VirreClient;

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const BUSINESS_ID: &str = "1234567-8";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn options() -> ClientOptions {
    ClientOptions::new(CLIENT_ID, CLIENT_SECRET, "user", "password")
}

/// Client whose registry and auth server both live at `base`.
pub fn build_client(base: &str) -> VirreClient {
    let config = ClientConfig {
        base_url: base.to_owned(),
        auth_url: Some(format!("{}/oxauth/restv1/token", base)),
        timeout_ms: 5_000,
        ..ClientConfig::default()
    };
    VirreClient::new(options(), config).expect("client")
}

pub fn token_response(token: &str, expires_in: u64) -> serde_json::Value {
    json!({
        "access_token": token,
        "expires_in": expires_in,
        "scope": "openid profile email group_membership",
        "id_token": "header.payload.signature",
        "token_type": "bearer"
    })
}

pub fn statements_metadata() -> serde_json::Value {
    json!({
        "businessId": BUSINESS_ID,
        "register": "krek",
        "companyName": "Acme",
        "period": {"startDate": "2020-01-01", "endDate": "2020-12-31"},
        "documents": []
    })
}

/// Multipart body with the metadata part first and one part per
/// `(name, filename, type, data)` attachment.
pub fn multipart_body(boundary: &str, metadata: &serde_json::Value, attachments: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"metadata\"\r\nContent-Type: application/json\r\n\r\n{m}\r\n",
        b = boundary,
        m = metadata
    )
    .into_bytes();
    for (name, filename, mime_type, data) in attachments {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                boundary, name, filename, mime_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}
