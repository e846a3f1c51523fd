//! Caller-owned http transport shared by all calls of one client.

pub mod dns;
pub mod http;

pub use self::http::HttpTransport;
