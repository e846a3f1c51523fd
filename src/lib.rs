//! # Virre client library
//!
//! Client for the PRH Virre registry API. Authenticates with an OAuth2
//! password grant, caches the bearer token until it expires and fetches
//! financial periods and financial statements.
//!
//! Modules:
//! - `client` — the public [`VirreClient`] operations
//! - `cache` — single-slot token cache with timed invalidation
//! - `sources` — auth exchange and registry requests
//! - `decoder` — multipart statements decoding
//! - `transport` — caller-owned http transport and dns cache
//! - `config` — credentials, client settings, YAML loading

pub mod cache;
pub mod client;
pub mod config;
pub mod decoder;
pub mod error;
pub mod helpers;
pub mod models;
pub mod observability;
pub mod sources;
pub mod tests;
pub mod transport;
pub mod utils;


pub use crate::client::VirreClient;
pub use crate::config::{ClientConfig, ClientOptions};
pub use crate::decoder::decode_statements;
pub use crate::error::{AuthError, ConfigError, DecodeError, RegistryRequestError, VirreError, VirreResult};
pub use crate::models::{FinancialPeriods, FinancialStatements, Register};
