//! Sources module
//!
//! Token source for the PRH auth server and the registry request helpers.

use std::future::Future;

use reqwest::Client;

use crate::cache::token::AccessToken;
use crate::error::AuthError;

pub mod oauth2;
pub mod registry;

pub use oauth2::PasswordGrantSource;
pub use registry::{RegistryEndpoint, RegistryResponse};

pub trait FetchToken {
    fn fetch_token(
        &self,
        client: &Client,
    ) -> impl Future<Output = Result<AccessToken, AuthError>> + Send;
}
