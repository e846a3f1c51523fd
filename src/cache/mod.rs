//! Single-slot bearer token cache with timer driven invalidation.

pub mod token;
pub mod token_cache;
mod token_expiry;

pub use token::AccessToken;
pub use token_cache::TokenCache;
