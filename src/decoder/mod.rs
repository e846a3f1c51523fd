//! Decoding of registry responses that are not plain JSON.

pub mod multipart;
pub mod statements;

pub use statements::decode_statements;
