pub mod credentials;
pub mod loader;
pub mod settings;

pub use credentials::{ClientOptions, Credentials};
pub use loader::ServiceConfig;
pub use settings::{ClientConfig, LogFormat, LoggingConfig};
