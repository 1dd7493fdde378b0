//! Configuration module for the statistics client
//!
//! - `root`: Main configuration file
//! - `client`: Statistics channel endpoint and HTTP client settings
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod client;
pub mod errors;
pub mod logging;
pub mod root;

pub use client::ClientConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::Config;
