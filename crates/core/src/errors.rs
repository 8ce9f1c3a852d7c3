//! Core error types for the CONEXA client.
//!
//! Transport-specific errors (reqwest, serde) are converted to these types by
//! the crate that owns the transport.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the client.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced an HTTP response (DNS, TLS, timeout...).
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with an error status or an unreadable body.
    #[error("API error: {0}")]
    Api(String),

    /// Reading or writing a persisted preference failed.
    #[error("Preference store error: {0}")]
    Preference(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
