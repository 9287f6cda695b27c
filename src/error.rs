//! Construction-time errors.
//!
//! These errors can only occur while building a [`Client`](crate::Client) or
//! a [`RequestSpec`](crate::RequestSpec). Once a call is in flight, nothing
//! errors through this type: every fault is folded into a
//! [`CallOutcome`](crate::CallOutcome) variant instead.

/// An error raised while configuring a client or building a request.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid configuration was provided, such as a missing base URL or an
    /// invalid header name or value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(String),
}

/// A specialized `Result` type for builder APIs.
pub type Result<T> = std::result::Result<T, Error>;
