//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an overflow error
    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }
}

/// Failure while retrieving or decoding one of the remote collections
///
/// Every variant names the resource (`users`, `carts`, `products`, `snapshot`)
/// that failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unable to connect while fetching {resource}: {message}")]
    Connect { resource: String, message: String },

    #[error("request for {resource} timed out")]
    Timeout { resource: String },

    #[error("unable to read {resource}: {message}")]
    Read { resource: String, message: String },

    #[error("request for {resource} failed: {message}")]
    Request { resource: String, message: String },

    #[error("fetching {resource} failed with HTTP {status}")]
    Status { resource: String, status: u16 },

    #[error("failed to decode {resource} payload: {message}")]
    Decode { resource: String, message: String },

    #[error("malformed {resource} record: {message}")]
    Malformed { resource: String, message: String },
}

impl FetchError {
    pub fn malformed(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn decode(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Name of the resource the failure belongs to
    pub fn resource(&self) -> &str {
        match self {
            Self::Connect { resource, .. }
            | Self::Timeout { resource }
            | Self::Read { resource, .. }
            | Self::Request { resource, .. }
            | Self::Status { resource, .. }
            | Self::Decode { resource, .. }
            | Self::Malformed { resource, .. } => resource,
        }
    }
}

/// A cart references an id missing from a lookup built earlier in the run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("cart {cart_id} references unknown product {product_id}")]
    MissingProduct { cart_id: u64, product_id: u64 },

    #[error("cart {cart_id} belongs to unknown user {user_id}")]
    MissingUser { cart_id: u64, user_id: u64 },
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
