//! Error types for crosscast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrosscastError>;

#[derive(Error, Debug)]
pub enum CrosscastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl CrosscastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CrosscastError::InvalidPayload(_) => 3,
            CrosscastError::Remote(RemoteError::Status {
                status: 401 | 403, ..
            }) => 2,
            CrosscastError::Remote(_) => 1,
            CrosscastError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),
}

#[derive(Error, Debug, Clone)]
pub enum RemoteError {
    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never completed (DNS, connect, timeout, reset).
    #[error("Network error: {0}")]
    Transport(String),

    /// The service answered 2xx but the body was not the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The service answered 2xx but reported a failure in the body.
    #[error("{0}")]
    Rejected(String),
}
