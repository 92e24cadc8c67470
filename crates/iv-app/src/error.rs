//! Error types for the iv-app service layer.

use crate::device::DriverError;

/// Service-layer error type that wraps errors from the repository
/// engine and the transceiver driver behind one boundary, so no failure
/// escapes an operation as anything but an explicit outcome.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("Signal not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for iv-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<iv_store::StoreError> for AppError {
    fn from(err: iv_store::StoreError) -> Self {
        match err {
            iv_store::StoreError::NotFound { key } => AppError::NotFound(key),
            iv_store::StoreError::EmptyPulses => AppError::Validation(err.to_string()),
            other => AppError::Store(other.to_string()),
        }
    }
}
