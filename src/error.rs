//! # Structured Error Handling
//!
//! Crate-wide error taxonomy for the scheduler coordination core. Programmer-misuse
//! defects (double-lock, double-release) are deliberately NOT represented here: they
//! panic at the call site, since they are process-level invariant violations rather
//! than recoverable conditions. Plan-tree problems are likewise absent: at that layer
//! errors are data (`Status::Error`), never `Err`.

use crate::constants::ExitCode;

/// Errors produced by the coordination layer.
#[derive(Debug, thiserror::Error)]
pub enum CoordinationError {
    /// Failed to build or start a client for the coordination service.
    #[error("Coordination client error: {0}")]
    Client(String),

    /// All lock acquisition attempts were exhausted, or the client failed
    /// unexpectedly mid-acquisition. The process is expected to exit with
    /// [`ExitCode::LockUnavailable`] when this is returned.
    #[error("Leader lock unavailable for service '{service}' at {lock_path}")]
    LockUnavailable { service: String, lock_path: String },

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoordinationError {
    /// The process exit code associated with this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CoordinationError::LockUnavailable { .. } => ExitCode::LockUnavailable,
            _ => ExitCode::InitializationFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoordinationError>;
