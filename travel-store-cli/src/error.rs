//! CLI-specific error types with exit codes.

use std::fmt;

use travel_store::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// A check ran and failed (connection probe, schema mismatch, or a
    /// verification step).
    CheckFailed(String),

    /// Configuration or credentials could not be resolved.
    Config(String),

    /// Library error (wrapped).
    Library(LibError),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: A check failed
    /// - 2: Configuration error
    /// - 3: Other library error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::CheckFailed(_) => 1,
            CliError::Config(_) => 2,
            CliError::Library(_) => 3,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::CheckFailed(msg) => write!(f, "{msg}"),
            CliError::Config(msg) => write!(f, "configuration error: {msg}"),
            CliError::Library(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Configuration { message } => CliError::Config(message),
            other => CliError::Library(other),
        }
    }
}
