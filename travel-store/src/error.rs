//! Error types for the travel-store library.
//!
//! A single error enum covers every failure mode in the crate, using
//! `thiserror` for display implementations. Driver errors are classified by
//! SQLSTATE so that constraint violations and credential failures surface as
//! their own variants rather than a generic database error.

use postgres::error::SqlState;
use thiserror::Error;

/// Result type alias for operations that may fail with a store error.
///
/// # Examples
///
/// ```
/// use travel_store::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the travel-store library.
///
/// Every operation surfaces one of these to the caller; nothing is silently
/// swallowed and nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The database connection could not be established or was lost.
    #[error("connection error: {reason}")]
    Connection {
        /// Description of the underlying failure, such as an expired
        /// credential token, an unreachable host, or rejected authentication.
        reason: String,
    },

    /// A field failed validation before reaching the database.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested record does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The record that was not found.
        resource: String,
    },

    /// The database rejected a write due to a constraint violation.
    #[error("persistence error: {details}")]
    Persistence {
        /// Details reported by the database, such as the violated constraint.
        details: String,
    },

    /// Configuration or credential resolution failed.
    #[error("configuration error: {message}")]
    Configuration {
        /// A description of the configuration problem.
        message: String,
    },

    /// A record could not be serialized to or reconstructed from a map.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An uncategorized database error occurred.
    #[error("database error: {0}")]
    Database(#[source] postgres::Error),
}

impl From<postgres::Error> for Error {
    fn from(err: postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let code = db_err.code();
            if code == &SqlState::FOREIGN_KEY_VIOLATION
                || code == &SqlState::UNIQUE_VIOLATION
                || code == &SqlState::NOT_NULL_VIOLATION
                || code == &SqlState::CHECK_VIOLATION
                || code == &SqlState::RESTRICT_VIOLATION
            {
                return Self::Persistence {
                    details: db_err.message().to_string(),
                };
            }
            if code == &SqlState::INVALID_PASSWORD
                || code == &SqlState::INVALID_AUTHORIZATION_SPECIFICATION
            {
                return Self::Connection {
                    reason: db_err.message().to_string(),
                };
            }
            return Self::Database(err);
        }

        if err.is_closed() {
            return Self::Connection {
                reason: "connection closed".to_string(),
            };
        }

        Self::Database(err)
    }
}

impl Error {
    /// Check if the error indicates a missing record.
    ///
    /// # Examples
    ///
    /// ```
    /// use travel_store::Error;
    ///
    /// let err = Error::NotFound { resource: "travel advisor 42".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is a field validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if the error is a constraint violation reported by the database.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }

    /// Check if the error is connection-related.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}
