//! Database connection management.
//!
//! This module provides the connection wrapper and the connection probe.
//! Each [`Database`] owns exactly one synchronous client; dropping the value
//! releases the connection on every exit path.

use std::fmt;

use log::info;
use postgres::{Client, NoTls};

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};

/// An open database connection with its configuration.
///
/// # Examples
///
/// ```no_run
/// use travel_store::{ConnectionConfig, Database};
///
/// let config = ConnectionConfig::new("db.example.com")
///     .with_credentials("postgres", "secret");
/// let mut db = Database::connect(config).unwrap();
/// let version = db.server_version().unwrap();
/// println!("{version}");
/// ```
pub struct Database {
    pub(crate) client: Client,
    config: ConnectionConfig,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("database", &self.config.database)
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Opens a connection using the supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] describing the underlying failure when
    /// the server is unreachable, the connect timeout elapses, or the
    /// credentials are rejected.
    pub fn connect(config: ConnectionConfig) -> Result<Self> {
        let mut pg = postgres::Config::new();
        pg.host(&config.host)
            .port(config.port)
            .user(&config.username)
            .password(&config.password)
            .dbname(&config.database)
            .connect_timeout(config.connect_timeout)
            .application_name("travel-store");

        let client = pg.connect(NoTls).map_err(|e| Error::Connection {
            reason: describe(&e),
        })?;

        info!(
            "connected to {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(Self { client, config })
    }

    /// Returns the configuration this connection was opened with.
    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Queries the server version string.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn server_version(&mut self) -> Result<String> {
        let row = self.client.query_one("SELECT version()", &[])?;
        Ok(row.try_get(0)?)
    }
}

/// Outcome of a connection probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// The probe connected and queried the server version.
    Connected {
        /// Version string reported by `SELECT version()`.
        server_version: String,
    },
    /// The probe failed.
    Failed {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl ConnectionStatus {
    /// True when the probe succeeded.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected { server_version } => {
                write!(f, "successfully connected: {server_version}")
            }
            Self::Failed { reason } => write!(f, "failed to connect: {reason}"),
        }
    }
}

/// Probes the database with the supplied configuration.
///
/// Failures (expired credential token, network unreachable, authentication
/// rejected) are reported in the returned status rather than raised, so a
/// probe never terminates the caller.
#[must_use]
pub fn test_connection(config: &ConnectionConfig) -> ConnectionStatus {
    match Database::connect(config.clone()) {
        Ok(mut db) => match db.server_version() {
            Ok(server_version) => ConnectionStatus::Connected { server_version },
            Err(e) => ConnectionStatus::Failed {
                reason: e.to_string(),
            },
        },
        Err(e) => ConnectionStatus::Failed {
            reason: e.to_string(),
        },
    }
}

/// Formats a driver error together with its full cause chain.
fn describe(err: &postgres::Error) -> String {
    use std::error::Error as _;

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
