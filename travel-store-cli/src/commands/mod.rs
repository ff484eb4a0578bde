//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `check`: probe the database connection
//! - `schema`: compare the live schema against the expected tables
//! - `verify`: exercise create/read/update/delete against the live database

pub mod check;
pub mod schema;
pub mod verify;

pub use check::CheckCommand;
pub use schema::SchemaCommand;
pub use verify::VerifyCommand;

use travel_store::{ConnectionConfig, Database, Logger};

use crate::error::CliError;

/// Resolves the connection configuration from the environment.
///
/// No secret store client ships with the CLI; deployments either enable
/// `USE_HARDCODED_CREDENTIALS` or run the checks through tooling that does.
pub(crate) fn resolve_config() -> Result<ConnectionConfig, CliError> {
    ConnectionConfig::resolve(None).map_err(|e| CliError::Config(e.to_string()))
}

/// Connects to the configured database, reporting failures as failed checks.
pub(crate) fn connect(logger: &Logger) -> Result<Database, CliError> {
    let config = resolve_config()?;
    logger.info(&format!(
        "connecting to {}:{}/{}",
        config.host, config.port, config.database
    ));
    Database::connect(config).map_err(|e| CliError::CheckFailed(e.to_string()))
}
