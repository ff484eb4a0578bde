//! Connection probe command.

use clap::Args;
use travel_store::{test_connection, Logger};

use crate::error::CliError;

use super::resolve_config;

/// Probe the configured database connection.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Resolves credentials, probes the database, and prints the outcome.
    pub fn execute(&self, logger: &Logger) -> Result<(), CliError> {
        let config = resolve_config()?;
        logger.info(&format!(
            "probing {}:{}/{}",
            config.host, config.port, config.database
        ));

        let status = test_connection(&config);
        println!("{status}");

        if status.is_connected() {
            Ok(())
        } else {
            Err(CliError::CheckFailed(
                "database connection probe failed".to_string(),
            ))
        }
    }
}
