//! Schema consistency report command.

use clap::Args;
use travel_store::database::EXPECTED_TABLES;
use travel_store::Logger;

use crate::error::CliError;

use super::connect;

/// Compare the live schema against the expected tables and columns.
#[derive(Args)]
pub struct SchemaCommand {}

impl SchemaCommand {
    /// Prints a per-table report and fails when anything is missing.
    pub fn execute(&self, logger: &Logger) -> Result<(), CliError> {
        let mut db = connect(logger)?;
        let report = db.verify_schema().map_err(CliError::from)?;

        for spec in EXPECTED_TABLES {
            if report.missing_tables.iter().any(|t| t == spec.name) {
                println!("MISSING: table {}", spec.name);
                continue;
            }

            let missing: Vec<&str> = report
                .missing_columns
                .iter()
                .filter(|(table, _)| table == spec.name)
                .map(|(_, column)| column.as_str())
                .collect();

            if missing.is_empty() {
                println!("OK: {}", spec.name);
            } else {
                println!("MISSING: {} columns {}", spec.name, missing.join(", "));
            }
        }

        if report.is_consistent() {
            println!("schema is consistent");
            Ok(())
        } else {
            Err(CliError::CheckFailed(
                "schema is missing tables or columns".to_string(),
            ))
        }
    }
}
