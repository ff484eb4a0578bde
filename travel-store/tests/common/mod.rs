//! Shared helpers for live database integration tests.
//!
//! These tests exercise a real database and only run when the environment
//! points at one (`DB_HOST` plus the other `DB_*` variables); otherwise each
//! test skips itself with a note on stderr.

use travel_store::{ConnectionConfig, Database};

/// Connects when the environment is configured, `None` otherwise.
#[allow(dead_code)]
pub fn live_database() -> Option<Database> {
    if std::env::var("DB_HOST").is_err() {
        eprintln!("skipping live database test: DB_HOST is not set");
        return None;
    }

    let config = match ConnectionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("skipping live database test: {e}");
            return None;
        }
    };

    match Database::connect(config) {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!("skipping live database test: {e}");
            None
        }
    }
}

/// A name suffixed with a random fragment so concurrent runs do not collide.
#[allow(dead_code)]
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", uuid::Uuid::new_v4().simple())
}
