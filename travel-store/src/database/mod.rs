//! Database layer for the travel itinerary store.
//!
//! This module provides connection management, the connection probe, the
//! generic CRUD operations, relationship queries, transaction scoping, and
//! the schema consistency check.
//!
//! # Examples
//!
//! ```no_run
//! use travel_store::model::{NewTravelAdvisor, TravelAdvisor};
//! use travel_store::{ConnectionConfig, Database};
//!
//! let config = ConnectionConfig::new("db.example.com")
//!     .with_credentials("postgres", "secret");
//! let mut db = Database::connect(config).unwrap();
//!
//! // Create an advisor and read it back.
//! let advisor: TravelAdvisor = db
//!     .create(&NewTravelAdvisor {
//!         name: "Jane Smith".to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! let fetched: TravelAdvisor = db.get_by_id(advisor.id).unwrap();
//! assert_eq!(fetched.name, "Jane Smith");
//! ```

mod connection;
pub mod operations;
pub mod relations;
mod schema;
mod transaction;

pub use connection::{test_connection, ConnectionStatus, Database};
pub use schema::{SchemaReport, TableSpec, EXPECTED_TABLES};

// Re-exported so callers can name the transaction type in closures and
// helper signatures without depending on the driver directly.
pub use postgres::Transaction;
