#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # travel-store
//!
//! A typed persistence layer for the travel itinerary database.
//!
//! The library maps the itinerary tables onto explicit record structs and
//! implements the create/read/update/delete operations once, generically,
//! against the [`model::Entity`] trait. Connections are explicit values
//! acquired from a [`ConnectionConfig`] and released when dropped.
//!
//! ## Core Types
//!
//! - [`ConnectionConfig`] and [`CredentialStore`]: configuration and
//!   credential resolution
//! - [`Database`], [`ConnectionStatus`] and [`test_connection`]: connection
//!   management and the health probe
//! - [`model::Entity`] and the entity types (`TravelAdvisor`, `Itinerary`,
//!   `Day`, `ItineraryItem`, ...): the typed records
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```no_run
//! use travel_store::model::{NewTravelAdvisor, TravelAdvisor};
//! use travel_store::{ConnectionConfig, Database};
//!
//! let config = ConnectionConfig::new("db.example.com")
//!     .with_credentials("postgres", "secret");
//! let mut db = Database::connect(config).unwrap();
//!
//! let advisor: TravelAdvisor = db
//!     .create(&NewTravelAdvisor {
//!         name: "Jane Smith".to_string(),
//!         phone_number: Some("555-123-4567".to_string()),
//!         company_name: Some("Luxury Travel Co.".to_string()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! println!("{advisor}");
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod model;

// Re-export key types at crate root for convenience
pub use config::{ConnectionConfig, CredentialStore, StaticCredentialStore};
pub use database::{test_connection, ConnectionStatus, Database, SchemaReport};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use model::Entity;
