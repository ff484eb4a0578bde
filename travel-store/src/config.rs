//! Connection configuration and credential resolution.
//!
//! Credentials are supplied either as explicit `DB_*` environment variables
//! (when `USE_HARDCODED_CREDENTIALS` is enabled) or fetched from an external
//! secret store through the [`CredentialStore`] trait. The secret store
//! itself is a collaborator outside this crate; callers plug in whatever
//! client their environment provides.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default server port when none is configured.
const DEFAULT_PORT: u16 = 5432;

/// Default database name when `DB_NAME` is not set.
const DEFAULT_DATABASE: &str = "travel_itinerary";

/// Default secret name when `DB_SECRET_NAME` is not set.
const DEFAULT_SECRET_NAME: &str = "travel-itinerary-db-credentials";

/// Default connect timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for opening a database connection.
///
/// Configuration is established once at startup and read thereafter; nothing
/// in this crate mutates it at runtime.
///
/// # Examples
///
/// ```
/// use travel_store::ConnectionConfig;
///
/// let config = ConnectionConfig::new("db.example.com")
///     .with_port(5433)
///     .with_credentials("itinerary", "secret")
///     .with_database("travel_itinerary");
/// assert_eq!(config.port, 5433);
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Server hostname or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Role to authenticate as.
    pub username: String,
    /// Password for the role.
    pub password: String,
    /// Database name.
    pub database: String,
    /// Timeout applied when establishing the connection.
    pub connect_timeout: Duration,
}

impl ConnectionConfig {
    /// Creates a configuration for the given host with default settings.
    ///
    /// Defaults: port 5432, username `postgres`, empty password, database
    /// `travel_itinerary`, 10 second connect timeout.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: "postgres".to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Sets the server port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the username and password.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets the database name.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builds a configuration from the `DB_*` environment variables.
    ///
    /// `DB_HOST` is required; `DB_PORT`, `DB_USERNAME`, `DB_PASSWORD` and
    /// `DB_NAME` fall back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when `DB_HOST` is missing and
    /// [`Error::Validation`] when `DB_PORT` is not a valid port number.
    pub fn from_env() -> Result<Self> {
        let host = env::var("DB_HOST").map_err(|_| Error::Configuration {
            message: "DB_HOST must be set when using hardcoded credentials".to_string(),
        })?;

        let port = match env::var("DB_PORT") {
            Ok(value) => value.parse().map_err(|_| Error::Validation {
                field: "DB_PORT".to_string(),
                message: format!("invalid port number: {value}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            username: env::var("DB_USERNAME").unwrap_or_else(|_| "postgres".to_string()),
            password: env::var("DB_PASSWORD").unwrap_or_default(),
            database: env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    /// Resolves a configuration from the environment or a credential store.
    ///
    /// When `USE_HARDCODED_CREDENTIALS` is enabled the `DB_*` variables are
    /// used directly. Otherwise the secret named by `DB_SECRET_NAME` (or its
    /// default) is fetched from `store` and parsed as a JSON object with
    /// `username`, `password`, `host` and optional `port` fields; the
    /// database name still comes from `DB_NAME`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when neither hardcoded credentials
    /// nor a credential store are available, when the store lookup fails, or
    /// when the secret payload is malformed.
    pub fn resolve(store: Option<&dyn CredentialStore>) -> Result<Self> {
        if hardcoded_credentials_enabled()? {
            return Self::from_env();
        }

        let Some(store) = store else {
            return Err(Error::Configuration {
                message: "no credential store configured; \
                          set USE_HARDCODED_CREDENTIALS=true to use the DB_* variables"
                    .to_string(),
            });
        };

        let name = env::var("DB_SECRET_NAME").unwrap_or_else(|_| DEFAULT_SECRET_NAME.to_string());
        let payload = store.fetch(&name)?;
        let secret: SecretPayload =
            serde_json::from_str(&payload).map_err(|e| Error::Configuration {
                message: format!("malformed credential payload for secret '{name}': {e}"),
            })?;

        Ok(Self {
            host: secret.host,
            port: secret.port.unwrap_or(DEFAULT_PORT),
            username: secret.username,
            password: secret.password,
            database: env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }
}

/// Checks whether `USE_HARDCODED_CREDENTIALS` enables the env-var path.
fn hardcoded_credentials_enabled() -> Result<bool> {
    match env::var("USE_HARDCODED_CREDENTIALS") {
        Ok(value) => parse_bool("USE_HARDCODED_CREDENTIALS", &value),
        Err(_) => Ok(false),
    }
}

/// Parse a boolean value from a string.
///
/// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
fn parse_bool(field: &str, s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::Validation {
            field: field.to_string(),
            message: format!("invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"),
        }),
    }
}

/// Shape of the JSON credential payload stored in the secret store.
#[derive(Debug, Deserialize)]
struct SecretPayload {
    username: String,
    password: String,
    host: String,
    #[serde(default)]
    port: Option<u16>,
}

/// External secret store supplying database credentials.
///
/// Implementations wrap whatever secret service the deployment uses; the
/// store hands back the raw JSON payload and this crate parses it.
pub trait CredentialStore {
    /// Returns the JSON credential payload stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the secret cannot be retrieved, including when
    /// the store's own access token has expired.
    fn fetch(&self, name: &str) -> Result<String>;
}

/// In-memory credential store for tests and local tooling.
///
/// # Examples
///
/// ```
/// use travel_store::{CredentialStore, StaticCredentialStore};
///
/// let mut store = StaticCredentialStore::new();
/// store.insert("db-creds", r#"{"username":"u","password":"p","host":"h"}"#);
/// assert!(store.fetch("db-creds").is_ok());
/// assert!(store.fetch("other").is_err());
/// ```
#[derive(Debug, Default)]
pub struct StaticCredentialStore {
    secrets: HashMap<String, String>,
}

impl StaticCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a secret payload under `name`.
    pub fn insert(&mut self, name: impl Into<String>, payload: impl Into<String>) {
        self.secrets.insert(name.into(), payload.into());
    }
}

impl CredentialStore for StaticCredentialStore {
    fn fetch(&self, name: &str) -> Result<String> {
        self.secrets
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Configuration {
                message: format!("secret '{name}' not found"),
            })
    }
}


// Property-based tests for the boolean environment flag parser.
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Boolean parsing accepts every casing of the valid variants.
        #[test]
        fn prop_bool_parsing_case_insensitive(upper in any::<bool>()) {
            for variant in ["true", "1", "yes", "on"] {
                let input = if upper { variant.to_uppercase() } else { variant.to_string() };
                prop_assert_eq!(parse_bool("test", &input).unwrap(), true);
            }
            for variant in ["false", "0", "no", "off"] {
                let input = if upper { variant.to_uppercase() } else { variant.to_string() };
                prop_assert_eq!(parse_bool("test", &input).unwrap(), false);
            }
        }
    }

    proptest! {
        /// Strings outside the valid set always fail to parse.
        #[test]
        fn prop_bool_parsing_rejects_invalid(
            s in "[a-z]{2,10}".prop_filter("not a valid bool string", |s| {
                !matches!(s.as_str(), "true" | "false" | "yes" | "no" | "on" | "off")
            })
        ) {
            prop_assert!(parse_bool("test", &s).is_err());
        }
    }
}
