//! Logging infrastructure for the travel-store library.
//!
//! This module provides a simple stderr-based logging system with
//! configurable verbosity, used by the CLI front end. Library internals log
//! through the `log` crate facade instead.

use std::env;
use std::fmt;

/// Logging level for controlling output verbosity.
///
/// Levels are ordered from least verbose (Quiet) to most verbose (Verbose).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all non-essential output.
    Quiet,
    /// Normal output level (errors and warnings).
    Normal,
    /// Verbose output (errors, warnings, and informational messages).
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use travel_store::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// A simple stderr-based logger.
///
/// The logger respects the configured level and only emits messages at or
/// above that level.
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Logs an error message. Displayed unless the level is Quiet.
    pub fn error(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("ERROR: {message}");
        }
    }

    /// Logs a warning message. Displayed at Normal and Verbose levels.
    pub fn warn(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("WARN: {message}");
        }
    }

    /// Logs an informational message. Only displayed at Verbose level.
    pub fn info(&self, message: &str) {
        if self.level >= LogLevel::Verbose {
            eprintln!("INFO: {message}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

/// Initializes a logger from CLI flags and the environment.
///
/// The priority order is:
/// 1. CLI flags (`verbose` wins over `quiet` when both are set)
/// 2. `TRAVEL_STORE_LOG_MODE` environment variable
/// 3. Default (Normal)
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Ok(env_value) = env::var("TRAVEL_STORE_LOG_MODE") {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level);
        }
    }

    Logger::new(LogLevel::Normal)
}
