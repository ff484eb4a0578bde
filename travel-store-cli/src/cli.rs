//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use clap::{Parser, Subcommand};

use crate::commands::{CheckCommand, SchemaCommand, VerifyCommand};

/// Command-line tool for checking the travel itinerary database.
#[derive(Parser)]
#[command(name = "travel-store")]
#[command(version, about = "Run live checks against the travel itinerary database", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Probe the database connection and report the server version
    Check(CheckCommand),

    /// Compare the live schema against the expected tables and columns
    Schema(SchemaCommand),

    /// Exercise create/read/update/delete against the live database
    Verify(VerifyCommand),
}
