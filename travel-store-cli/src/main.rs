//! Main entry point for the travel-store CLI.
//!
//! This is the command-line interface for running live checks against the
//! travel itinerary database:
//! - `check`: probe the connection and report the server version
//! - `schema`: compare the live schema against the expected tables
//! - `verify`: exercise create/read/update/delete end to end

mod cli;
mod commands;
mod error;

use clap::Parser;
use cli::Cli;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let logger = travel_store::init_logger(cli.verbose, cli.quiet);

    // Execute the command
    let result = match cli.command {
        cli::Command::Check(cmd) => cmd.execute(&logger),
        cli::Command::Schema(cmd) => cmd.execute(&logger),
        cli::Command::Verify(cmd) => cmd.execute(&logger),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
