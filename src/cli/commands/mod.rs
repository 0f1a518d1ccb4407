//! Command implementations for the modem scan CLI
//!
//! This module contains the main command execution logic. Each command is
//! implemented in its own module.

pub mod parse;
pub mod shared;
pub mod validate;

use crate::Result;
use crate::app::services::transcript_parser::ParseStats;
use crate::cli::args::Commands;

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `parse`: transcript to newline-delimited JSON records
/// - `validate`: transcript check with a summary report and no records
pub fn run(command: Commands) -> Result<ParseStats> {
    match command {
        Commands::Parse(parse_args) => parse::run_parse(parse_args),
        Commands::Validate(validate_args) => validate::run_validate(validate_args),
    }
}
