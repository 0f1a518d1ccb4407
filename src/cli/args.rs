//! Command-line argument definitions for the modem scan parser
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::services::transcript_parser::JitterFormula;
use crate::{Error, Result};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the modem scan parser
///
/// Converts the transcript of a modem antenna sweep into newline-delimited
/// JSON telemetry records, one per polling interval.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "modem_scan",
    version,
    about = "Convert modem antenna sweep transcripts into JSON telemetry records",
    long_about = "Reads the transcript captured while stepping an antenna through a heading sweep \
                  (AT command responses from the modem plus ping output, one polling interval per \
                  '=' delimited section) and writes one JSON record per polling interval for \
                  charting and analysis."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a transcript and write newline-delimited JSON records
    Parse(ParseArgs),
    /// Check a transcript without writing records
    Validate(ValidateArgs),
}

/// Options shared by every command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct SharedArgs {
    /// Transcript file to read
    ///
    /// Reads standard input when not given.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Transcript file to read (default: stdin)"
    )]
    pub input_path: Option<PathBuf>,

    /// JSON configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "JSON configuration file"
    )]
    pub config_file: Option<PathBuf>,

    /// Formula used to derive ping jitter
    ///
    /// 'legacy' keeps compatibility with records from earlier sweeps,
    /// 'corrected' is the mean absolute difference between consecutive samples.
    #[arg(
        long = "jitter-formula",
        value_enum,
        value_name = "FORMULA",
        help = "Formula used to derive ping jitter"
    )]
    pub jitter_formula: Option<JitterFormula>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and hide progress and the summary report
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ParseArgs {
    #[command(flatten)]
    pub shared: SharedArgs,

    /// File to write records to
    ///
    /// Writes to standard output when not given.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "File to write records to (default: stdout)"
    )]
    pub output_path: Option<PathBuf>,

    /// Flush output after every record
    #[arg(
        long = "flush-each-record",
        help = "Flush output after every record (for live consumers)"
    )]
    pub flush_each_record: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub shared: SharedArgs,
}

impl SharedArgs {
    /// Validate shared arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(Error::file_not_found(input_path.display().to_string()));
            }

            if !input_path.is_file() {
                return Err(Error::configuration(format!(
                    "Input path is not a file: {}",
                    input_path.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Log level requested by the verbosity flags, if any
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("info"),
                2 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }

    /// Check if we should show progress and the summary report
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ParseArgs {
    /// Validate the parse command arguments
    pub fn validate(&self) -> Result<()> {
        self.shared.validate()?;

        if let Some(output_path) = &self.output_path {
            if output_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Output path is a directory: {}",
                    output_path.display()
                )));
            }

            if let Some(parent) = output_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }
}

impl ValidateArgs {
    /// Validate the validate command arguments
    pub fn validate(&self) -> Result<()> {
        self.shared.validate()
    }
}
