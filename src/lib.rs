//! Modem Scan Library
//!
//! A Rust library for converting the raw transcript of a cellular modem
//! antenna sweep into structured telemetry records, one per polling interval.
//!
//! This library provides tools for:
//! - Splitting a transcript into polling-interval sections on `=` delimiter lines
//! - Extracting modem fields with an ordered, first-match-wins set of line rules
//! - Decoding AT command codes through bounds-checked lookup tables
//! - Aggregating carrier-aggregation components and ping round-trip samples
//! - Writing one newline-delimited JSON record per valid section

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod record_writer;
        pub mod transcript_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CarrierComponent, ComponentType, Record};
pub use app::services::transcript_parser::{ParseStats, TranscriptParser};
pub use config::Config;

/// Result type alias for the modem scan parser
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for transcript processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A modem code fell outside the domain of its lookup table
    #[error("Unrecognized {table} code: '{code}'")]
    UnrecognizedCode { table: &'static str, code: String },

    /// A captured value could not be converted to a number
    #[error("Invalid number for {field}: '{value}' ({reason})")]
    InvalidNumber {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Extraction failed on a specific transcript line
    #[error("Extraction failed at line {line_number}: '{line}'")]
    Extraction {
        line_number: usize,
        line: String,
        #[source]
        source: Box<Error>,
    },

    /// A line pattern failed to compile
    #[error("Invalid line pattern for {shape}")]
    Pattern {
        shape: &'static str,
        #[source]
        source: regex::Error,
    },

    /// Record serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an unrecognized code error
    pub fn unrecognized_code(table: &'static str, code: impl Into<String>) -> Self {
        Self::UnrecognizedCode {
            table,
            code: code.into(),
        }
    }

    /// Create an invalid number error
    pub fn invalid_number(
        field: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidNumber {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap an error with the transcript line that caused it
    pub fn extraction(line_number: usize, line: impl Into<String>, source: Error) -> Self {
        Self::Extraction {
            line_number,
            line: line.into(),
            source: Box::new(source),
        }
    }

    /// Create a pattern compilation error
    pub fn pattern(shape: &'static str, source: regex::Error) -> Self {
        Self::Pattern { shape, source }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Whether this error came from decoding a device response
    pub fn is_mapping_failure(&self) -> bool {
        match self {
            Self::UnrecognizedCode { .. } | Self::InvalidNumber { .. } => true,
            Self::Extraction { source, .. } => source.is_mapping_failure(),
            _ => false,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
