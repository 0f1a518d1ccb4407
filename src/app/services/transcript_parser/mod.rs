//! Transcript parser for modem antenna sweep logs
//!
//! This module turns the raw transcript of a sweep (producer banner lines,
//! numbered AT command responses and ping output) into one [`Record`] per
//! polling interval.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`section`] - Delimiter-based section splitting and the per-section accumulator
//! - [`rules`] - Ordered, first-match-wins line rules for the main record fields
//! - [`value_mappers`] - Bounds-checked code tables and numeric transforms
//! - [`carrier_aggregation`] - Component carrier collection and summary
//! - [`ping`] - Ping reply samples and latency statistics
//! - [`parser`] - Section lifecycle and record emission
//! - [`stats`] - Parsing statistics
//!
//! ## Usage
//!
//! ```rust
//! use modem_scan::app::services::transcript_parser::TranscriptParser;
//! use modem_scan::Record;
//!
//! # fn example() -> modem_scan::Result<()> {
//! let transcript = "====\nCurrent time: 2021-06-01T10:00:00\nCurrent heading: 90\n";
//! let parser = TranscriptParser::with_defaults()?;
//! let mut records: Vec<Record> = Vec::new();
//! let stats = parser.run(transcript.as_bytes(), &mut records)?;
//!
//! assert_eq!(stats.records_emitted, 1);
//! assert_eq!(records[0].deg, Some(90));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! [`Record`]: crate::app::models::Record

pub mod carrier_aggregation;
pub mod parser;
pub mod ping;
pub mod rules;
pub mod section;
pub mod stats;
pub mod value_mappers;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use carrier_aggregation::{CarrierComponentRule, CarrierSummary};
pub use parser::TranscriptParser;
pub use ping::{JitterFormula, PingReplyRule, PingStats};
pub use rules::{ExtractionRule, LineShape, RuleSet};
pub use section::{Section, SectionAccumulator, SectionSplitter, is_delimiter};
pub use stats::{CaptureWindow, LineOutcome, ParseStats};
