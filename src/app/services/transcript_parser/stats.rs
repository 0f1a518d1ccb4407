//! Parsing statistics for transcript processing
//!
//! Tracks how many sections were seen and emitted and how many lines were
//! recognized, plus the capture window covered by the emitted records.

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;

use super::rules::LineShape;
use crate::app::models::Record;

/// What a single transcript line contributed to its section
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineOutcome {
    /// Main rule that matched, if any
    pub shape: Option<LineShape>,
    /// Whether the line was a carrier component report
    pub component: bool,
    /// Whether the line was a ping reply
    pub ping_sample: bool,
}

impl LineOutcome {
    pub fn is_unmatched(&self) -> bool {
        self.shape.is_none() && !self.component && !self.ping_sample
    }
}

/// Transcript processing statistics
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ParseStats {
    /// Sections seen, including empty and discarded ones
    pub sections_total: usize,

    /// Records written to the sink
    pub records_emitted: usize,

    /// Sections dropped for lack of a capture time
    pub sections_discarded: usize,

    /// Transcript lines inside sections
    pub lines_total: usize,

    /// Lines no rule recognized
    pub lines_unmatched: usize,

    /// Matches per main rule, keyed by shape name
    pub shape_matches: BTreeMap<&'static str, usize>,

    /// Carrier components collected across all sections
    pub carrier_components: usize,

    /// Ping samples collected across all sections
    pub ping_samples: usize,

    /// Capture time of the first emitted record
    pub first_capture: Option<String>,

    /// Capture time of the last emitted record
    pub last_capture: Option<String>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one processed line
    pub fn record_line(&mut self, outcome: &LineOutcome) {
        self.lines_total += 1;
        if let Some(shape) = outcome.shape {
            *self.shape_matches.entry(shape.name()).or_insert(0) += 1;
        }
        if outcome.component {
            self.carrier_components += 1;
        }
        if outcome.ping_sample {
            self.ping_samples += 1;
        }
        if outcome.is_unmatched() {
            self.lines_unmatched += 1;
        }
    }

    /// Account for an emitted record
    pub fn record_emitted(&mut self, record: &Record) {
        self.records_emitted += 1;
        if self.first_capture.is_none() {
            self.first_capture = record.time.clone();
        }
        self.last_capture = record.time.clone();
    }

    /// Percentage of sections that produced a record
    pub fn emission_rate(&self) -> f64 {
        if self.sections_total == 0 {
            0.0
        } else {
            (self.records_emitted as f64 / self.sections_total as f64) * 100.0
        }
    }

    /// First and last capture times, with the elapsed time when both parse
    pub fn capture_window(&self) -> Option<CaptureWindow> {
        let start = self.first_capture.clone()?;
        let end = self.last_capture.clone()?;
        let duration = match (parse_capture_time(&start), parse_capture_time(&end)) {
            (Some(s), Some(e)) => Some(e - s),
            _ => None,
        };
        Some(CaptureWindow {
            start,
            end,
            duration,
        })
    }
}

/// Time span covered by the emitted records
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureWindow {
    pub start: String,
    pub end: String,
    pub duration: Option<TimeDelta>,
}

/// Parse an ISO-8601 capture time, with or without a UTC offset
pub fn parse_capture_time(value: &str) -> Option<NaiveDateTime> {
    value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_utc()))
}
