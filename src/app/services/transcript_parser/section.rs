//! Section splitting and per-section accumulation
//!
//! A transcript is a sequence of polling intervals separated by lines made of
//! `=` characters. [`SectionSplitter`] yields the lines of one interval at a
//! time, and [`SectionAccumulator`] holds the record being built for it.

use std::io;

use super::carrier_aggregation::CarrierSummary;
use super::ping::{JitterFormula, PingStats};
use crate::app::models::{CarrierComponent, Record};
use crate::constants::SECTION_DELIMITER_CHAR;
use crate::{Error, Result};

/// Whether a line separates two sections
///
/// A delimiter is one or more `=` characters, optionally followed by
/// whitespace.
pub fn is_delimiter(line: &str) -> bool {
    let body = line.trim_end();
    !body.is_empty() && body.chars().all(|c| c == SECTION_DELIMITER_CHAR)
}

/// The lines of one polling interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Zero-based position of the section in the transcript
    pub index: usize,
    /// One-based input line number of the first line in the section
    pub first_line: usize,
    pub lines: Vec<String>,
}

impl Section {
    /// Input line number of the line at `offset` within the section
    pub fn line_number(&self, offset: usize) -> usize {
        self.first_line + offset
    }
}

/// Lazily partitions a line stream into sections
///
/// Yields the lines strictly between delimiters, plus the group before the
/// first delimiter and the group after the last one. Delimiter lines are
/// never part of a section. Only one section is held in memory at a time.
pub struct SectionSplitter<I> {
    lines: I,
    line_number: usize,
    next_index: usize,
    finished: bool,
}

impl<I> SectionSplitter<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            line_number: 0,
            next_index: 0,
            finished: false,
        }
    }

    fn take_section(&mut self, first_line: usize, lines: Vec<String>) -> Section {
        let index = self.next_index;
        self.next_index += 1;
        Section {
            index,
            first_line,
            lines,
        }
    }
}

impl<I> Iterator for SectionSplitter<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<Section>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let first_line = self.line_number + 1;
        let mut lines = Vec::new();

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    self.line_number += 1;
                    if is_delimiter(&line) {
                        return Some(Ok(self.take_section(first_line, lines)));
                    }
                    lines.push(line);
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(Error::io(
                        format!("Failed to read transcript line {}", self.line_number + 1),
                        e,
                    )));
                }
                None => {
                    self.finished = true;
                    return Some(Ok(self.take_section(first_line, lines)));
                }
            }
        }
    }
}

/// Record-in-progress for a single section
///
/// A fresh accumulator is created for every section and consumed by
/// [`SectionAccumulator::finalize`], so nothing observed in one section can
/// reach the record of the next.
#[derive(Debug, Default)]
pub struct SectionAccumulator {
    record: Record,
    components: Vec<CarrierComponent>,
    ping_samples: Vec<f64>,
}

impl SectionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    pub fn push_component(&mut self, component: CarrierComponent) {
        self.components.push(component);
    }

    pub fn push_ping_sample(&mut self, rtt_ms: f64) {
        self.ping_samples.push(rtt_ms);
    }

    pub fn components(&self) -> &[CarrierComponent] {
        &self.components
    }

    pub fn ping_samples(&self) -> &[f64] {
        &self.ping_samples
    }

    /// Compute section aggregates and return the record if it can be emitted
    ///
    /// Sections without a capture time are discarded.
    pub fn finalize(self, formula: JitterFormula) -> Option<Record> {
        let Self {
            mut record,
            components,
            ping_samples,
        } = self;

        let summary = CarrierSummary::from_components(&components);
        record.carrier_components = components;
        record.carrier_count = summary.count;
        record.carrier_total_bandwidth = summary.total_bandwidth;

        let ping = PingStats::from_samples(&ping_samples, formula);
        record.ping_min = ping.min;
        record.ping_max = ping.max;
        record.ping_avg = ping.avg;
        record.ping_jitter = ping.jitter;

        record.is_emittable().then_some(record)
    }
}
