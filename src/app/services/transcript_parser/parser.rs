//! Core transcript parser implementation
//!
//! This module drives the section lifecycle: each section starts from a fresh
//! accumulator, every line is dispatched to the ordered rule list and to the
//! carrier component and ping reply collectors, and at the section boundary
//! the aggregates are finalized and the record is emitted or discarded.

use std::io::BufRead;
use tracing::{debug, info, trace};

use super::carrier_aggregation::CarrierComponentRule;
use super::ping::{JitterFormula, PingReplyRule};
use super::rules::{LineShape, RuleSet};
use super::section::{Section, SectionAccumulator, SectionSplitter};
use super::stats::{LineOutcome, ParseStats};
use crate::app::models::Record;
use crate::app::services::record_writer::RecordSink;
use crate::config::ParsingConfig;
use crate::{Error, Result};

/// Section-based extraction engine for modem sweep transcripts
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    rules: RuleSet,
    components: CarrierComponentRule,
    ping_replies: PingReplyRule,
    jitter_formula: JitterFormula,
}

impl TranscriptParser {
    /// Create a parser with the given parsing configuration
    pub fn new(config: &ParsingConfig) -> Result<Self> {
        Ok(Self {
            rules: RuleSet::new()?,
            components: CarrierComponentRule::new()?,
            ping_replies: PingReplyRule::new()?,
            jitter_formula: config.jitter_formula,
        })
    }

    /// Create a parser with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(&ParsingConfig::default())
    }

    pub fn jitter_formula(&self) -> JitterFormula {
        self.jitter_formula
    }

    /// Main rule shapes in the order they are tried
    pub fn shapes(&self) -> impl Iterator<Item = LineShape> + '_ {
        self.rules.shapes()
    }

    /// Dispatch one line to the main rules and the auxiliary collectors
    ///
    /// The main rule list and the component collector are tried
    /// independently; a line consumed by one is still offered to the other.
    pub fn process_line(&self, acc: &mut SectionAccumulator, line: &str) -> Result<LineOutcome> {
        let shape = self.rules.apply(line, acc.record_mut())?;

        let component = match self.components.parse(line)? {
            Some(component) => {
                trace!(
                    "Collected {:?} carrier on band {}",
                    component.component_type, component.band
                );
                acc.push_component(component);
                true
            }
            None => false,
        };

        let ping_sample = match self.ping_replies.parse(line)? {
            Some(rtt) => {
                acc.push_ping_sample(rtt);
                true
            }
            None => false,
        };

        Ok(LineOutcome {
            shape,
            component,
            ping_sample,
        })
    }

    /// Process the lines of one section into a record, if it has a capture time
    ///
    /// Line numbers in errors are relative to the start of `lines`.
    pub fn process_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Option<Record>> {
        let mut acc = SectionAccumulator::new();
        for (offset, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            self.process_line(&mut acc, line)
                .map_err(|e| Error::extraction(offset + 1, line, e))?;
        }
        Ok(acc.finalize(self.jitter_formula))
    }

    fn process_section(&self, section: &Section, stats: &mut ParseStats) -> Result<Option<Record>> {
        let mut acc = SectionAccumulator::new();
        for (offset, line) in section.lines.iter().enumerate() {
            let outcome = self
                .process_line(&mut acc, line)
                .map_err(|e| Error::extraction(section.line_number(offset), line.as_str(), e))?;
            stats.record_line(&outcome);
        }
        Ok(acc.finalize(self.jitter_formula))
    }

    /// Process a whole transcript, writing one record per valid section
    pub fn run<R, S>(&self, reader: R, sink: &mut S) -> Result<ParseStats>
    where
        R: BufRead,
        S: RecordSink + ?Sized,
    {
        self.run_with_progress(reader, sink, |_| {})
    }

    /// Process a whole transcript, calling `on_section` after every section
    ///
    /// Records written before a fatal extraction error stay in the sink.
    pub fn run_with_progress<R, S, F>(
        &self,
        reader: R,
        sink: &mut S,
        mut on_section: F,
    ) -> Result<ParseStats>
    where
        R: BufRead,
        S: RecordSink + ?Sized,
        F: FnMut(&ParseStats),
    {
        info!(
            "Parsing transcript with {} jitter formula",
            self.jitter_formula
        );
        let mut stats = ParseStats::new();

        for section in SectionSplitter::new(reader.lines()) {
            let section = section?;
            stats.sections_total += 1;

            match self.process_section(&section, &mut stats)? {
                Some(record) => {
                    debug!(
                        "Section {} (line {}): emitting record for heading {:?} at {}",
                        section.index,
                        section.first_line,
                        record.deg,
                        record.time.as_deref().unwrap_or_default()
                    );
                    sink.write_record(&record)?;
                    stats.record_emitted(&record);
                }
                None => {
                    debug!(
                        "Section {} (line {}): no capture time, discarding {} lines",
                        section.index,
                        section.first_line,
                        section.lines.len()
                    );
                    stats.sections_discarded += 1;
                }
            }

            on_section(&stats);
        }

        sink.flush()?;

        info!(
            "Parsed {} sections: {} records emitted, {} discarded",
            stats.sections_total, stats.records_emitted, stats.sections_discarded
        );
        Ok(stats)
    }
}
