//! Ping round-trip sample collection and summary statistics
//!
//! Echo reply lines contribute one latency sample each, in arrival order.
//! The packet loss summary line is handled by the main rule list because the
//! probe already reports it as a single value.

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::rules::Groups;
use crate::{Error, Result};

const REPLY_PATTERN: &str = r"^.*bytes from.*time=([0-9.]+) ms";

/// Formula used to derive jitter from consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JitterFormula {
    /// Summed absolute differences divided by the sample count, minus one.
    /// Matches records produced by earlier sweeps.
    #[default]
    Legacy,
    /// Mean absolute difference between consecutive samples
    Corrected,
}

impl JitterFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            JitterFormula::Legacy => "legacy",
            JitterFormula::Corrected => "corrected",
        }
    }
}

impl fmt::Display for JitterFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JitterFormula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(JitterFormula::Legacy),
            "corrected" => Ok(JitterFormula::Corrected),
            other => Err(Error::configuration(format!(
                "Unknown jitter formula '{}' (expected 'legacy' or 'corrected')",
                other
            ))),
        }
    }
}

/// Recognizes successful echo reply lines
#[derive(Debug, Clone)]
pub struct PingReplyRule {
    pattern: Regex,
}

impl PingReplyRule {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(REPLY_PATTERN).map_err(|e| Error::pattern("ping reply", e))?;
        Ok(Self { pattern })
    }

    /// Round-trip time in milliseconds, `None` if the line is not a reply
    pub fn parse(&self, line: &str) -> Result<Option<f64>> {
        match self.pattern.captures(line) {
            Some(captures) => Groups::new(captures).number(1, "ping time").map(Some),
            None => Ok(None),
        }
    }
}

/// Summary statistics over one section's ping samples
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PingStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub jitter: Option<f64>,
}

impl PingStats {
    /// Summarize samples; every statistic is `None` when there are no samples
    /// and jitter needs at least two
    pub fn from_samples(samples: &[f64], formula: JitterFormula) -> Self {
        Self {
            min: samples.iter().copied().reduce(f64::min),
            max: samples.iter().copied().reduce(f64::max),
            avg: mean(samples),
            jitter: jitter(samples, formula),
        }
    }
}

/// Arithmetic mean, `None` for an empty slice
fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().fold(0.0, |sum, s| sum + s) / samples.len() as f64)
}

fn jitter(samples: &[f64], formula: JitterFormula) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let total_difference = samples
        .windows(2)
        .fold(0.0, |sum, pair| sum + (pair[1] - pair[0]).abs());
    let count = samples.len() as f64;

    Some(match formula {
        JitterFormula::Legacy => total_difference / count - 1.0,
        JitterFormula::Corrected => total_difference / (count - 1.0),
    })
}
