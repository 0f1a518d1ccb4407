//! Ordered extraction rules for transcript lines
//!
//! Each [`LineShape`] recognizes one distinct line produced by the producer
//! or by a modem command and knows which record fields it fills. A
//! [`RuleSet`] holds the compiled rules in priority order and applies the
//! first one that matches a line.

use regex::{Captures, Regex};
use tracing::trace;

use super::value_mappers::{
    map_access_technology, map_bit_error_rate, map_indicator, map_lte_bandwidth,
    map_registration_state, map_rssi, parse_number,
};
use crate::app::models::Record;
use crate::constants::{CAPTURE_TIME_PREFIX, HEADING_PREFIX};
use crate::{Error, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Numbered response prefix written by the command runner (`"3: "`)
const RESPONSE_PREFIX: &str = r"^\d+:\s*";

/// A distinct line shape recognized by the main rule list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineShape {
    CaptureTime,
    Heading,
    ModemTemperature,
    SignalQuality,
    ServingCellState,
    ServingCellLte,
    ServingCellNsa,
    ServingCellSa,
    ServingCellLteMode,
    ServingCellWcdma,
    AntennaPower,
    ModePreference,
    Registration,
    Operator,
    EndcIndicator,
    PingSummary,
}

impl LineShape {
    /// All shapes in the order they are tried
    pub const PRIORITY: [LineShape; 16] = [
        LineShape::CaptureTime,
        LineShape::Heading,
        LineShape::ModemTemperature,
        LineShape::SignalQuality,
        LineShape::ServingCellState,
        LineShape::ServingCellLte,
        LineShape::ServingCellNsa,
        LineShape::ServingCellSa,
        LineShape::ServingCellLteMode,
        LineShape::ServingCellWcdma,
        LineShape::AntennaPower,
        LineShape::ModePreference,
        LineShape::Registration,
        LineShape::Operator,
        LineShape::EndcIndicator,
        LineShape::PingSummary,
    ];

    /// Human readable name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            LineShape::CaptureTime => "capture time",
            LineShape::Heading => "heading",
            LineShape::ModemTemperature => "modem temperature",
            LineShape::SignalQuality => "signal quality",
            LineShape::ServingCellState => "serving cell state",
            LineShape::ServingCellLte => "LTE serving cell",
            LineShape::ServingCellNsa => "NR5G-NSA serving cell",
            LineShape::ServingCellSa => "NR5G-SA serving cell mode",
            LineShape::ServingCellLteMode => "LTE serving cell mode",
            LineShape::ServingCellWcdma => "WCDMA serving cell mode",
            LineShape::AntennaPower => "antenna receive power",
            LineShape::ModePreference => "mode preference",
            LineShape::Registration => "registration",
            LineShape::Operator => "operator",
            LineShape::EndcIndicator => "EN-DC indicator",
            LineShape::PingSummary => "ping summary",
        }
    }

    /// Regular expression source for this shape
    fn pattern(&self) -> String {
        let p = RESPONSE_PREFIX;
        match self {
            LineShape::CaptureTime => {
                format!(r"^{}\s+(\S+)\s*$", regex::escape(CAPTURE_TIME_PREFIX))
            }
            LineShape::Heading => format!(r"^{}\s*(\d+)\s*$", regex::escape(HEADING_PREFIX)),
            LineShape::ModemTemperature => format!(r#"{p}\+QTEMP:"mdm-q6-usr","(\d+)"\s*$"#),
            LineShape::SignalQuality => format!(r"{p}\+CSQ:\s*(\d+),(\d+)\s*$"),
            LineShape::ServingCellState => {
                format!(r#"{p}\+QENG:\s*"servingcell",\s*"([^"]+)"\s*$"#)
            }
            LineShape::ServingCellLte => format!(
                concat!(
                    r#"{p}\+QENG:\s*"LTE","([^"]+)","#,
                    r"\s*(\d+),\s*(\d+),\s*([0-9a-fA-F]+),\s*(\d+),\s*(\d+),\s*(\d+),",
                    r"\s*(\d+),\s*(\d+),\s*([0-9a-fA-F]+),",
                    r"\s*(-?\d+),\s*(-?\d+),\s*(-?\d+),\s*(-?\d+),\s*(-?\d+),\s*(-?\d+)"
                ),
                p = p
            ),
            LineShape::ServingCellNsa => format!(
                concat!(
                    r#"{p}\+QENG:\s*"(NR5G-NSA)",(\d+),(\d+),"#,
                    r"\s*(\d+),\s*(-?\d+),\s*(-?\d+),\s*(-?\d+),\s*(\d+),\s*(\d+)"
                ),
                p = p
            ),
            LineShape::ServingCellSa => {
                format!(r#"{p}\+QENG:\s*"servingcell",\s*"([^"]+)","(NR5G-SA)""#)
            }
            LineShape::ServingCellLteMode => {
                format!(r#"{p}\+QENG:\s*"servingcell",\s*"([^"]+)","(LTE)""#)
            }
            LineShape::ServingCellWcdma => {
                format!(r#"{p}\+QENG:\s*"servingcell",\s*"([^"]+)","(WCDMA)""#)
            }
            LineShape::AntennaPower => {
                format!(r"{p}\+QRSRP:\s*(-?\d+),\s*(-?\d+),\s*(-?\d+),\s*(-?\d+)")
            }
            LineShape::ModePreference => {
                format!(r#"{p}\+QNWPREFCFG:\s*"mode_pref",([A-Z0-9]+)"#)
            }
            LineShape::Registration => format!(r"{p}\+CREG:\s*\d+,\s*(\d+)"),
            LineShape::Operator => format!(r#"{p}\+COPS:\s*\d+,\d+,"([^"]+)",(\d+)"#),
            LineShape::EndcIndicator => format!(r"{p}\+QENDC:\s*\d+,\d+,\d+,(\d+)"),
            LineShape::PingSummary => r"^.* (\d+)% packet loss".to_string(),
        }
    }

    /// Write the captured groups of a matching line into the record
    fn apply(&self, groups: &Groups<'_>, record: &mut Record) -> Result<()> {
        match self {
            LineShape::CaptureTime => {
                record.time = Some(groups.owned(1));
            }
            LineShape::Heading => {
                record.deg = Some(groups.number(1, "Deg")?);
            }
            LineShape::ModemTemperature => {
                record.temp = Some(groups.number(1, "Temp")?);
            }
            LineShape::SignalQuality => {
                record.rssi = map_rssi(groups.text(1))?;
                record.bit_error_rate = map_bit_error_rate(groups.text(2))?;
            }
            LineShape::ServingCellState => {
                record.sc_state = Some(groups.owned(1));
            }
            LineShape::ServingCellLte => {
                record.sc_lte_net_mode = Some(groups.owned(1));
                record.sc_lte_mcc = Some(groups.number(2, "SC LTE MCC")?);
                record.sc_lte_mnc = Some(groups.number(3, "SC LTE MNC")?);
                record.sc_lte_cell_id = Some(groups.owned(4));
                record.sc_lte_pcid = Some(groups.number(5, "SC LTE PCID")?);
                record.sc_lte_earfcn = Some(groups.number(6, "SC LTE EARFCN")?);
                record.sc_lte_band = Some(groups.number(7, "SC LTE Band")?);
                record.sc_lte_ul_bandwidth = Some(map_lte_bandwidth(groups.text(8))?);
                record.sc_lte_dl_bandwidth = Some(map_lte_bandwidth(groups.text(9))?);
                record.sc_lte_tac = Some(groups.owned(10));
                record.sc_lte_rsrp = Some(groups.number(11, "SC LTE RSRP")?);
                record.sc_lte_rsrq = Some(groups.number(12, "SC LTE RSRQ")?);
                record.sc_lte_rssi = Some(groups.number(13, "SC LTE RSSI")?);
                record.sc_lte_sinr = Some(groups.number(14, "SC LTE SINR")?);
                record.sc_lte_cqi = Some(groups.number(15, "SC LTE CQI")?);
                record.sc_lte_tx_power = Some(groups.number(16, "SC LTE TxPwr")?);
            }
            LineShape::ServingCellNsa => {
                record.sc_mode = Some(groups.owned(1));
                record.sc_nsa_mcc = Some(groups.number(2, "SC NSA MCC")?);
                record.sc_nsa_mnc = Some(groups.number(3, "SC NSA MNC")?);
                record.sc_nsa_pcid = Some(groups.number(4, "SC NSA PCID")?);
                record.sc_nsa_rsrp = Some(groups.number(5, "SC NSA RSRP")?);
                record.sc_nsa_sinr = Some(groups.number(6, "SC NSA SINR")?);
                record.sc_nsa_rsrq = Some(groups.number(7, "SC NSA RSRQ")?);
                record.sc_nsa_arfcn = Some(groups.number(8, "SC NSA ARFCN")?);
                record.sc_nsa_band = Some(groups.number(9, "SC NSA Band")?);
            }
            LineShape::ServingCellSa | LineShape::ServingCellLteMode | LineShape::ServingCellWcdma => {
                record.sc_state = Some(groups.owned(1));
                record.sc_mode = Some(groups.owned(2));
            }
            LineShape::AntennaPower => {
                record.prx = Some(groups.number(1, "PRX")?);
                record.drx = Some(groups.number(2, "DRX")?);
                record.rx2 = Some(groups.number(3, "RX2")?);
                record.rx3 = Some(groups.number(4, "RX3")?);
            }
            LineShape::ModePreference => {
                record.mode_pref = Some(groups.owned(1));
            }
            LineShape::Registration => {
                record.registration_state = Some(map_registration_state(groups.text(1))?);
            }
            LineShape::Operator => {
                record.operator = Some(groups.owned(1));
                record.access_technology = map_access_technology(groups.text(2))?;
            }
            LineShape::EndcIndicator => {
                record.five_g_icon = Some(map_indicator(groups.text(1)));
            }
            LineShape::PingSummary => {
                record.ping_packet_loss = Some(groups.number(1, "Ping Pkt Loss")?);
            }
        }
        Ok(())
    }
}

/// Typed access to the capture groups of a matched line
pub(crate) struct Groups<'h> {
    captures: Captures<'h>,
}

impl<'h> Groups<'h> {
    pub(crate) fn new(captures: Captures<'h>) -> Self {
        Self { captures }
    }

    /// Captured text of a group, empty if the group did not participate
    pub(crate) fn text(&self, index: usize) -> &'h str {
        self.captures.get(index).map_or("", |m| m.as_str())
    }

    pub(crate) fn owned(&self, index: usize) -> String {
        self.text(index).to_string()
    }

    pub(crate) fn number<T>(&self, index: usize, field: &'static str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        parse_number(field, self.text(index))
    }
}

/// A compiled extraction rule
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    shape: LineShape,
    pattern: Regex,
}

impl ExtractionRule {
    /// Compile the rule for a line shape
    pub fn compile(shape: LineShape) -> Result<Self> {
        let pattern = Regex::new(&shape.pattern()).map_err(|e| Error::pattern(shape.name(), e))?;
        Ok(Self { shape, pattern })
    }

    pub fn shape(&self) -> LineShape {
        self.shape
    }

    /// Apply the rule to a line, returning whether it matched
    pub fn apply(&self, line: &str, record: &mut Record) -> Result<bool> {
        match self.pattern.captures(line) {
            Some(captures) => {
                self.shape.apply(&Groups::new(captures), record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Ordered, first-match-wins list of extraction rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ExtractionRule>,
}

impl RuleSet {
    /// Compile every line shape in priority order
    pub fn new() -> Result<Self> {
        let rules = LineShape::PRIORITY
            .iter()
            .map(|shape| ExtractionRule::compile(*shape))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Shapes in the order they are tried
    pub fn shapes(&self) -> impl Iterator<Item = LineShape> + '_ {
        self.rules.iter().map(ExtractionRule::shape)
    }

    /// Apply the first matching rule to the record
    ///
    /// Returns the shape that matched, or `None` when no rule recognizes the
    /// line. Later rules are never tried once one has matched.
    pub fn apply(&self, line: &str, record: &mut Record) -> Result<Option<LineShape>> {
        for rule in &self.rules {
            if rule.apply(line, record)? {
                trace!("Matched {} line: {}", rule.shape.name(), line);
                return Ok(Some(rule.shape));
            }
        }
        Ok(None)
    }
}
