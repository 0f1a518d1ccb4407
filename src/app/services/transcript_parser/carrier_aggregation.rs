//! Carrier aggregation component collection
//!
//! AT+QCAINFO reports one line per component carrier. Every line of a
//! section is offered to [`CarrierComponentRule`] independently of the main
//! rule list, and each match contributes one [`CarrierComponent`].

use regex::Regex;

use super::rules::Groups;
use super::value_mappers::{
    map_lte_bandwidth, map_pcell_state, map_scell_state, map_secondary_bandwidth,
};
use crate::app::models::{CarrierComponent, CellState, ComponentType};
use crate::{Error, Result};

const COMPONENT_PATTERN: &str = concat!(
    r#"^\d+:\s*\+QCAINFO:\s*"(PCC|SCC)","#,
    r#"\s*(\d+),\s*(\d+),\s*"LTE BAND (\d+)",\s*(\d+),\s*(\d+),"#,
    r"\s*(-?\d+),\s*(-?\d+),\s*(-?\d+),\s*(-?\d+)\s*$"
);

/// Recognizes primary and secondary component carrier report lines
#[derive(Debug, Clone)]
pub struct CarrierComponentRule {
    pattern: Regex,
}

impl CarrierComponentRule {
    pub fn new() -> Result<Self> {
        let pattern =
            Regex::new(COMPONENT_PATTERN).map_err(|e| Error::pattern("carrier component", e))?;
        Ok(Self { pattern })
    }

    /// Parse a component from a line, `None` if the line is not a component report
    ///
    /// Primary carriers report bandwidth as an LTE bandwidth code, secondary
    /// carriers as a resource block count.
    pub fn parse(&self, line: &str) -> Result<Option<CarrierComponent>> {
        let Some(captures) = self.pattern.captures(line) else {
            return Ok(None);
        };
        let groups = Groups::new(captures);

        let component_type = ComponentType::from_label(groups.text(1))
            .ok_or_else(|| Error::unrecognized_code("component type", groups.text(1)))?;

        let (bandwidth, state) = match component_type {
            ComponentType::Primary => (
                map_lte_bandwidth(groups.text(3))?,
                CellState::Primary(map_pcell_state(groups.text(5))?),
            ),
            ComponentType::Secondary => (
                map_secondary_bandwidth(groups.text(3))?,
                CellState::Secondary(map_scell_state(groups.text(5))?),
            ),
        };

        Ok(Some(CarrierComponent {
            component_type,
            earfcn: groups.number(2, "EARFCN")?,
            bandwidth,
            band: groups.number(4, "Band")?,
            state,
            pcid: groups.owned(6),
            rsrp: groups.number(7, "RSRP")?,
            rsrq: groups.number(8, "RSRQ")?,
            rssi: groups.number(9, "RSSI")?,
            sinr: groups.number(10, "SINR")?,
        }))
    }
}

/// Count and total bandwidth of the components observed in a section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierSummary {
    pub count: usize,
    pub total_bandwidth: f64,
}

impl CarrierSummary {
    /// Summarize components; an empty list gives a zero count and bandwidth
    pub fn from_components(components: &[CarrierComponent]) -> Self {
        Self {
            count: components.len(),
            // fold from +0.0, an empty float sum() is -0.0
            total_bandwidth: components.iter().fold(0.0, |total, c| total + c.bandwidth),
        }
    }
}
