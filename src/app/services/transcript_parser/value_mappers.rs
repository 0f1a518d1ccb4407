//! Value mapping utilities for modem responses
//!
//! Converts raw captured substrings into typed values. Table lookups are
//! bounds-checked: a code outside a table's domain is an
//! [`Error::UnrecognizedCode`], never a silent null, because it means the
//! device answered in a way the tables do not describe.

use crate::constants::{
    ACCESS_TECHNOLOGIES, INDICATOR_ON, LTE_BANDWIDTHS_MHZ, PCELL_STATES, REGISTRATION_STATES,
    SCELL_STATES, UNKNOWN_CODE, secondary_bandwidth, signal_quality,
};
use crate::{Error, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Parse a numeric field, reporting the field name on failure
pub fn parse_number<T>(field: &'static str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| Error::invalid_number(field, raw, e))
}

/// Parse a raw table index
fn parse_code(table: &'static str, raw: &str) -> Result<usize> {
    parse_number::<usize>(table, raw)
}

/// Look up a code in a fixed table
fn lookup<T: Copy>(table: &'static str, values: &[T], raw: &str) -> Result<T> {
    let code = parse_code(table, raw)?;
    values
        .get(code)
        .copied()
        .ok_or_else(|| Error::unrecognized_code(table, raw))
}

/// Map an AT+CSQ RSSI code to dBm, `None` for the unknown code
///
/// Codes above 31 other than the unknown code are errors.
pub fn map_rssi(raw: &str) -> Result<Option<i32>> {
    let code = parse_number::<u32>("RSSI", raw)?;
    if code == UNKNOWN_CODE {
        return Ok(None);
    }
    if code > signal_quality::RSSI_MAX_CODE {
        return Err(Error::unrecognized_code("RSSI", raw));
    }
    // code <= 31, so the conversion and arithmetic cannot overflow
    let dbm = signal_quality::RSSI_BASE_DBM + code as i32 * signal_quality::RSSI_STEP_DBM;
    Ok(Some(dbm))
}

/// Map an AT+CSQ channel bit error code to a percentage, `None` for the unknown code
pub fn map_bit_error_rate(raw: &str) -> Result<Option<f64>> {
    let code = parse_code("bit error rate", raw)?;
    if code == UNKNOWN_CODE as usize {
        return Ok(None);
    }
    lookup("bit error rate", &signal_quality::BIT_ERROR_RATES, raw).map(Some)
}

/// Map an LTE bandwidth code to MHz
pub fn map_lte_bandwidth(raw: &str) -> Result<f64> {
    lookup("LTE bandwidth", &LTE_BANDWIDTHS_MHZ, raw)
}

/// Map a secondary carrier bandwidth code (resource blocks) to MHz
pub fn map_secondary_bandwidth(raw: &str) -> Result<f64> {
    let code = parse_number::<u32>("secondary bandwidth", raw)?;
    if code == secondary_bandwidth::NARROWBAND_CODE {
        Ok(secondary_bandwidth::NARROWBAND_MHZ)
    } else {
        Ok(f64::from(code) / secondary_bandwidth::RESOURCE_BLOCKS_PER_MHZ)
    }
}

/// Map a primary cell state code
pub fn map_pcell_state(raw: &str) -> Result<String> {
    lookup("PCell state", &PCELL_STATES, raw).map(str::to_string)
}

/// Map a secondary cell state code
pub fn map_scell_state(raw: &str) -> Result<String> {
    lookup("SCell state", &SCELL_STATES, raw).map(str::to_string)
}

/// Map an AT+CREG? registration status code
pub fn map_registration_state(raw: &str) -> Result<String> {
    lookup("registration state", &REGISTRATION_STATES, raw).map(str::to_string)
}

/// Map an AT+COPS? access technology code
///
/// Unassigned slots inside the table decode to `None`; codes past the end of
/// the table are errors.
pub fn map_access_technology(raw: &str) -> Result<Option<String>> {
    lookup("access technology", &ACCESS_TECHNOLOGIES, raw).map(|v| v.map(str::to_string))
}

/// Map a boolean indicator, true only for the literal on value
pub fn map_indicator(raw: &str) -> bool {
    raw == INDICATOR_ON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_out_of_bounds_names_table() {
        let err = lookup("LTE bandwidth", &LTE_BANDWIDTHS_MHZ, "6").unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedCode { table: "LTE bandwidth", ref code } if code == "6"
        ));
    }

    #[test]
    fn test_parse_number_reports_field() {
        let err = parse_number::<i32>("Temp", "abc").unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { field: "Temp", .. }));
    }
}
