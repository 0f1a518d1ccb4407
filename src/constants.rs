//! Application constants for the modem scan parser
//!
//! This module contains the code tables used to decode modem responses,
//! default values, and environment variable names used throughout the
//! application.

// =============================================================================
// Transcript Structure
// =============================================================================

/// Marker character repeated on a line to separate polling intervals
pub const SECTION_DELIMITER_CHAR: char = '=';

/// Prefix written by the producer ahead of the capture timestamp
pub const CAPTURE_TIME_PREFIX: &str = "Current time:";

/// Prefix written by the producer ahead of the antenna heading
pub const HEADING_PREFIX: &str = "Current heading:";

// =============================================================================
// Modem Code Tables
// =============================================================================

/// Sentinel value the modem reports for "not known or not detectable"
pub const UNKNOWN_CODE: u32 = 99;

/// AT+CSQ signal quality decoding
pub mod signal_quality {
    /// RSSI in dBm for code 0
    pub const RSSI_BASE_DBM: i32 = -113;

    /// dBm added per RSSI code step
    pub const RSSI_STEP_DBM: i32 = 2;

    /// Highest RSSI code with a dBm value
    pub const RSSI_MAX_CODE: u32 = 31;

    /// Bit error rate percentages for channel bit error codes 0..=7
    pub const BIT_ERROR_RATES: [f64; 8] = [0.14, 0.28, 0.57, 1.13, 2.26, 4.53, 9.05, 18.10];
}

/// Channel bandwidths in MHz indexed by the LTE bandwidth code
pub const LTE_BANDWIDTHS_MHZ: [f64; 6] = [1.4, 3.0, 5.0, 10.0, 15.0, 20.0];

/// AT+QCAINFO secondary carrier bandwidth decoding
pub mod secondary_bandwidth {
    /// Code reported for a 1.4 MHz carrier (6 resource blocks)
    pub const NARROWBAND_CODE: u32 = 6;

    /// Bandwidth in MHz of the narrowband carrier
    pub const NARROWBAND_MHZ: f64 = 1.4;

    /// Resource blocks per MHz for all other codes
    pub const RESOURCE_BLOCKS_PER_MHZ: f64 = 5.0;
}

/// Primary cell states reported by AT+QCAINFO
pub const PCELL_STATES: [&str; 2] = ["No Serving", "Registered"];

/// Secondary cell states reported by AT+QCAINFO
pub const SCELL_STATES: [&str; 3] = [
    "Deconfigured",
    "Configured Deactivate",
    "Configured Activated",
];

/// Network registration states reported by AT+CREG?
pub const REGISTRATION_STATES: [&str; 5] = [
    "Not Registered",
    "Registered Home Network",
    "Registration Denied",
    "Unknown",
    "Registered Roaming",
];

/// Access technologies reported by AT+COPS?
///
/// Unassigned codes are `None` and decode to null rather than an error.
pub const ACCESS_TECHNOLOGIES: [Option<&str>; 14] = [
    None,
    None,
    Some("UTRAN"),
    None,
    Some("UTRAN W/HSDPA"),
    Some("UTRAN W/HSUPA"),
    Some("UTRAN W/HSDPA&HSUPA"),
    Some("E-UTRAN"),
    None,
    None,
    Some("E-UTRAN 5GCN"),
    Some("NR 5GCN"),
    Some("NG-RAN"),
    Some("E-UTRAN-NR dual connect"),
];

/// Raw value of the AT+QENDC indicator that means the 5G icon is shown
pub const INDICATOR_ON: &str = "1";

// =============================================================================
// Configuration Defaults and Environment
// =============================================================================

/// Default log level when no verbosity flags are given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in configuration
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Environment variable names for configuration overrides
pub mod env_vars {
    pub const JITTER_FORMULA: &str = "MODEM_SCAN_JITTER_FORMULA";
    pub const FLUSH_EACH_RECORD: &str = "MODEM_SCAN_FLUSH_EACH_RECORD";
}

/// Sections between progress spinner refreshes
pub const PROGRESS_UPDATE_INTERVAL: usize = 10;
