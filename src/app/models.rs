//! Core data structures for modem telemetry records
//!
//! A [`Record`] is one telemetry snapshot for a single polling interval of an
//! antenna sweep. Field names serialize to the keys expected by downstream
//! chart tooling, and every field the section did not observe serializes as
//! `null`.

use serde::Serialize;

/// One telemetry snapshot for a single polling interval
///
/// Serialization order follows the declaration order below and is stable
/// across runs so identical transcripts produce byte-identical output.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    /// Antenna heading in degrees (0-360) at capture time
    #[serde(rename = "Deg")]
    pub deg: Option<u16>,

    /// Capture timestamp as written by the producer (ISO-8601)
    ///
    /// A record is only emitted when this is present.
    #[serde(rename = "Time")]
    pub time: Option<String>,

    // AT+QTEMP
    #[serde(rename = "Temp")]
    pub temp: Option<i32>,

    // AT+CSQ
    #[serde(rename = "RSSI")]
    pub rssi: Option<i32>,
    #[serde(rename = "BitErrorRate")]
    pub bit_error_rate: Option<f64>,

    // AT+QENG="servingcell"
    #[serde(rename = "SC Mode")]
    pub sc_mode: Option<String>,
    #[serde(rename = "SC State")]
    pub sc_state: Option<String>,
    #[serde(rename = "SC LTE Net Mode")]
    pub sc_lte_net_mode: Option<String>,
    #[serde(rename = "SC LTE MCC")]
    pub sc_lte_mcc: Option<i32>,
    #[serde(rename = "SC NSA MCC")]
    pub sc_nsa_mcc: Option<i32>,
    #[serde(rename = "SC LTE MNC")]
    pub sc_lte_mnc: Option<i32>,
    #[serde(rename = "SC NSA MNC")]
    pub sc_nsa_mnc: Option<i32>,
    #[serde(rename = "SC LTE CellId")]
    pub sc_lte_cell_id: Option<String>,
    #[serde(rename = "SC LTE PCID")]
    pub sc_lte_pcid: Option<i32>,
    #[serde(rename = "SC NSA PCID")]
    pub sc_nsa_pcid: Option<i32>,
    #[serde(rename = "SC LTE EARFCN")]
    pub sc_lte_earfcn: Option<i32>,
    #[serde(rename = "SC NSA ARFCN")]
    pub sc_nsa_arfcn: Option<i32>,
    #[serde(rename = "SC LTE Band")]
    pub sc_lte_band: Option<i32>,
    #[serde(rename = "SC NSA Band")]
    pub sc_nsa_band: Option<i32>,
    #[serde(rename = "SC LTE UL Bandwidth")]
    pub sc_lte_ul_bandwidth: Option<f64>,
    #[serde(rename = "SC LTE DL Bandwidth")]
    pub sc_lte_dl_bandwidth: Option<f64>,
    #[serde(rename = "SC LTE TAC")]
    pub sc_lte_tac: Option<String>,
    #[serde(rename = "SC LTE RSRP")]
    pub sc_lte_rsrp: Option<i32>,
    #[serde(rename = "SC NSA RSRP")]
    pub sc_nsa_rsrp: Option<i32>,
    #[serde(rename = "SC LTE RSRQ")]
    pub sc_lte_rsrq: Option<i32>,
    #[serde(rename = "SC NSA RSRQ")]
    pub sc_nsa_rsrq: Option<i32>,
    #[serde(rename = "SC LTE RSSI")]
    pub sc_lte_rssi: Option<i32>,
    #[serde(rename = "SC LTE SINR")]
    pub sc_lte_sinr: Option<i32>,
    #[serde(rename = "SC NSA SINR")]
    pub sc_nsa_sinr: Option<i32>,
    #[serde(rename = "SC LTE CQI")]
    pub sc_lte_cqi: Option<i32>,
    #[serde(rename = "SC LTE TxPwr")]
    pub sc_lte_tx_power: Option<i32>,

    // AT+QRSRP, one reading per receive antenna
    #[serde(rename = "PRX")]
    pub prx: Option<i32>,
    #[serde(rename = "DRX")]
    pub drx: Option<i32>,
    #[serde(rename = "RX2")]
    pub rx2: Option<i32>,
    #[serde(rename = "RX3")]
    pub rx3: Option<i32>,

    // AT+QCAINFO
    #[serde(rename = "CA")]
    pub carrier_components: Vec<CarrierComponent>,
    #[serde(rename = "CA Cnt")]
    pub carrier_count: usize,
    #[serde(rename = "CA Tot Bandwidth")]
    pub carrier_total_bandwidth: f64,

    // AT+QNWPREFCFG="mode_pref"
    #[serde(rename = "Mode Pref")]
    pub mode_pref: Option<String>,

    // AT+CREG?
    #[serde(rename = "Reg State")]
    pub registration_state: Option<String>,

    // AT+COPS?
    #[serde(rename = "Oper")]
    pub operator: Option<String>,
    #[serde(rename = "AcT")]
    pub access_technology: Option<String>,

    // AT+QENDC
    #[serde(rename = "5G Icon")]
    pub five_g_icon: Option<bool>,

    // ping
    #[serde(rename = "Ping Pkt Loss")]
    pub ping_packet_loss: Option<u32>,
    #[serde(rename = "Ping Min")]
    pub ping_min: Option<f64>,
    #[serde(rename = "Ping Max")]
    pub ping_max: Option<f64>,
    #[serde(rename = "Ping Avg")]
    pub ping_avg: Option<f64>,
    #[serde(rename = "Ping Jitter")]
    pub ping_jitter: Option<f64>,
}

impl Record {
    /// Create an empty record with every field unobserved
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the record carries the capture time required for emission
    pub fn is_emittable(&self) -> bool {
        self.time.is_some()
    }
}

/// Whether a component is the primary or a secondary carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentType {
    /// Primary component carrier
    #[serde(rename = "PCC")]
    Primary,
    /// Secondary component carrier
    #[serde(rename = "SCC")]
    Secondary,
}

impl ComponentType {
    /// Parse the component type label reported by AT+QCAINFO
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "PCC" => Some(ComponentType::Primary),
            "SCC" => Some(ComponentType::Secondary),
            _ => None,
        }
    }
}

/// Cell state of a carrier component, keyed by the kind of cell
///
/// Serializes into the enclosing component as either a `PCell State` or an
/// `SCell State` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellState {
    #[serde(rename = "PCell State")]
    Primary(String),
    #[serde(rename = "SCell State")]
    Secondary(String),
}

/// One aggregated carrier observed within a section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarrierComponent {
    #[serde(rename = "Type")]
    pub component_type: ComponentType,
    #[serde(rename = "EARFCN")]
    pub earfcn: i32,
    /// Channel bandwidth in MHz
    #[serde(rename = "Bandwidth")]
    pub bandwidth: f64,
    #[serde(rename = "Band")]
    pub band: i32,
    #[serde(flatten)]
    pub state: CellState,
    /// Physical cell id, kept verbatim as reported
    #[serde(rename = "PCID")]
    pub pcid: String,
    #[serde(rename = "RSRP")]
    pub rsrp: i32,
    #[serde(rename = "RSRQ")]
    pub rsrq: i32,
    #[serde(rename = "RSSI")]
    pub rssi: i32,
    #[serde(rename = "SINR")]
    pub sinr: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_component() -> CarrierComponent {
        CarrierComponent {
            component_type: ComponentType::Secondary,
            earfcn: 66786,
            bandwidth: 20.0,
            band: 66,
            state: CellState::Secondary("Configured Activated".to_string()),
            pcid: "301".to_string(),
            rsrp: -95,
            rsrq: -11,
            rssi: -66,
            sinr: 9,
        }
    }

    #[test]
    fn test_empty_record_serializes_nulls() {
        let json: Value = serde_json::to_value(Record::new()).unwrap();
        let object = json.as_object().unwrap();

        assert!(object["Deg"].is_null());
        assert!(object["Time"].is_null());
        assert!(object["Ping Jitter"].is_null());
        assert_eq!(object["CA"], Value::Array(vec![]));
        assert_eq!(object["CA Cnt"], 0);
    }

    #[test]
    fn test_record_key_order() {
        let json = serde_json::to_string(&Record::new()).unwrap();
        let deg = json.find("\"Deg\"").unwrap();
        let time = json.find("\"Time\"").unwrap();
        let ca = json.find("\"CA\"").unwrap();
        let jitter = json.find("\"Ping Jitter\"").unwrap();

        assert!(deg < time);
        assert!(time < ca);
        assert!(ca < jitter);
        assert!(json.starts_with("{\"Deg\":null,\"Time\":null,\"Temp\":null"));
    }

    #[test]
    fn test_component_state_key_depends_on_type() {
        let json: Value = serde_json::to_value(sample_component()).unwrap();
        assert_eq!(json["Type"], "SCC");
        assert_eq!(json["SCell State"], "Configured Activated");
        assert!(json.get("PCell State").is_none());

        let mut primary = sample_component();
        primary.component_type = ComponentType::Primary;
        primary.state = CellState::Primary("Registered".to_string());
        let json: Value = serde_json::to_value(primary).unwrap();
        assert_eq!(json["Type"], "PCC");
        assert_eq!(json["PCell State"], "Registered");
    }

    #[test]
    fn test_component_type_from_label() {
        assert_eq!(ComponentType::from_label("PCC"), Some(ComponentType::Primary));
        assert_eq!(ComponentType::from_label("SCC"), Some(ComponentType::Secondary));
        assert_eq!(ComponentType::from_label("XCC"), None);
    }

    #[test]
    fn test_is_emittable() {
        let mut record = Record::new();
        record.deg = Some(90);
        assert!(!record.is_emittable());

        record.time = Some("2021-06-01T10:00:00.000000".to_string());
        assert!(record.is_emittable());
    }
}
