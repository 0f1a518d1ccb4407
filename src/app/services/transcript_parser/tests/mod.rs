//! Test utilities and transcript fixtures for transcript parser testing
//!
//! This module provides sample transcript sections and helpers shared across
//! the test modules.

use crate::app::models::Record;
use crate::app::services::record_writer::JsonLinesWriter;
use crate::app::services::transcript_parser::{ParseStats, TranscriptParser};

mod parser_tests;

pub const DELIMITER: &str = "===================";

/// Modem and probe output for one polling interval on an NSA connection
pub fn nsa_cycle_lines(time: &str, heading: u16) -> Vec<String> {
    vec![
        format!("Current time: {}", time),
        format!("Current heading: {}", heading),
        "ssh: ~/atcmd-locked 1 --device /dev/ttyUSB2 --cmds 'AT+QTEMP' 'AT+CSQ'".to_string(),
        "AT+QTEMP".to_string(),
        "0: ".to_string(),
        r#"1: +QTEMP:"qfe_wtr_pa0","35""#.to_string(),
        r#"2: +QTEMP:"mdm-q6-usr","41""#.to_string(),
        "3: ".to_string(),
        "4: OK".to_string(),
        "AT+CSQ".to_string(),
        "1: +CSQ: 20,0".to_string(),
        r#"AT+QENG="servingcell""#.to_string(),
        r#"1: +QENG: "servingcell","NOCONN""#.to_string(),
        r#"2: +QENG: "LTE","FDD",310,260,1A2B3C4,123,5110,12,3,3,2F4E,-95,-10,-65,12,9,-5,-"#
            .to_string(),
        r#"3: +QENG: "NR5G-NSA",310,260,501,-88,20,-11,632448,77"#.to_string(),
        "AT+QRSRP".to_string(),
        "1: +QRSRP: -95,-98,-140,-140,LTE".to_string(),
        "AT+QCAINFO".to_string(),
        r#"1: +QCAINFO: "PCC",5110,3,"LTE BAND 12",1,123,-95,-10,-65,12"#.to_string(),
        r#"2: +QCAINFO: "SCC",66786,100,"LTE BAND 66",2,301,-101,-12,-70,5"#.to_string(),
        r#"AT+QNWPREFCFG="mode_pref""#.to_string(),
        r#"1: +QNWPREFCFG: "mode_pref",AUTO"#.to_string(),
        "AT+CREG?".to_string(),
        "1: +CREG: 0,1".to_string(),
        "AT+COPS?".to_string(),
        r#"1: +COPS: 0,0,"T-Mobile",13"#.to_string(),
        "AT+QENDC".to_string(),
        "1: +QENDC: 0,1,1,1".to_string(),
        "ssh: ping 8.8.8.8 -c 4".to_string(),
        "PING 8.8.8.8 (8.8.8.8): 56 data bytes".to_string(),
        "64 bytes from 8.8.8.8: seq=0 ttl=115 time=10.0 ms".to_string(),
        "64 bytes from 8.8.8.8: seq=1 ttl=115 time=12.0 ms".to_string(),
        "64 bytes from 8.8.8.8: seq=2 ttl=115 time=11.0 ms".to_string(),
        "".to_string(),
        "--- 8.8.8.8 ping statistics ---".to_string(),
        "4 packets transmitted, 3 packets received, 25% packet loss".to_string(),
        "round-trip min/avg/max = 10.0/11.0/12.0 ms".to_string(),
    ]
}

/// Minimal polling interval: capture time, heading, three pings and a summary
pub fn ping_cycle_lines(time: &str, heading: u16, loss: u32) -> Vec<String> {
    vec![
        format!("Current time: {}", time),
        format!("Current heading: {}", heading),
        "64 bytes from 8.8.8.8: seq=0 ttl=115 time=10.0 ms".to_string(),
        "64 bytes from 8.8.8.8: seq=1 ttl=115 time=12.0 ms".to_string(),
        "64 bytes from 8.8.8.8: seq=2 ttl=115 time=11.0 ms".to_string(),
        format!("3 packets transmitted, 3 packets received, {}% packet loss", loss),
    ]
}

/// Join sections into a transcript the way the producer writes it
pub fn transcript(sections: &[Vec<String>]) -> String {
    let mut out = String::new();
    for lines in sections {
        out.push_str(DELIMITER);
        out.push('\n');
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Parse a transcript into records with the default parser
pub fn parse_records(input: &str) -> (Vec<Record>, ParseStats) {
    let parser = TranscriptParser::with_defaults().unwrap();
    let mut records = Vec::new();
    let stats = parser.run(input.as_bytes(), &mut records).unwrap();
    (records, stats)
}

/// Parse a transcript into newline-delimited JSON with the default parser
pub fn parse_to_json(input: &str) -> String {
    let parser = TranscriptParser::with_defaults().unwrap();
    let mut writer = JsonLinesWriter::new(Vec::new());
    parser.run(input.as_bytes(), &mut writer).unwrap();
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}
