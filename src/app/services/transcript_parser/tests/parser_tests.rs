//! Tests for the section lifecycle and record emission

use serde_json::Value;

use super::{
    DELIMITER, nsa_cycle_lines, parse_records, parse_to_json, ping_cycle_lines, transcript,
};
use crate::Error;
use crate::app::models::{ComponentType, Record};
use crate::app::services::transcript_parser::{
    JitterFormula, LineShape, SectionAccumulator, TranscriptParser,
};
use crate::config::ParsingConfig;

#[test]
fn test_full_section_record() {
    let input = transcript(&[nsa_cycle_lines("2021-06-01T10:00:00.000000", 90)]);
    let (records, _) = parse_records(&input);
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.time.as_deref(), Some("2021-06-01T10:00:00.000000"));
    assert_eq!(record.deg, Some(90));
    assert_eq!(record.temp, Some(41));
    assert_eq!(record.rssi, Some(-73));
    assert_eq!(record.bit_error_rate, Some(0.14));
    assert_eq!(record.sc_state.as_deref(), Some("NOCONN"));
    assert_eq!(record.sc_mode.as_deref(), Some("NR5G-NSA"));
    assert_eq!(record.sc_lte_band, Some(12));
    assert_eq!(record.sc_nsa_band, Some(77));
    assert_eq!(record.prx, Some(-95));
    assert_eq!(record.rx3, Some(-140));
    assert_eq!(record.mode_pref.as_deref(), Some("AUTO"));
    assert_eq!(
        record.registration_state.as_deref(),
        Some("Registered Home Network")
    );
    assert_eq!(record.operator.as_deref(), Some("T-Mobile"));
    assert_eq!(
        record.access_technology.as_deref(),
        Some("E-UTRAN-NR dual connect")
    );
    assert_eq!(record.five_g_icon, Some(true));

    assert_eq!(record.carrier_count, 2);
    assert_eq!(record.carrier_total_bandwidth, 30.0);
    assert_eq!(
        record.carrier_components[0].component_type,
        ComponentType::Primary
    );
    assert_eq!(
        record.carrier_components[1].component_type,
        ComponentType::Secondary
    );

    assert_eq!(record.ping_packet_loss, Some(25));
    assert_eq!(record.ping_min, Some(10.0));
    assert_eq!(record.ping_max, Some(12.0));
    assert_eq!(record.ping_avg, Some(11.0));
    assert_eq!(record.ping_jitter, Some(0.0));
}

#[test]
fn test_two_sections_end_to_end() {
    let input = transcript(&[
        ping_cycle_lines("2021-06-01T10:00:00.000000", 0, 0),
        ping_cycle_lines("2021-06-01T10:00:30.000000", 10, 25),
    ]);
    let output = parse_to_json(&input);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(output.ends_with('\n'));

    let first: Value = serde_json::from_str(lines[0]).unwrap();
    let second: Value = serde_json::from_str(lines[1]).unwrap();

    assert_eq!(first["Deg"], 0);
    assert_eq!(second["Deg"], 10);
    assert_eq!(first["Ping Pkt Loss"], 0);
    assert_eq!(second["Ping Pkt Loss"], 25);
    for record in [&first, &second] {
        assert_eq!(record["Ping Min"], 10.0);
        assert_eq!(record["Ping Max"], 12.0);
        assert_eq!(record["Ping Avg"], 11.0);
        assert_eq!(record["CA Cnt"], 0);
        assert_eq!(record["CA Tot Bandwidth"], 0.0);
        assert_eq!(record["CA"], Value::Array(vec![]));
        assert!(record["Temp"].is_null());
        assert!(record["BitErrorRate"].is_null());
    }
}

#[test]
fn test_output_is_deterministic() {
    let input = transcript(&[
        nsa_cycle_lines("2021-06-01T10:00:00.000000", 0),
        ping_cycle_lines("2021-06-01T10:00:30.000000", 10, 0),
        nsa_cycle_lines("2021-06-01T10:01:00.000000", 20),
    ]);
    let first = parse_to_json(&input);
    let second = parse_to_json(&input);
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 3);
}

#[test]
fn test_output_key_order() {
    let input = transcript(&[ping_cycle_lines("2021-06-01T10:00:00.000000", 45, 0)]);
    let output = parse_to_json(&input);
    assert!(output.starts_with(r#"{"Deg":45,"Time":"2021-06-01T10:00:00.000000","Temp":null"#));
    assert!(output.contains(r#""CA":[],"CA Cnt":0,"CA Tot Bandwidth":0.0,"#));
    assert!(output.trim_end().ends_with(r#""Ping Jitter":0.0}"#));
}

#[test]
fn test_section_without_time_is_discarded() {
    let mut untimed = nsa_cycle_lines("2021-06-01T10:00:00.000000", 90);
    untimed.remove(0);

    let input = transcript(&[
        untimed,
        ping_cycle_lines("2021-06-01T10:00:30.000000", 100, 0),
    ]);
    let (records, stats) = parse_records(&input);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].deg, Some(100));
    // leading empty section plus the untimed one
    assert_eq!(stats.sections_total, 3);
    assert_eq!(stats.sections_discarded, 2);
    assert_eq!(stats.records_emitted, 1);
}

#[test]
fn test_untimed_section_does_not_leak_into_next() {
    let mut untimed = nsa_cycle_lines("2021-06-01T10:00:00.000000", 90);
    untimed.remove(0);

    let input = transcript(&[
        untimed,
        vec!["Current time: 2021-06-01T10:00:30.000000".to_string()],
    ]);
    let (records, _) = parse_records(&input);

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.deg, None);
    assert_eq!(record.temp, None);
    assert_eq!(record.carrier_count, 0);
    assert_eq!(record.ping_min, None);
}

#[test]
fn test_no_leakage_between_sections() {
    let input = transcript(&[
        nsa_cycle_lines("2021-06-01T10:00:00.000000", 0),
        ping_cycle_lines("2021-06-01T10:00:30.000000", 10, 0),
    ]);
    let (records, _) = parse_records(&input);
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].temp, Some(41));
    assert_eq!(records[0].carrier_count, 2);

    let second = &records[1];
    assert_eq!(second.temp, None);
    assert_eq!(second.rssi, None);
    assert_eq!(second.sc_mode, None);
    assert_eq!(second.carrier_count, 0);
    assert!(second.carrier_components.is_empty());
    assert_eq!(second.carrier_total_bandwidth, 0.0);
    assert_eq!(second.ping_packet_loss, Some(0));
}

#[test]
fn test_transcript_without_delimiters() {
    let input = ping_cycle_lines("2021-06-01T10:00:00.000000", 0, 0).join("\n");
    let (records, stats) = parse_records(&input);
    assert_eq!(records.len(), 1);
    assert_eq!(stats.sections_total, 1);
}

#[test]
fn test_empty_transcript() {
    let (records, stats) = parse_records("");
    assert!(records.is_empty());
    assert_eq!(stats.sections_total, 1);
    assert_eq!(stats.sections_discarded, 1);
    assert_eq!(stats.emission_rate(), 0.0);
}

#[test]
fn test_trailing_partial_section() {
    let mut input = transcript(&[ping_cycle_lines("2021-06-01T10:00:00.000000", 0, 0)]);
    input.push_str(DELIMITER);
    input.push_str("\nCurrent heading: 10\n64 bytes from 8.8.8.8: seq=0 ttl=115 time=9.0 ms\n");

    let (records, stats) = parse_records(&input);
    assert_eq!(records.len(), 1);
    assert_eq!(stats.sections_discarded, 2);
}

#[test]
fn test_unrecognized_code_is_fatal_with_line_number() {
    // line 1 delimiter, lines 2-7 first section, line 8 delimiter
    let mut input = transcript(&[ping_cycle_lines("2021-06-01T10:00:00.000000", 0, 0)]);
    input.push_str(DELIMITER);
    input.push_str("\nCurrent time: 2021-06-01T10:00:30.000000\n1: +CSQ: 20,12\n");

    let parser = TranscriptParser::with_defaults().unwrap();
    let mut records: Vec<Record> = Vec::new();
    let err = parser.run(input.as_bytes(), &mut records).unwrap_err();

    match &err {
        Error::Extraction {
            line_number,
            line,
            source,
        } => {
            assert_eq!(*line_number, 10);
            assert_eq!(line, "1: +CSQ: 20,12");
            assert!(matches!(**source, Error::UnrecognizedCode { table: "bit error rate", .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_mapping_failure());

    // records from earlier sections were already written
    assert_eq!(records.len(), 1);
}

#[test]
fn test_process_lines_relative_line_numbers() {
    let parser = TranscriptParser::with_defaults().unwrap();
    let lines = [
        "Current time: 2021-06-01T10:00:00",
        "AT+QCAINFO",
        r#"1: +QCAINFO: "PCC",5110,7,"LTE BAND 12",1,123,-95,-10,-65,12"#,
    ];
    let err = parser.process_lines(&lines).unwrap_err();
    assert!(matches!(err, Error::Extraction { line_number: 3, .. }));
}

#[test]
fn test_process_lines_returns_record() {
    let parser = TranscriptParser::with_defaults().unwrap();
    let lines = ping_cycle_lines("2021-06-01T10:00:00.000000", 180, 0);
    let record = parser.process_lines(&lines).unwrap().unwrap();
    assert_eq!(record.deg, Some(180));

    let untimed = &lines[1..];
    assert!(parser.process_lines(untimed).unwrap().is_none());
}

#[test]
fn test_parser_shapes_follow_priority() {
    let parser = TranscriptParser::with_defaults().unwrap();
    let shapes: Vec<LineShape> = parser.shapes().collect();
    assert_eq!(shapes, LineShape::PRIORITY.to_vec());
}

#[test]
fn test_garbled_rssi_is_fatal() {
    let parser = TranscriptParser::with_defaults().unwrap();
    let lines = ["Current time: 2021-06-01T10:00:00", "1: +CSQ: 2000000000,0"];
    let err = parser.process_lines(&lines).unwrap_err();
    match err {
        Error::Extraction {
            line_number,
            source,
            ..
        } => {
            assert_eq!(line_number, 2);
            assert!(matches!(*source, Error::UnrecognizedCode { table: "RSSI", .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_corrected_jitter_formula() {
    let config = ParsingConfig {
        jitter_formula: JitterFormula::Corrected,
    };
    let parser = TranscriptParser::new(&config).unwrap();
    assert_eq!(parser.jitter_formula(), JitterFormula::Corrected);

    let lines = ping_cycle_lines("2021-06-01T10:00:00.000000", 0, 0);
    let record = parser.process_lines(&lines).unwrap().unwrap();
    assert_eq!(record.ping_jitter, Some(1.5));

    let legacy = TranscriptParser::with_defaults().unwrap();
    let record = legacy.process_lines(&lines).unwrap().unwrap();
    assert_eq!(record.ping_jitter, Some(0.0));
}

#[test]
fn test_component_line_is_offered_to_every_collector() {
    let parser = TranscriptParser::with_defaults().unwrap();
    let mut acc = SectionAccumulator::new();
    let outcome = parser
        .process_line(
            &mut acc,
            r#"1: +QCAINFO: "PCC",5110,3,"LTE BAND 12",1,123,-95,-10,-65,12"#,
        )
        .unwrap();
    assert_eq!(outcome.shape, None);
    assert!(outcome.component);
    assert!(!outcome.ping_sample);
    assert_eq!(acc.components().len(), 1);

    let outcome = parser.process_line(&mut acc, "1: +CREG: 0,1").unwrap();
    assert_eq!(outcome.shape, Some(LineShape::Registration));
    assert!(!outcome.component);
}

#[test]
fn test_stats_counts() {
    let lines = nsa_cycle_lines("2021-06-01T10:00:00.000000", 90);
    let input = transcript(&[lines.clone()]);
    let (_, stats) = parse_records(&input);

    assert_eq!(stats.sections_total, 2);
    assert_eq!(stats.records_emitted, 1);
    assert_eq!(stats.lines_total, lines.len());
    assert_eq!(stats.carrier_components, 2);
    assert_eq!(stats.ping_samples, 3);
    assert_eq!(stats.shape_matches.get("modem temperature"), Some(&1));
    assert_eq!(stats.shape_matches.get("ping summary"), Some(&1));
    assert_eq!(stats.shape_matches.get("WCDMA serving cell mode"), None);

    let matched: usize = stats.shape_matches.values().sum();
    assert_eq!(matched, 13);
    assert_eq!(stats.lines_unmatched, lines.len() - 13 - 2 - 3);
}

#[test]
fn test_stats_capture_window() {
    let input = transcript(&[
        ping_cycle_lines("2021-06-01T10:00:00.000000", 0, 0),
        ping_cycle_lines("2021-06-01T10:00:30.000000", 10, 0),
        ping_cycle_lines("2021-06-01T10:01:00.000000", 20, 0),
    ]);
    let (_, stats) = parse_records(&input);

    let window = stats.capture_window().unwrap();
    assert_eq!(window.start, "2021-06-01T10:00:00.000000");
    assert_eq!(window.end, "2021-06-01T10:01:00.000000");
    assert_eq!(window.duration.unwrap().num_seconds(), 60);
}

#[test]
fn test_progress_callback_per_section() {
    let input = transcript(&[
        ping_cycle_lines("2021-06-01T10:00:00.000000", 0, 0),
        ping_cycle_lines("2021-06-01T10:00:30.000000", 10, 0),
    ]);
    let parser = TranscriptParser::with_defaults().unwrap();
    let mut records: Vec<Record> = Vec::new();
    let mut seen = Vec::new();
    let stats = parser
        .run_with_progress(input.as_bytes(), &mut records, |stats| {
            seen.push(stats.sections_total)
        })
        .unwrap();

    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(stats.sections_total, 3);
}
