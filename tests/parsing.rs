use std::fs;
use std::path::PathBuf;

use scout_compare::fetch::parse_records_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_plain_data_envelope_and_skips_non_objects() {
    let rows = parse_records_json(&read_fixture("centre_back_statistics.json"))
        .expect("fixture should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["blabla_stp"], "a");
}

#[test]
fn parses_success_envelope() {
    let rows =
        parse_records_json(&read_fixture("centre_back_graphic.json")).expect("fixture should parse");
    assert_eq!(rows.len(), 2);
    // Opaque field names survive untouched.
    assert!(rows[0].contains_key("KazanTop/90"));
    assert!(rows[0].contains_key("Pas%"));
}

#[test]
fn reported_failure_is_an_error() {
    let err = parse_records_json(&read_fixture("failure.json")).expect_err("should fail");
    assert!(format!("{err:#}").contains("database unavailable"));
}

#[test]
fn missing_or_wrong_data_is_an_error() {
    assert!(parse_records_json("{}").is_err());
    assert!(parse_records_json(r#"{"data": {"player_id": 1}}"#).is_err());
    assert!(parse_records_json("not json").is_err());
    assert!(parse_records_json(r#"{"data": []}"#).expect("empty ok").is_empty());
}
