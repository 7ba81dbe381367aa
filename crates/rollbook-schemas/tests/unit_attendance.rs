//! Unit tests for attendance validation

use rollbook_core::MemoryDataset;
use rollbook_schemas::{validate_attendance, RuleCode};
use serde_json::json;

fn roster() -> MemoryDataset {
    MemoryDataset::from_value(json!({
        "students": [
            {"id": 1, "first_name": "Brittany", "last_name": "Buckets", "role": "Parent"},
            {"id": 2, "first_name": "Buckets", "last_name": "Jr", "role": "Child"}
        ]
    }))
    .unwrap()
}

fn code_of(result: rollbook_schemas::Result<()>) -> RuleCode {
    result.unwrap_err().code().expect("expected a validation failure")
}

#[test]
fn test_attendance_date_format() {
    let roster = roster();
    let dashes = json!([{"date": "2021-04-19", "attendees": []}]);
    let slashes = json!([{"date": "2021/04/19", "attendees": []}]);
    let not_a_date = json!([{"date": "2021-99-99", "attendees": []}]);

    assert!(validate_attendance(&dashes, &roster).is_ok());
    assert_eq!(code_of(validate_attendance(&slashes, &roster)), RuleCode::InvalidDate);
    assert_eq!(
        code_of(validate_attendance(&not_a_date, &roster)),
        RuleCode::InvalidDate
    );
}

#[test]
fn test_attendees_exist() {
    let roster = roster();
    let known = json!([{"date": "2021-04-19", "attendees": [1, 2]}]);
    let unknown = json!([{"date": "2021-04-19", "attendees": [999]}]);
    let mixed = json!([{"date": "2021-04-19", "attendees": [1, 2, 999]}]);

    assert!(validate_attendance(&known, &roster).is_ok());
    assert_eq!(
        code_of(validate_attendance(&unknown, &roster)),
        RuleCode::UnknownReference
    );
    assert_eq!(
        code_of(validate_attendance(&mixed, &roster)),
        RuleCode::UnknownReference
    );
}

#[test]
fn test_empty_attendees_skip_existence_check() {
    // An empty roster still accepts records with no attendees.
    let empty = MemoryDataset::new();
    let records = json!([{"date": "2021-04-19", "attendees": []}]);
    assert!(validate_attendance(&records, &empty).is_ok());
}

#[test]
fn test_malformed_records_fail_schema_first() {
    let roster = roster();
    for bad in [
        json!({"date": "2021-04-19", "attendees": []}),
        json!([{"date": "2021-04-19"}]),
        json!([{"date": 20210419, "attendees": []}]),
        json!([{"date": "2021-04-19", "attendees": [1, "2"]}]),
    ] {
        assert_eq!(
            code_of(validate_attendance(&bad, &roster)),
            RuleCode::InvalidSchema,
            "expected schema failure for {bad}"
        );
    }
}

#[test]
fn test_first_bad_record_wins() {
    let roster = roster();
    let records = json!([
        {"date": "2021-04-19", "attendees": [1]},
        {"date": "2021-13-01", "attendees": [999]},
    ]);
    // Both the date and the attendee of record 1 are bad; the date is
    // checked first.
    let error = validate_attendance(&records, &roster).unwrap_err();
    match error {
        rollbook_schemas::Error::Validation(e) => {
            assert_eq!(e.code, RuleCode::InvalidDate);
            assert_eq!(e.path, "$[1].date");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_extra_record_keys_are_tolerated() {
    let roster = roster();
    let records = json!([
        {"date": "2021-04-19", "attendees": [1], "note": "make-up class"}
    ]);
    assert!(validate_attendance(&records, &roster).is_ok());
}
