//! Attendance record validation
//!
//! A class's attendance column is a list of per-date records:
//!
//! ```json
//! [
//!     {"date": "2021-04-19", "attendees": [1, 2, 3]},
//!     {"date": "2021-04-26", "attendees": [1, 3]}
//! ]
//! ```
//!
//! Dates must be calendar-valid `YYYY-MM-DD` strings and every attendee id
//! must name an existing student.
//!
//! Copyright (c) 2025 Rollbook Team
//! Licensed under the MIT OR Apache-2.0 license

use crate::validation::context::ValuePath;
use crate::validation::error::{Result, RuleCode, ValidationError};
use crate::validation::schema::Schema;
use chrono::NaiveDate;
use rollbook_core::{StudentId, StudentLookup};
use serde_json::Value;

/// The one date format attendance accepts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn attendance_schema() -> Schema {
    Schema::list(Schema::object([
        ("date", Schema::Str),
        ("attendees", Schema::list(Schema::Int)),
    ]))
}

/// Validates a class's attendance list against the student roster.
pub struct AttendanceValidator<'a, S> {
    students: &'a S,
}

impl<'a, S: StudentLookup> AttendanceValidator<'a, S> {
    pub fn new(students: &'a S) -> Self {
        Self { students }
    }

    /// Check structure, date format, and attendee existence, in that
    /// order. The first violation wins.
    pub fn validate(&self, records: &Value) -> Result<()> {
        let path = ValuePath::root();
        let Some(items) = records.as_array().filter(|_| attendance_schema().matches(records))
        else {
            return Err(ValidationError::new(
                path,
                RuleCode::InvalidSchema,
                "attendance must be a list of {date, attendees} records",
            )
            .into());
        };

        for (index, record) in items.iter().enumerate() {
            let record_path = path.index(index);

            // Schema conformance above guarantees both keys are present
            // and typed; the defaults are unreachable.
            let date = record.get("date").and_then(Value::as_str).unwrap_or_default();
            if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
                return Err(ValidationError::new(
                    record_path.child("date"),
                    RuleCode::InvalidDate,
                    format!("'{date}' must be formatted as YYYY-MM-DD and must be a valid date"),
                )
                .into());
            }

            let attendees: Vec<StudentId> = record
                .get("attendees")
                .and_then(Value::as_array)
                .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
                .unwrap_or_default();
            if attendees.is_empty() {
                continue;
            }

            let existing = self.students.existing_students(&attendees)?;
            let missing: Vec<StudentId> = attendees
                .iter()
                .copied()
                .filter(|id| !existing.contains(id))
                .collect();
            if !missing.is_empty() {
                return Err(ValidationError::new(
                    record_path.child("attendees"),
                    RuleCode::UnknownReference,
                    format!("no student records for attendee ids {missing:?}"),
                )
                .into());
            }
        }

        Ok(())
    }
}
