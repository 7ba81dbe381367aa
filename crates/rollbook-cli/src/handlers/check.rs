//! Whole-dataset check handler
//!
//! Runs every applicable validator over every record in a dataset and
//! reports one finding per failed record. Unlike single-payload
//! validation, the sweep does not stop at the first failure: the point is
//! a full consistency report.

use crate::cli::{CheckArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::handlers::utils;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use rollbook_core::MemoryDataset;
use rollbook_schemas::{
    validate_attendance, validate_enrolment, validate_family_parent, validate_field_options,
    validate_fields, validate_information_role, validate_students_in_family, RuleCode,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

/// One failed record in a dataset sweep.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Which record failed, e.g. `"class 200"`.
    pub record: String,
    /// The violated rule, when the failure was a validation failure.
    pub code: Option<RuleCode>,
    pub message: String,
}

impl Finding {
    fn new(record: String, error: rollbook_schemas::Error) -> Self {
        Self {
            record,
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Handle the check command
#[instrument(skip(args, _config, output), fields(file = %args.dataset.display()))]
pub fn handle_check(
    args: CheckArgs,
    _config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("check_command");
    output.info(&format!("Checking dataset: {}", args.dataset.display()))?;

    let dataset = utils::load_dataset(&args.dataset)?;
    let findings = run_checks(&dataset);
    info!(findings = findings.len(), "dataset sweep finished");

    if findings.is_empty() {
        output.success("✓ Dataset is consistent")?;
        return Ok(());
    }

    output.error(&format!("✗ {} validation finding(s)", findings.len()))?;
    match output.format() {
        OutputFormat::Human => {
            for finding in &findings {
                output.error(&format!("  {}: {}", finding.record, finding.message))?;
            }
        }
        _ => output.data(&findings)?,
    }

    Err(Error::ChecksFailed {
        count: findings.len(),
    })
}

/// Sweep every record kind through its validator.
pub fn run_checks(dataset: &MemoryDataset) -> Vec<Finding> {
    let mut findings = Vec::new();

    for family in dataset.families() {
        if let Some(parent) = family.parent {
            if let Err(err) = validate_family_parent(parent, dataset) {
                findings.push(Finding::new(format!("family {}", family.id), err));
            }
        }
    }

    for student in dataset.students() {
        if let Err(err) = validate_information_role(&student.information, student.role, dataset)
        {
            findings.push(Finding::new(format!("student {}", student.id), err));
        }
    }

    for field in dataset.fields() {
        if let Err(err) = validate_field_options(field) {
            findings.push(Finding::new(format!("field {}", field.id), err.into()));
        }
    }

    for session in dataset.sessions() {
        let ids = Value::Array(session.fields.iter().map(|id| Value::from(*id)).collect());
        if let Err(err) = validate_fields(&ids, dataset) {
            findings.push(Finding::new(format!("session {}", session.id), err));
        }
    }

    for class in dataset.classes() {
        if let Err(err) = validate_attendance(&class.attendance, dataset) {
            findings.push(Finding::new(format!("class {}", class.id), err));
        }
    }

    for enrolment in dataset.enrolments() {
        let result = validate_enrolment(enrolment, dataset, dataset).and_then(|_| {
            validate_students_in_family(&enrolment.students, enrolment.family, dataset)
        });
        if let Err(err) = result {
            findings.push(Finding::new(format!("enrolment {}", enrolment.id), err));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset(value: Value) -> MemoryDataset {
        MemoryDataset::from_value(value).unwrap()
    }

    #[test]
    fn test_clean_dataset_has_no_findings() {
        let dataset = dataset(json!({
            "students": [
                {"id": 1, "first_name": "Merlin", "last_name": "Fish", "role": "Parent",
                 "family": 10, "information": {"7": "1989-04-12"}}
            ],
            "families": [{"id": 10, "parent": 1}],
            "fields": [
                {"id": 7, "scope": "Parent", "name": "DOB", "question": "Date of birth?",
                 "question_type": "Text"}
            ],
            "sessions": [{"id": 100, "name": "Fall 2021", "fields": [7]}],
            "classes": [
                {"id": 200, "name": "Tues/Thurs", "session": 100,
                 "attendance": [{"date": "2021-04-19", "attendees": [1]}]}
            ],
            "enrolments": [
                {"id": 300, "active": true, "family": 10, "session": 100,
                 "enrolled_class": 200, "status": "Class allocated", "students": [1]}
            ]
        }));
        assert!(run_checks(&dataset).is_empty());
    }

    #[test]
    fn test_each_violation_becomes_one_finding() {
        let dataset = dataset(json!({
            "students": [
                // Child answering a parent question.
                {"id": 1, "first_name": "Nemo", "last_name": "Fish", "role": "Child",
                 "family": 10, "information": {"7": "no"}}
            ],
            "families": [
                // Head of family is a Child.
                {"id": 10, "parent": 1}
            ],
            "fields": [
                {"id": 7, "scope": "Parent", "name": "DOB", "question": "Date of birth?",
                 "question_type": "Text"},
                // Choice question with no options.
                {"id": 8, "scope": "Child", "name": "Allergies", "question": "Allergies?",
                 "question_type": "MultipleChoice"}
            ],
            "sessions": [
                // References a field that does not exist.
                {"id": 100, "name": "Fall 2021", "fields": [99]}
            ],
            "classes": [
                // Bad attendance date.
                {"id": 200, "name": "Tues/Thurs", "session": 100,
                 "attendance": [{"date": "2021/04/19", "attendees": []}]}
            ],
            "enrolments": []
        }));

        let findings = run_checks(&dataset);
        let records: Vec<&str> = findings.iter().map(|f| f.record.as_str()).collect();
        assert_eq!(
            records,
            vec!["family 10", "student 1", "field 8", "session 100", "class 200"]
        );
        assert_eq!(findings[0].code, Some(RuleCode::NotAParent));
        assert_eq!(findings[1].code, Some(RuleCode::InvalidFieldForRole));
        assert_eq!(findings[2].code, Some(RuleCode::InvalidFieldOptions));
        assert_eq!(findings[3].code, Some(RuleCode::UnknownReference));
        assert_eq!(findings[4].code, Some(RuleCode::InvalidDate));
    }

    #[test]
    fn test_duplicate_enrolments_both_reported() {
        let dataset = dataset(json!({
            "families": [{"id": 10}],
            "sessions": [{"id": 100, "name": "Fall 2021"}],
            "enrolments": [
                {"id": 300, "family": 10, "session": 100},
                {"id": 301, "family": 10, "session": 100}
            ]
        }));
        let findings = run_checks(&dataset);
        assert_eq!(findings.len(), 2);
        assert!(findings
            .iter()
            .all(|f| f.code == Some(RuleCode::DuplicateEnrolment)));
    }
}
