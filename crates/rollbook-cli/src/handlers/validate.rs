//! Validation command handler and payload-kind detection

use crate::cli::{PayloadKind, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::handlers::utils;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use rollbook_core::Enrolment;
use rollbook_schemas::{
    validate_attendance, validate_enrolment, validate_fields, validate_information_role,
    validate_students_in_family,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(args, config, output), fields(file = %args.payload.display()))]
pub fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("validate_command");
    info!("Starting payload validation");
    output.info(&format!("Validating payload: {}", args.payload.display()))?;

    let payload = utils::load_value(&args.payload)?;

    let dataset_path = args
        .dataset
        .clone()
        .or_else(|| config.paths.dataset.clone())
        .ok_or_else(|| {
            Error::invalid_args(
                "no dataset given; pass --dataset or set paths.dataset in the config",
            )
        })?;
    debug!(dataset = %dataset_path.display(), "loading dataset");
    let dataset = utils::load_dataset(&dataset_path)?;

    let kind = match args.kind {
        Some(kind) => kind,
        None => detect_payload_kind(&payload).ok_or_else(|| Error::InvalidFormat {
            path: args.payload.clone(),
            expected: "attendance, fields, information, or enrolment payload".to_string(),
        })?,
    };
    debug!(?kind, "dispatching payload");

    let result = match kind {
        PayloadKind::Attendance => {
            output.info("Detected attendance payload")?;
            validate_attendance(&payload, &dataset)
        }
        PayloadKind::Fields => {
            output.info("Detected field-reference payload")?;
            validate_fields(&payload, &dataset)
        }
        PayloadKind::Information => {
            output.info("Detected information payload")?;
            let role = args.role.ok_or_else(|| {
                Error::invalid_args("--role is required for information payloads")
            })?;
            validate_information_role(&payload, role.into(), &dataset)
        }
        PayloadKind::Enrolment => {
            output.info("Detected enrolment payload")?;
            let enrolment: Enrolment =
                serde_json::from_value(payload.clone()).map_err(|_| Error::InvalidFormat {
                    path: args.payload.clone(),
                    expected: "enrolment record".to_string(),
                })?;
            validate_enrolment(&enrolment, &dataset, &dataset).and_then(|_| {
                validate_students_in_family(&enrolment.students, enrolment.family, &dataset)
            })
        }
    };

    match result {
        Ok(()) => {
            info!("Payload validation succeeded");
            output.success("✓ Payload is valid")?;
            if args.detailed {
                output.section("Payload")?;
                output.data(&payload)?;
            }
            Ok(())
        }
        Err(err) => {
            warn!(%err, "payload validation failed");
            output.error("✗ Payload validation failed")?;
            if let rollbook_schemas::Error::Validation(e) = &err {
                output.validation_error(e)?;
            }
            if args.detailed {
                output.section("Failed Payload")?;
                output.data(&payload)?;
            }
            Err(err.into())
        }
    }
}

/// Guess what a payload is from its shape alone.
fn detect_payload_kind(value: &Value) -> Option<PayloadKind> {
    match value {
        Value::Array(items) => {
            if items
                .iter()
                .any(|item| item.as_object().is_some_and(|o| o.contains_key("date")))
            {
                return Some(PayloadKind::Attendance);
            }
            if !items.is_empty()
                && items
                    .iter()
                    .all(|item| matches!(item, Value::Number(n) if n.is_i64() || n.is_u64()))
            {
                return Some(PayloadKind::Fields);
            }
            if items.is_empty() {
                // Both list validators accept an empty list; attendance is
                // the more common payload.
                return Some(PayloadKind::Attendance);
            }
            None
        }
        Value::Object(map) => {
            if map.contains_key("session") && map.contains_key("family") {
                Some(PayloadKind::Enrolment)
            } else {
                Some(PayloadKind::Information)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{OutputFormat, RoleArg};
    use serde_json::json;
    use std::io::Write as _;
    use std::path::PathBuf;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    fn sink_output() -> OutputWriter {
        OutputWriter::with_writer(
            OutputFormat::Human,
            false,
            true,
            0,
            Box::new(std::io::sink()),
        )
    }

    fn roster_file() -> tempfile::NamedTempFile {
        write_temp(
            &json!({
                "students": [
                    {"id": 1, "first_name": "Merlin", "last_name": "Fish", "role": "Parent"}
                ],
                "fields": [
                    {"id": 7, "scope": "Parent", "name": "DOB",
                     "question": "Date of birth?", "question_type": "Text"}
                ]
            })
            .to_string(),
        )
    }

    fn args(payload: &tempfile::NamedTempFile, dataset: &tempfile::NamedTempFile) -> ValidateArgs {
        ValidateArgs {
            payload: payload.path().to_path_buf(),
            dataset: Some(dataset.path().to_path_buf()),
            kind: None,
            role: None,
            detailed: false,
        }
    }

    #[test]
    fn test_handle_validate_accepts_good_attendance() {
        let dataset = roster_file();
        let payload = write_temp(&json!([{"date": "2021-04-19", "attendees": [1]}]).to_string());
        let result = handle_validate(args(&payload, &dataset), &Config::default(), &mut sink_output());
        assert!(result.is_ok());
    }

    #[test]
    fn test_handle_validate_rejects_unknown_attendee() {
        let dataset = roster_file();
        let payload = write_temp(&json!([{"date": "2021-04-19", "attendees": [999]}]).to_string());
        let error = handle_validate(args(&payload, &dataset), &Config::default(), &mut sink_output())
            .unwrap_err();
        assert!(matches!(error, Error::Validation(_)));
    }

    #[test]
    fn test_handle_validate_information_requires_role() {
        let dataset = roster_file();
        let payload = write_temp(&json!({"7": "1989-04-12"}).to_string());
        let error = handle_validate(args(&payload, &dataset), &Config::default(), &mut sink_output())
            .unwrap_err();
        assert!(matches!(error, Error::InvalidArgs(_)));

        let mut with_role = args(&payload, &dataset);
        with_role.role = Some(RoleArg::Parent);
        assert!(
            handle_validate(with_role, &Config::default(), &mut sink_output()).is_ok()
        );
    }

    #[test]
    fn test_handle_validate_requires_some_dataset() {
        let payload = write_temp("[]");
        let args = ValidateArgs {
            payload: payload.path().to_path_buf(),
            dataset: None,
            kind: None,
            role: None,
            detailed: false,
        };
        let config = Config::default();
        assert!(config.paths.dataset.is_none());
        let error = handle_validate(args, &config, &mut sink_output()).unwrap_err();
        assert!(matches!(error, Error::InvalidArgs(_)));
    }

    #[test]
    fn test_handle_validate_missing_payload_file() {
        let dataset = roster_file();
        let args = ValidateArgs {
            payload: PathBuf::from("/no/such/payload.json"),
            dataset: Some(dataset.path().to_path_buf()),
            kind: None,
            role: None,
            detailed: false,
        };
        let error = handle_validate(args, &Config::default(), &mut sink_output()).unwrap_err();
        assert!(matches!(error, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_detect_attendance() {
        let payload = json!([{"date": "2021-04-19", "attendees": [1]}]);
        assert_eq!(detect_payload_kind(&payload), Some(PayloadKind::Attendance));
    }

    #[test]
    fn test_detect_fields() {
        assert_eq!(detect_payload_kind(&json!([1, 2, 3])), Some(PayloadKind::Fields));
    }

    #[test]
    fn test_detect_enrolment_vs_information() {
        let enrolment = json!({"id": 1, "family": 10, "session": 100});
        assert_eq!(detect_payload_kind(&enrolment), Some(PayloadKind::Enrolment));

        let information = json!({"17": "yes"});
        assert_eq!(
            detect_payload_kind(&information),
            Some(PayloadKind::Information)
        );
    }

    #[test]
    fn test_detect_unknown_shapes() {
        assert_eq!(detect_payload_kind(&json!("text")), None);
        assert_eq!(detect_payload_kind(&json!([["nested"]])), None);
    }

    #[test]
    fn test_empty_list_defaults_to_attendance() {
        assert_eq!(detect_payload_kind(&json!([])), Some(PayloadKind::Attendance));
    }
}
