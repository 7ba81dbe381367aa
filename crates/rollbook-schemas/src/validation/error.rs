//! Validation error types for roster data
//!
//! Copyright (c) 2025 Rollbook Team
//! Licensed under the MIT OR Apache-2.0 license

use rollbook_core::LookupError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-readable code for each rule a value can violate.
///
/// Every code means "validation failed"; none is process-fatal. Callers
/// (e.g. an HTTP layer) are expected to map these onto a 400-class
/// response and surface the message to the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    /// The value's shape or types do not match the declared schema.
    InvalidSchema,
    /// A date string is not a calendar-valid `YYYY-MM-DD` date.
    InvalidDate,
    /// One or more referenced ids have no matching record.
    UnknownReference,
    /// An information key names a field outside the claimed role.
    InvalidFieldForRole,
    /// An information response is not a string.
    InvalidResponseType,
    /// A class reference's session does not match the enrolment's session.
    ClassNotInSession,
    /// The family already holds an enrolment in the target session.
    DuplicateEnrolment,
    /// An information mapping could not be interpreted at all (bad key,
    /// backend failure during field resolution).
    InvalidInformation,
    /// A choice-typed question declares no options to choose from.
    InvalidFieldOptions,
    /// A family's head-of-family reference is not a Parent-role student.
    NotAParent,
    /// An enrolment lists students outside the enrolling family.
    StudentNotInFamily,
}

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::InvalidSchema => "invalid_schema",
            RuleCode::InvalidDate => "invalid_date",
            RuleCode::UnknownReference => "unknown_reference",
            RuleCode::InvalidFieldForRole => "invalid_field_for_role",
            RuleCode::InvalidResponseType => "invalid_response_type",
            RuleCode::ClassNotInSession => "class_not_in_session",
            RuleCode::DuplicateEnrolment => "duplicate_enrolment",
            RuleCode::InvalidInformation => "invalid_information",
            RuleCode::InvalidFieldOptions => "invalid_field_options",
            RuleCode::NotAParent => "not_a_parent",
            RuleCode::StudentNotInFamily => "student_not_in_family",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure with path context and a machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSONPath-style location of the offending value (`$`, `$[2].date`).
    pub path: String,
    /// Which rule was violated.
    pub code: RuleCode,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validation failed at '{}' [{}]: {}",
            self.path, self.code, self.message
        )
    }
}

impl ValidationError {
    pub fn new<P, M>(path: P, code: RuleCode, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            code,
            message: message.into(),
        }
    }
}

/// Result type for pure validation operations.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// What a domain validator can return: a validation failure, or a lookup
/// failure from the record store it consulted.
///
/// Validation failures reflect bad input and are never retried; lookup
/// failures are infrastructure trouble and propagate unchanged (except
/// the one documented wrapping case in the information validator).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl Error {
    /// The rule code, when this is a validation failure.
    pub fn code(&self) -> Option<RuleCode> {
        match self {
            Error::Validation(e) => Some(e.code),
            Error::Lookup(_) => None,
        }
    }
}

/// Result type for domain validators.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path_and_code() {
        let error = ValidationError::new("$[0].date", RuleCode::InvalidDate, "bad date");
        assert_eq!(
            error.to_string(),
            "validation failed at '$[0].date' [invalid_date]: bad date"
        );
    }

    #[test]
    fn test_rule_code_wire_form() {
        let json = serde_json::to_value(RuleCode::ClassNotInSession).unwrap();
        assert_eq!(json, serde_json::json!("class_not_in_session"));
    }

    #[test]
    fn test_error_code_accessor() {
        let error: Error =
            ValidationError::new("$", RuleCode::InvalidSchema, "nope").into();
        assert_eq!(error.code(), Some(RuleCode::InvalidSchema));
    }
}
