//! Validation subsystem for roster data
//!
//! Two layers:
//!
//! - **Structural**: [`Schema`], a declarative description of a JSON-like
//!   shape, with a pure boolean conformance check and an optional strict
//!   mode that rejects undeclared keys.
//! - **Domain**: validators for attendance lists, session field
//!   references, per-role information mappings, enrolment consistency,
//!   and family membership. Each takes the read-only lookup trait it
//!   needs and raises on the first violation it finds.
//!
//! Copyright (c) 2025 Rollbook Team
//! Licensed under the MIT OR Apache-2.0 license

pub mod attendance;
pub mod context;
pub mod enrolment;
pub mod error;
pub mod fields;
pub mod information;
pub mod membership;
pub mod schema;

// Re-export commonly used types
pub use attendance::{AttendanceValidator, DATE_FORMAT};
pub use context::ValuePath;
pub use enrolment::EnrolmentValidator;
pub use error::{Error, Result, RuleCode, ValidationError, ValidationResult};
pub use fields::{validate_field_options, FieldReferenceValidator};
pub use information::InformationValidator;
pub use membership::MembershipValidator;
pub use schema::{Schema, SchemaParseError};

use rollbook_core::{
    ClassLookup, Enrolment, EnrolmentLookup, FamilyId, FieldLookup, Role, StudentId,
    StudentLookup,
};
use serde_json::Value;

/// Validate a class's attendance list. See [`AttendanceValidator`].
pub fn validate_attendance<S: StudentLookup>(records: &Value, students: &S) -> Result<()> {
    AttendanceValidator::new(students).validate(records)
}

/// Validate a session's applicable-field list. See
/// [`FieldReferenceValidator`].
pub fn validate_fields<F: FieldLookup>(field_ids: &Value, fields: &F) -> Result<()> {
    FieldReferenceValidator::new(fields).validate(field_ids)
}

/// Validate an information mapping for a role. See
/// [`InformationValidator`].
pub fn validate_information_role<F: FieldLookup>(
    information: &Value,
    role: Role,
    fields: &F,
) -> Result<()> {
    InformationValidator::new(fields).validate(information, role)
}

/// Validate an enrolment's class/session/family consistency. See
/// [`EnrolmentValidator`].
pub fn validate_enrolment<C: ClassLookup, E: EnrolmentLookup>(
    enrolment: &Enrolment,
    classes: &C,
    enrolments: &E,
) -> Result<()> {
    EnrolmentValidator::new(classes, enrolments).validate(enrolment)
}

/// Validate a family's head-of-family reference. See
/// [`MembershipValidator`].
pub fn validate_family_parent<S: StudentLookup>(student: StudentId, students: &S) -> Result<()> {
    MembershipValidator::new(students).validate_family_parent(student)
}

/// Validate that enrolled students belong to the family. See
/// [`MembershipValidator`].
pub fn validate_students_in_family<S: StudentLookup>(
    ids: &[StudentId],
    family: FamilyId,
    students: &S,
) -> Result<()> {
    MembershipValidator::new(students).validate_students_in_family(ids, family)
}
