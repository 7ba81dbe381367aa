//! Rollbook Schemas - structural schemas and domain validators for roster data
//!
//! This crate is the validation subsystem for Rollbook: it decides whether
//! JSON-like roster payloads (attendance lists, custom-question answers,
//! field references) and typed enrolment records are acceptable before
//! they reach a store.
//!
//! ## Layers
//!
//! - **Structural**: [`Schema`] describes a shape (scalar leaves,
//!   homogeneous lists, nested objects) and answers conformance as a pure
//!   boolean. Strict mode additionally rejects keys a schema does not
//!   declare.
//! - **Domain**: one validator per rule family (attendance, field
//!   references, per-role information, enrolment consistency, family
//!   membership). Each raises a [`ValidationError`] carrying a
//!   machine-readable [`RuleCode`] and a JSONPath-style location on the
//!   first violation it finds.
//!
//! ## Quick Start
//!
//! ```
//! use rollbook_schemas::{validate_attendance, RuleCode};
//! use rollbook_core::MemoryDataset;
//! use serde_json::json;
//!
//! let dataset = MemoryDataset::from_value(json!({
//!     "students": [
//!         {"id": 1, "first_name": "Merlin", "last_name": "Fish", "role": "Parent"}
//!     ]
//! })).unwrap();
//!
//! let records = json!([{"date": "2021-04-19", "attendees": [1]}]);
//! assert!(validate_attendance(&records, &dataset).is_ok());
//!
//! let records = json!([{"date": "2021-04-19", "attendees": [999]}]);
//! let error = validate_attendance(&records, &dataset).unwrap_err();
//! assert_eq!(error.code(), Some(RuleCode::UnknownReference));
//! ```
//!
//! Validators are stateless and hold no cache: every call re-resolves the
//! ids it references through the lookup traits in `rollbook-core`.
//!
//! Copyright (c) 2025 Rollbook Team
//! Licensed under the MIT OR Apache-2.0 license

pub mod validation;

// Re-export commonly used types for convenience
pub use validation::{
    validate_attendance, validate_enrolment, validate_family_parent, validate_field_options,
    validate_fields, validate_information_role, validate_students_in_family,
    AttendanceValidator, EnrolmentValidator, Error, FieldReferenceValidator,
    InformationValidator, MembershipValidator, Result, RuleCode, Schema, SchemaParseError,
    ValidationError, ValidationResult, ValuePath, DATE_FORMAT,
};
