//! Read-only collaborator interfaces for the validation subsystem
//!
//! Validators never own storage; they ask these traits "which of these ids
//! exist", "what role does this record carry", and similar existence/count
//! questions. Each validator takes the lookup it needs as an explicit
//! parameter, so any store (or test double) can stand behind it.

use crate::model::{ClassId, FamilyId, FieldId, FieldScope, Role, SessionId, StudentId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// The record kinds a lookup can fail to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Student,
    Family,
    Field,
    Session,
    Class,
    Enrolment,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Student => "student",
            RecordKind::Family => "family",
            RecordKind::Field => "field",
            RecordKind::Session => "session",
            RecordKind::Class => "class",
            RecordKind::Enrolment => "enrolment",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while answering a lookup query.
///
/// `NotFound` is a definitive "no record of that kind with that id";
/// `Backend` wraps whatever the underlying store reported.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no {kind} record with id {id}")]
    NotFound { kind: RecordKind, id: i64 },

    #[error("lookup failed: {0}")]
    Backend(#[from] anyhow::Error),
}

impl LookupError {
    pub fn not_found(kind: RecordKind, id: i64) -> Self {
        LookupError::NotFound { kind, id }
    }
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Existence and membership queries over student records.
pub trait StudentLookup {
    /// The subset of `ids` that exist as student records.
    fn existing_students(&self, ids: &[StudentId]) -> LookupResult<BTreeSet<StudentId>>;

    /// The role of an existing student. Missing students are `NotFound`.
    fn student_role(&self, id: StudentId) -> LookupResult<Role>;

    /// The family a student belongs to, if any. Missing students are
    /// `NotFound`.
    fn family_of(&self, id: StudentId) -> LookupResult<Option<FamilyId>>;
}

/// Existence and scope queries over custom-question records.
pub trait FieldLookup {
    /// The subset of `ids` that exist as field records.
    fn existing_fields(&self, ids: &[FieldId]) -> LookupResult<BTreeSet<FieldId>>;

    /// The scope of a field, or `None` when no such field exists.
    fn field_scope(&self, id: FieldId) -> LookupResult<Option<FieldScope>>;
}

/// Session-membership queries over class records.
pub trait ClassLookup {
    /// The session a class belongs to (`None` when the class has no
    /// session reference). Missing classes are `NotFound`.
    fn session_of(&self, id: ClassId) -> LookupResult<Option<SessionId>>;
}

/// Count queries over enrolment records.
pub trait EnrolmentLookup {
    /// How many enrolments exist for this `(session, family)` pair.
    fn enrolment_count(&self, session: SessionId, family: FamilyId) -> LookupResult<usize>;
}
