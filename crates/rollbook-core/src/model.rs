//! Domain records for program rosters
//!
//! These are the shapes the validation subsystem is aware of: families,
//! students, admin-defined custom questions, enrolment sessions, classes,
//! and enrolments. Records are plain serde-derived data; all referential
//! rules live in `rollbook-schemas`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub type StudentId = i64;
pub type FamilyId = i64;
pub type FieldId = i64;
pub type SessionId = i64;
pub type ClassId = i64;

/// A student's role within their family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Parent,
    Child,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Parent => "Parent",
            Role::Child => "Child",
            Role::Guest => "Guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Parent" | "parent" => Ok(Role::Parent),
            "Child" | "child" => Ok(Role::Child),
            "Guest" | "guest" => Ok(Role::Guest),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Which form a custom question appears on.
///
/// `Session`-scoped questions apply to the whole enrolment session rather
/// than to one person; they are collected on the parent form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldScope {
    Parent,
    Child,
    Guest,
    Session,
}

impl FieldScope {
    /// Whether a question with this scope may be answered by a student
    /// with the given role.
    pub fn applies_to(&self, role: Role) -> bool {
        matches!(
            (self, role),
            (FieldScope::Parent, Role::Parent)
                | (FieldScope::Child, Role::Child)
                | (FieldScope::Guest, Role::Guest)
                | (FieldScope::Session, Role::Parent)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldScope::Parent => "Parent",
            FieldScope::Child => "Child",
            FieldScope::Guest => "Guest",
            FieldScope::Session => "Session",
        }
    }
}

impl fmt::Display for FieldScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer format of a custom question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    Text,
    Select,
    MultipleChoice,
}

impl QuestionType {
    /// Choice-typed questions must declare the options a response may
    /// pick from; free-text questions have none.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::Select | QuestionType::MultipleChoice)
    }
}

/// Lifecycle state of an enrolment.
///
/// The states form an ordered narrative ("Signed up" through "Completed",
/// with "No show"/"Drop out"/"Waitlisted" as alternatives), but transitions
/// are deliberately unrestricted: any status is accepted at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrolmentStatus {
    #[serde(rename = "Signed up")]
    SignedUp,
    Registered,
    #[serde(rename = "Class allocated")]
    ClassAllocated,
    Completed,
    #[serde(rename = "No show")]
    NoShow,
    #[serde(rename = "Drop out")]
    DropOut,
    Waitlisted,
}

impl Default for EnrolmentStatus {
    fn default() -> Self {
        EnrolmentStatus::SignedUp
    }
}

impl EnrolmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrolmentStatus::SignedUp => "Signed up",
            EnrolmentStatus::Registered => "Registered",
            EnrolmentStatus::ClassAllocated => "Class allocated",
            EnrolmentStatus::Completed => "Completed",
            EnrolmentStatus::NoShow => "No show",
            EnrolmentStatus::DropOut => "Drop out",
            EnrolmentStatus::Waitlisted => "Waitlisted",
        }
    }
}

impl fmt::Display for EnrolmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of a family's phone numbers to use for contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhonePreference {
    Home,
    Cell,
    Work,
}

impl Default for PhonePreference {
    fn default() -> Self {
        PhonePreference::Cell
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

/// A person on a family's roster: the parent, a child, or a guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub family: Option<FamilyId>,
    /// Custom-question answers: `{field id (string) -> response}`.
    /// Validated by the information validator, not constrained here.
    #[serde(default = "empty_object")]
    pub information: Value,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A household enrolled in the program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub home_number: String,
    #[serde(default)]
    pub cell_number: String,
    #[serde(default)]
    pub work_number: String,
    #[serde(default)]
    pub preferred_number: PhonePreference,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub preferred_comms: String,
    #[serde(default)]
    pub notes: String,
    /// The head-of-family student. Must carry `Role::Parent`; enforced by
    /// the membership validator.
    #[serde(default)]
    pub parent: Option<StudentId>,
}

impl Family {
    /// The number selected by `preferred_number`.
    pub fn phone_number(&self) -> &str {
        match self.preferred_number {
            PhonePreference::Home => &self.home_number,
            PhonePreference::Cell => &self.cell_number,
            PhonePreference::Work => &self.work_number,
        }
    }
}

/// An admin-defined custom question, scoped to a role or to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub scope: FieldScope,
    pub name: String,
    pub question: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub order: u32,
}

/// One run of the program (e.g. "Fall 2021").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Ids of the custom questions applicable to this session, in display
    /// order. Validated by the field-reference validator.
    #[serde(default)]
    pub fields: Vec<FieldId>,
}

/// A class within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub session: Option<SessionId>,
    #[serde(default)]
    pub facilitator: Option<String>,
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default)]
    pub location: String,
    /// Per-date attendance: `[{date, attendees}]`. Validated by the
    /// attendance validator, not constrained here.
    #[serde(default = "empty_array")]
    pub attendance: Value,
}

/// The association of one family with one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrolment {
    pub id: i64,
    #[serde(default)]
    pub active: bool,
    pub family: FamilyId,
    pub session: SessionId,
    #[serde(default)]
    pub preferred_class: Option<ClassId>,
    #[serde(default)]
    pub enrolled_class: Option<ClassId>,
    #[serde(default)]
    pub status: EnrolmentStatus,
    #[serde(default)]
    pub students: Vec<StudentId>,
}
