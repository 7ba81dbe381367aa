//! In-memory record store
//!
//! `MemoryDataset` holds a full roster deserialized from a single JSON
//! document and answers every lookup trait over it. It backs the CLI and
//! the test suites; a real deployment would put a relational store behind
//! the same traits.

use crate::error::{Error, Result};
use crate::lookup::{
    ClassLookup, EnrolmentLookup, FieldLookup, LookupError, LookupResult, RecordKind,
    StudentLookup,
};
use crate::model::{
    Class, ClassId, Enrolment, Family, FamilyId, Field, FieldId, FieldScope, Role, Session,
    SessionId, Student, StudentId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// Wire form of a dataset file: flat lists of records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetDocument {
    pub students: Vec<Student>,
    pub families: Vec<Family>,
    pub fields: Vec<Field>,
    pub sessions: Vec<Session>,
    pub classes: Vec<Class>,
    pub enrolments: Vec<Enrolment>,
}

/// A full roster held in memory, indexed by record id.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    students: BTreeMap<StudentId, Student>,
    families: BTreeMap<FamilyId, Family>,
    fields: BTreeMap<FieldId, Field>,
    sessions: BTreeMap<SessionId, Session>,
    classes: BTreeMap<ClassId, Class>,
    enrolments: BTreeMap<i64, Enrolment>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a deserialized document. Later records win on duplicate ids.
    pub fn from_document(doc: DatasetDocument) -> Self {
        let dataset = Self {
            students: doc.students.into_iter().map(|r| (r.id, r)).collect(),
            families: doc.families.into_iter().map(|r| (r.id, r)).collect(),
            fields: doc.fields.into_iter().map(|r| (r.id, r)).collect(),
            sessions: doc.sessions.into_iter().map(|r| (r.id, r)).collect(),
            classes: doc.classes.into_iter().map(|r| (r.id, r)).collect(),
            enrolments: doc.enrolments.into_iter().map(|r| (r.id, r)).collect(),
        };
        debug!(
            students = dataset.students.len(),
            families = dataset.families.len(),
            fields = dataset.fields.len(),
            sessions = dataset.sessions.len(),
            classes = dataset.classes.len(),
            enrolments = dataset.enrolments.len(),
            "dataset loaded"
        );
        dataset
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: DatasetDocument = serde_json::from_str(content)?;
        Ok(Self::from_document(doc))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let doc: DatasetDocument = serde_json::from_value(value)?;
        Ok(Self::from_document(doc))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn insert_student(&mut self, student: Student) {
        self.students.insert(student.id, student);
    }

    pub fn insert_family(&mut self, family: Family) {
        self.families.insert(family.id, family);
    }

    pub fn insert_field(&mut self, field: Field) {
        self.fields.insert(field.id, field);
    }

    pub fn insert_session(&mut self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    pub fn insert_class(&mut self, class: Class) {
        self.classes.insert(class.id, class);
    }

    pub fn insert_enrolment(&mut self, enrolment: Enrolment) {
        self.enrolments.insert(enrolment.id, enrolment);
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    pub fn family(&self, id: FamilyId) -> Option<&Family> {
        self.families.get(&id)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(&id)
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(&id)
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.values()
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values()
    }

    pub fn enrolments(&self) -> impl Iterator<Item = &Enrolment> {
        self.enrolments.values()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
            && self.families.is_empty()
            && self.fields.is_empty()
            && self.sessions.is_empty()
            && self.classes.is_empty()
            && self.enrolments.is_empty()
    }
}

impl StudentLookup for MemoryDataset {
    fn existing_students(&self, ids: &[StudentId]) -> LookupResult<BTreeSet<StudentId>> {
        Ok(ids
            .iter()
            .copied()
            .filter(|id| self.students.contains_key(id))
            .collect())
    }

    fn student_role(&self, id: StudentId) -> LookupResult<Role> {
        self.students
            .get(&id)
            .map(|s| s.role)
            .ok_or_else(|| LookupError::not_found(RecordKind::Student, id))
    }

    fn family_of(&self, id: StudentId) -> LookupResult<Option<FamilyId>> {
        self.students
            .get(&id)
            .map(|s| s.family)
            .ok_or_else(|| LookupError::not_found(RecordKind::Student, id))
    }
}

impl FieldLookup for MemoryDataset {
    fn existing_fields(&self, ids: &[FieldId]) -> LookupResult<BTreeSet<FieldId>> {
        Ok(ids
            .iter()
            .copied()
            .filter(|id| self.fields.contains_key(id))
            .collect())
    }

    fn field_scope(&self, id: FieldId) -> LookupResult<Option<FieldScope>> {
        Ok(self.fields.get(&id).map(|f| f.scope))
    }
}

impl ClassLookup for MemoryDataset {
    fn session_of(&self, id: ClassId) -> LookupResult<Option<SessionId>> {
        self.classes
            .get(&id)
            .map(|c| c.session)
            .ok_or_else(|| LookupError::not_found(RecordKind::Class, id))
    }
}

impl EnrolmentLookup for MemoryDataset {
    fn enrolment_count(&self, session: SessionId, family: FamilyId) -> LookupResult<usize> {
        Ok(self
            .enrolments
            .values()
            .filter(|e| e.session == session && e.family == family)
            .count())
    }
}

impl TryFrom<serde_json::Value> for MemoryDataset {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MemoryDataset {
        MemoryDataset::from_value(json!({
            "students": [
                {"id": 1, "first_name": "Merlin", "last_name": "Fish", "role": "Parent", "family": 10},
                {"id": 2, "first_name": "Nemo", "last_name": "Fish", "role": "Child", "family": 10}
            ],
            "families": [
                {"id": 10, "email": "fish@example.com", "parent": 1}
            ],
            "fields": [
                {"id": 7, "scope": "Parent", "name": "DOB", "question": "Date of birth?",
                 "question_type": "Text"}
            ],
            "sessions": [
                {"id": 100, "name": "Fall 2021", "fields": [7]}
            ],
            "classes": [
                {"id": 200, "name": "Tues/Thurs", "session": 100},
                {"id": 201, "name": "Unscheduled"}
            ],
            "enrolments": [
                {"id": 300, "active": true, "family": 10, "session": 100,
                 "status": "Registered"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_existing_students_filters_unknown_ids() {
        let dataset = sample();
        let existing = dataset.existing_students(&[1, 2, 999]).unwrap();
        assert_eq!(existing, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_student_role_not_found() {
        let dataset = sample();
        assert_eq!(dataset.student_role(1).unwrap(), Role::Parent);
        assert!(matches!(
            dataset.student_role(999),
            Err(LookupError::NotFound { kind: RecordKind::Student, id: 999 })
        ));
    }

    #[test]
    fn test_field_scope_absent_is_none() {
        let dataset = sample();
        assert_eq!(dataset.field_scope(7).unwrap(), Some(FieldScope::Parent));
        assert_eq!(dataset.field_scope(8).unwrap(), None);
    }

    #[test]
    fn test_class_session_resolution() {
        let dataset = sample();
        assert_eq!(dataset.session_of(200).unwrap(), Some(100));
        assert_eq!(dataset.session_of(201).unwrap(), None);
        assert!(dataset.session_of(999).is_err());
    }

    #[test]
    fn test_enrolment_count() {
        let dataset = sample();
        assert_eq!(dataset.enrolment_count(100, 10).unwrap(), 1);
        assert_eq!(dataset.enrolment_count(101, 10).unwrap(), 0);
    }

    #[test]
    fn test_empty_document_round_trip() {
        let dataset = MemoryDataset::from_json_str("{}").unwrap();
        assert!(dataset.is_empty());
    }
}
