//! Family membership validation
//!
//! A family's head-of-family reference must carry the Parent role, and an
//! enrolment may only list students that belong to the enrolling family.
//!
//! Copyright (c) 2025 Rollbook Team
//! Licensed under the MIT OR Apache-2.0 license

use crate::validation::context::ValuePath;
use crate::validation::error::{Result, RuleCode, ValidationError};
use rollbook_core::{FamilyId, Role, StudentId, StudentLookup};

/// Validates who may stand where in a family.
pub struct MembershipValidator<'a, S> {
    students: &'a S,
}

impl<'a, S: StudentLookup> MembershipValidator<'a, S> {
    pub fn new(students: &'a S) -> Self {
        Self { students }
    }

    /// The student named as a family's parent must exist (a missing
    /// record propagates as a lookup failure) and carry `Role::Parent`.
    pub fn validate_family_parent(&self, student: StudentId) -> Result<()> {
        let role = self.students.student_role(student)?;
        if role != Role::Parent {
            return Err(ValidationError::new(
                ValuePath::root().child("parent"),
                RuleCode::NotAParent,
                format!("student {student} is a {role}, not a {}", Role::Parent),
            )
            .into());
        }
        Ok(())
    }

    /// Every listed student must belong to `family`.
    pub fn validate_students_in_family(
        &self,
        students: &[StudentId],
        family: FamilyId,
    ) -> Result<()> {
        let mut outsiders = Vec::new();
        for &id in students {
            if self.students.family_of(id)? != Some(family) {
                outsiders.push(id);
            }
        }
        if !outsiders.is_empty() {
            return Err(ValidationError::new(
                ValuePath::root().child("students"),
                RuleCode::StudentNotInFamily,
                format!("students {outsiders:?} do not belong to family {family}"),
            )
            .into());
        }
        Ok(())
    }
}
