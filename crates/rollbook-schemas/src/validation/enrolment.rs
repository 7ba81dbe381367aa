//! Enrolment consistency validation
//!
//! Two rules tie an enrolment together: any class it references (preferred
//! or enrolled) must belong to the enrolment's session, and a family may
//! hold at most one enrolment per session. The duplicate check is a plain
//! count read and is therefore racy under concurrent creates; uniqueness
//! must additionally be enforced by the store itself.
//!
//! Copyright (c) 2025 Rollbook Team
//! Licensed under the MIT OR Apache-2.0 license

use crate::validation::context::ValuePath;
use crate::validation::error::{Result, RuleCode, ValidationError};
use rollbook_core::{ClassId, ClassLookup, Enrolment, EnrolmentLookup, FamilyId, SessionId};

/// Validates an enrolment against the class and enrolment registries.
pub struct EnrolmentValidator<'a, C, E> {
    classes: &'a C,
    enrolments: &'a E,
}

impl<'a, C: ClassLookup, E: EnrolmentLookup> EnrolmentValidator<'a, C, E> {
    pub fn new(classes: &'a C, enrolments: &'a E) -> Self {
        Self { classes, enrolments }
    }

    /// Run both consistency checks: class-in-session for the preferred
    /// class, then the enrolled class, then the duplicate-enrolment
    /// count. The first failure wins; later checks are not attempted.
    pub fn validate(&self, enrolment: &Enrolment) -> Result<()> {
        let path = ValuePath::root();
        self.class_in_session_at(
            &path.child("preferred_class"),
            enrolment.preferred_class,
            enrolment.session,
        )?;
        self.class_in_session_at(
            &path.child("enrolled_class"),
            enrolment.enrolled_class,
            enrolment.session,
        )?;
        self.single_enrolment_at(&path.child("session"), enrolment.session, enrolment.family)
    }

    /// A non-null class reference must resolve to a class whose session
    /// is non-null and equal to `session`. A null reference always
    /// passes.
    pub fn validate_class_in_session(
        &self,
        class: Option<ClassId>,
        session: SessionId,
    ) -> Result<()> {
        self.class_in_session_at(&ValuePath::root(), class, session)
    }

    /// Fail when the `(session, family)` pair already counts more than
    /// one enrolment. One enrolment per distinct session is always fine.
    pub fn validate_single_enrolment(&self, session: SessionId, family: FamilyId) -> Result<()> {
        self.single_enrolment_at(&ValuePath::root(), session, family)
    }

    fn class_in_session_at(
        &self,
        path: &ValuePath,
        class: Option<ClassId>,
        session: SessionId,
    ) -> Result<()> {
        let Some(class_id) = class else {
            return Ok(());
        };
        match self.classes.session_of(class_id)? {
            Some(actual) if actual == session => Ok(()),
            _ => Err(ValidationError::new(
                path.clone(),
                RuleCode::ClassNotInSession,
                format!("class {class_id} does not belong to session {session}"),
            )
            .into()),
        }
    }

    fn single_enrolment_at(
        &self,
        path: &ValuePath,
        session: SessionId,
        family: FamilyId,
    ) -> Result<()> {
        if self.enrolments.enrolment_count(session, family)? > 1 {
            return Err(ValidationError::new(
                path.clone(),
                RuleCode::DuplicateEnrolment,
                format!("family {family} already has an enrolment in session {session}"),
            )
            .into());
        }
        Ok(())
    }
}
