//! Custom-question reference and option validation
//!
//! A session declares which admin-defined questions apply to it as a plain
//! list of field ids; every id must name an existing field record. Field
//! records themselves carry a small internal consistency rule: a
//! choice-typed question must declare its options.
//!
//! Copyright (c) 2025 Rollbook Team
//! Licensed under the MIT OR Apache-2.0 license

use crate::validation::context::ValuePath;
use crate::validation::error::{Result, RuleCode, ValidationError, ValidationResult};
use crate::validation::schema::Schema;
use rollbook_core::{Field, FieldId, FieldLookup};
use serde_json::Value;

/// Validates a session's applicable-field id list.
pub struct FieldReferenceValidator<'a, F> {
    fields: &'a F,
}

impl<'a, F: FieldLookup> FieldReferenceValidator<'a, F> {
    pub fn new(fields: &'a F) -> Self {
        Self { fields }
    }

    /// `field_ids` must be a list of integers, all of which exist as
    /// field records. An empty list passes.
    pub fn validate(&self, field_ids: &Value) -> Result<()> {
        let path = ValuePath::root();
        if !Schema::list(Schema::Int).matches(field_ids) {
            return Err(ValidationError::new(
                path,
                RuleCode::InvalidSchema,
                "applicable fields must be a list of field ids",
            )
            .into());
        }

        let ids: Vec<FieldId> = field_ids
            .as_array()
            .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default();
        if ids.is_empty() {
            return Ok(());
        }

        let existing = self.fields.existing_fields(&ids)?;
        let missing: Vec<FieldId> = ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::new(
                path,
                RuleCode::UnknownReference,
                format!("no field records for ids {missing:?}"),
            )
            .into());
        }

        Ok(())
    }
}

/// A `Select` or `MultipleChoice` question must declare at least one
/// option for responses to pick from. Free-text questions are
/// unconstrained.
pub fn validate_field_options(field: &Field) -> ValidationResult<()> {
    if field.question_type.is_choice() && field.options.is_empty() {
        return Err(ValidationError::new(
            ValuePath::root().child("options"),
            RuleCode::InvalidFieldOptions,
            format!(
                "field {} ({}) is a {:?} question but declares no options",
                field.id, field.name, field.question_type
            ),
        ));
    }
    Ok(())
}
