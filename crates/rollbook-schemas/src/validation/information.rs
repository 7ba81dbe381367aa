//! Per-role information (custom-question answer) validation
//!
//! A student's `information` column is a mapping from string-encoded field
//! id to that student's answer:
//!
//! ```json
//! {"17": "1989-04-12", "23": "Yes"}
//! ```
//!
//! Every key must name a question whose scope matches the student's role.
//! Session-wide questions are the one exception: they are collected on the
//! parent form, so a Parent may answer them; no other role may. Responses
//! are checked (strings only) after the whole key set has been accepted.
//!
//! Copyright (c) 2025 Rollbook Team
//! Licensed under the MIT OR Apache-2.0 license

use crate::validation::context::ValuePath;
use crate::validation::error::{Error, Result, RuleCode, ValidationError};
use rollbook_core::{FieldId, FieldLookup, LookupError, Role};
use serde_json::Value;

/// Validates a student's information mapping against the field registry.
pub struct InformationValidator<'a, F> {
    fields: &'a F,
}

impl<'a, F: FieldLookup> InformationValidator<'a, F> {
    pub fn new(fields: &'a F) -> Self {
        Self { fields }
    }

    /// Check that every key is a field id applicable to `role` and every
    /// response is a string.
    pub fn validate(&self, information: &Value, role: Role) -> Result<()> {
        let path = ValuePath::root();
        let Some(map) = information.as_object() else {
            return Err(ValidationError::new(
                path,
                RuleCode::InvalidSchema,
                "information must be a mapping of field id to response",
            )
            .into());
        };

        for key in map.keys() {
            let key_path = path.child(key);
            let id: FieldId = key.parse().map_err(|_| {
                ValidationError::new(
                    key_path.clone(),
                    RuleCode::InvalidInformation,
                    format!("information key '{key}' is not a field id"),
                )
            })?;

            let scope = match self.fields.field_scope(id) {
                Ok(scope) => scope,
                // A not-found for some other record kind is not ours to
                // interpret; anything else resolving this field becomes a
                // generic invalid-information failure.
                Err(err @ LookupError::NotFound { .. }) => return Err(Error::Lookup(err)),
                Err(LookupError::Backend(err)) => {
                    return Err(ValidationError::new(
                        key_path,
                        RuleCode::InvalidInformation,
                        format!("could not resolve field {id}: {err}"),
                    )
                    .into());
                }
            };

            match scope {
                Some(scope) if scope.applies_to(role) => {}
                Some(scope) => {
                    return Err(ValidationError::new(
                        key_path,
                        RuleCode::InvalidFieldForRole,
                        format!("field {id} is a {scope} question, not answerable by a {role}"),
                    )
                    .into());
                }
                None => {
                    return Err(ValidationError::new(
                        key_path,
                        RuleCode::InvalidFieldForRole,
                        format!("no field with id {id}"),
                    )
                    .into());
                }
            }
        }

        validate_information_responses(map, &path)
    }
}

/// Responses must all be strings. Only called once the key set has been
/// accepted, so the reported path always names a real field.
fn validate_information_responses(
    map: &serde_json::Map<String, Value>,
    path: &ValuePath,
) -> Result<()> {
    for (key, response) in map {
        if !response.is_string() {
            return Err(ValidationError::new(
                path.child(key),
                RuleCode::InvalidResponseType,
                format!("response for field {key} must be a string"),
            )
            .into());
        }
    }
    Ok(())
}
