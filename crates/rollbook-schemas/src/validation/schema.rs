//! Declarative structural schemas for JSON-like values
//!
//! A [`Schema`] mirrors the shape of the value it accepts: scalar leaves,
//! homogeneous lists, and nested objects. That is the entire feature set:
//! no `$ref`, no unions, no bounds. Conformance is a pure boolean
//! predicate over already-parsed data; it never panics and never
//! allocates an error.
//!
//! Copyright (c) 2025 Rollbook Team
//! Licensed under the MIT OR Apache-2.0 license

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// A recursive description of the shape a value must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// A JSON string.
    Str,
    /// An integer-valued JSON number. Booleans never match.
    Int,
    /// A float-valued JSON number. Integers never match.
    Float,
    /// A JSON boolean. Integers never match.
    Bool,
    /// A list whose every element matches the inner schema.
    List(Box<Schema>),
    /// A mapping. Every declared key is required in the value; keys the
    /// value carries beyond the declaration are ignored unless strict.
    Object(BTreeMap<String, Schema>),
}

/// Failure to interpret a literal schema descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaParseError {
    #[error("unknown type tag '{0}' (expected one of: str, int, float, bool)")]
    UnknownTypeTag(String),

    #[error("a list descriptor takes exactly one element schema, found {0}")]
    ListArity(usize),

    #[error("unsupported schema descriptor: {0}")]
    Unsupported(String),
}

impl Schema {
    /// Shorthand for a homogeneous list schema.
    pub fn list(element: Schema) -> Self {
        Schema::List(Box::new(element))
    }

    /// Shorthand for an object schema from `(key, schema)` pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Schema::Object(entries.into_iter().map(|(k, s)| (k.into(), s)).collect())
    }

    /// Interpret a literal descriptor: `"str" | "int" | "float" | "bool"`,
    /// a single-element list `[T]`, or an object `{key: T, ...}`.
    pub fn parse(descriptor: &Value) -> Result<Self, SchemaParseError> {
        match descriptor {
            Value::String(tag) => match tag.as_str() {
                "str" => Ok(Schema::Str),
                "int" => Ok(Schema::Int),
                "float" => Ok(Schema::Float),
                "bool" => Ok(Schema::Bool),
                other => Err(SchemaParseError::UnknownTypeTag(other.to_string())),
            },
            Value::Array(items) => {
                if items.len() != 1 {
                    return Err(SchemaParseError::ListArity(items.len()));
                }
                Ok(Schema::list(Schema::parse(&items[0])?))
            }
            Value::Object(map) => map
                .iter()
                .map(|(key, sub)| Ok((key.clone(), Schema::parse(sub)?)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Schema::Object),
            other => Err(SchemaParseError::Unsupported(other.to_string())),
        }
    }

    /// Whether `value` conforms to this schema.
    ///
    /// In strict mode, object keys absent from the schema reject the
    /// value; otherwise they are silently ignored. Keys the schema
    /// declares are required either way.
    pub fn conforms(&self, value: &Value, strict: bool) -> bool {
        match self {
            Schema::Str => value.is_string(),
            Schema::Int => matches!(value, Value::Number(n) if n.is_i64() || n.is_u64()),
            Schema::Float => matches!(value, Value::Number(n) if n.is_f64()),
            Schema::Bool => value.is_boolean(),
            Schema::List(element) => match value {
                Value::Array(items) => items.iter().all(|item| element.conforms(item, strict)),
                _ => false,
            },
            Schema::Object(shape) => match value {
                Value::Object(map) => {
                    for (key, subvalue) in map {
                        match shape.get(key) {
                            Some(sub) => {
                                if !sub.conforms(subvalue, strict) {
                                    return false;
                                }
                            }
                            None if strict => return false,
                            None => {}
                        }
                    }
                    // Declared keys are required: a value missing one fails.
                    shape.keys().all(|key| map.contains_key(key))
                }
                _ => false,
            },
        }
    }

    /// Non-strict conformance.
    pub fn matches(&self, value: &Value) -> bool {
        self.conforms(value, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_type_matching() {
        assert!(Schema::Str.matches(&json!("hello")));
        assert!(Schema::Int.matches(&json!(42)));
        assert!(Schema::Int.matches(&json!(-7)));
        assert!(Schema::Float.matches(&json!(3.2)));
        assert!(Schema::Bool.matches(&json!(true)));
    }

    #[test]
    fn test_leaf_type_mismatches() {
        assert!(!Schema::Str.matches(&json!(42)));
        assert!(!Schema::Int.matches(&json!("42")));
        assert!(!Schema::Int.matches(&json!(3.2)));
        assert!(!Schema::Float.matches(&json!(3)));
        assert!(!Schema::Int.matches(&json!(null)));
    }

    #[test]
    fn test_bools_are_not_ints() {
        assert!(!Schema::Int.matches(&json!(true)));
        assert!(!Schema::Bool.matches(&json!(1)));
    }

    #[test]
    fn test_empty_list_always_matches() {
        assert!(Schema::list(Schema::Int).matches(&json!([])));
        assert!(Schema::list(Schema::object([("x", Schema::Str)])).matches(&json!([])));
    }

    #[test]
    fn test_list_rejects_non_lists() {
        assert!(!Schema::list(Schema::Int).matches(&json!({"0": 1})));
        assert!(!Schema::list(Schema::Int).matches(&json!(1)));
    }

    #[test]
    fn test_parse_round_trip() {
        let descriptor = json!([{"date": "str", "attendees": ["int"]}]);
        let schema = Schema::parse(&descriptor).unwrap();
        assert_eq!(
            schema,
            Schema::list(Schema::object([
                ("date", Schema::Str),
                ("attendees", Schema::list(Schema::Int)),
            ]))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        assert_eq!(
            Schema::parse(&json!("string")),
            Err(SchemaParseError::UnknownTypeTag("string".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_multi_element_lists() {
        assert_eq!(
            Schema::parse(&json!(["int", "str"])),
            Err(SchemaParseError::ListArity(2))
        );
        assert_eq!(Schema::parse(&json!([])), Err(SchemaParseError::ListArity(0)));
    }

    #[test]
    fn test_parse_rejects_scalar_descriptors() {
        assert!(matches!(
            Schema::parse(&json!(42)),
            Err(SchemaParseError::Unsupported(_))
        ));
    }
}
