//! Rollbook Core - domain records and lookup interfaces for roster validation
//!
//! This crate holds the data the validation subsystem operates over:
//!
//! - **Records**: typed families, students, custom questions, sessions,
//!   classes, and enrolments
//! - **Lookup traits**: the read-only queries validators are allowed to ask
//!   of a record store (existence by id set, role/scope resolution, counts)
//! - **MemoryDataset**: an in-memory store implementing every lookup trait,
//!   deserializable from a single JSON document
//!
//! The validators themselves live in `rollbook-schemas`.
//!
//! # Example
//!
//! ```
//! use rollbook_core::{MemoryDataset, StudentLookup};
//! use serde_json::json;
//!
//! let dataset = MemoryDataset::from_value(json!({
//!     "students": [
//!         {"id": 1, "first_name": "Merlin", "last_name": "Fish", "role": "Parent"}
//!     ]
//! })).unwrap();
//!
//! let existing = dataset.existing_students(&[1, 2]).unwrap();
//! assert!(existing.contains(&1));
//! assert!(!existing.contains(&2));
//! ```

pub mod dataset;
pub mod error;
pub mod lookup;
pub mod model;

// Re-export main types for convenience
pub use dataset::{DatasetDocument, MemoryDataset};
pub use error::{Error, Result};
pub use lookup::{
    ClassLookup, EnrolmentLookup, FieldLookup, LookupError, LookupResult, RecordKind,
    StudentLookup,
};
pub use model::{
    Class, ClassId, Enrolment, EnrolmentStatus, Family, FamilyId, Field, FieldId, FieldScope,
    PhonePreference, QuestionType, Role, Session, SessionId, Student, StudentId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
