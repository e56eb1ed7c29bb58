//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout recstruct. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Schema errors are raised once, at generation time, and name the
//!   offending field or type.
//! - Construction failures are a single aggregate error. They
//!   carry no per-field detail: callers learn that the input was rejected,
//!   not which field rejected it.
//! - Accessor errors signal a programming error at the call site (wrong
//!   record type, unknown field, or a setter value no clause accepts).

use thiserror::Error;

/// Top-level error type for recstruct.
#[derive(Error, Debug)]
pub enum RecstructError {
    /// A schema or record type could not be generated.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A record instance could not be constructed.
    #[error(transparent)]
    Construct(#[from] ConstructError),

    /// A field accessor was dispatched on an unsuitable record or value.
    #[error("accessor error: {0}")]
    Access(#[from] AccessError),
}

/// Error raised while building a schema or generating a record type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A record type needs at least one field.
    #[error("schema for '{type_name}' declares no fields")]
    EmptySchema {
        /// The type being defined (empty when the schema is built standalone).
        type_name: String,
    },

    /// More fields than the generator supports.
    #[error("schema declares {count} fields; at most {max} are supported")]
    TooManyFields {
        /// Number of descriptors supplied.
        count: usize,
        /// Maximum supported field count.
        max: usize,
    },

    /// Two descriptors share a field name.
    #[error("duplicate field name '{name}'")]
    DuplicateField {
        /// The repeated field name.
        name: String,
    },

    /// A field or type name is not a valid identifier.
    #[error("invalid {kind} name '{name}'")]
    InvalidIdentifier {
        /// Either `"field"` or `"type"`.
        kind: &'static str,
        /// The rejected name.
        name: String,
    },

    /// A field references a nested record type that is not defined.
    #[error("field '{field}' of '{type_name}' references undefined record type '{nested}'")]
    UnresolvedNestedType {
        /// The type being generated.
        type_name: String,
        /// The field declaring the nested type.
        field: String,
        /// The unresolved nested type name.
        nested: String,
    },

    /// A record type with this name already exists in the registry.
    #[error("record type '{name}' is already defined")]
    DuplicateType {
        /// The repeated type name.
        name: String,
    },

    /// A guard name does not denote a built-in or registered guard.
    #[error("unknown type guard '{name}'")]
    UnknownGuard {
        /// The unrecognised guard name.
        name: String,
    },
}

/// The single aggregate construction failure.
///
/// Raised when any field of the schema rejects its supplied value (or the
/// `Nil` standing in for an absent key).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "type mismatch for constructor parameter(s) or required parameters are missing \
     (record type '{type_name}')"
)]
pub struct ConstructError {
    /// The record type whose constructor rejected the input.
    pub type_name: String,
}

/// Error raised by a generated field accessor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The record type has no field with this name.
    #[error("record type '{type_name}' has no field '{field}'")]
    UnknownField {
        /// The record type.
        type_name: String,
        /// The requested field name.
        field: String,
    },

    /// The accessor belongs to a different record type than the instance.
    #[error("accessor for '{expected}' applied to a '{found}' record")]
    TypeMismatch {
        /// The accessor's record type.
        expected: String,
        /// The instance's record type.
        found: String,
    },

    /// No setter clause accepts the value.
    #[error("no matching setter clause for {type_name}.{field}")]
    NoMatchingClause {
        /// The record type.
        type_name: String,
        /// The field being set.
        field: String,
    },
}
