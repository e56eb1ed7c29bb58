//! # Schema Documents
//!
//! The on-disk form of the generator's input: a list of record types, each
//! with its field descriptors.
//!
//! ```yaml
//! types:
//!   - name: Car
//!     fields:
//!       - field: year
//!         type_guard: is_integer
//!         default_value: 2
//!       - field: engine
//!         type_guard: is_map
//!         nullable: true
//!         struct: Engine
//! ```
//!
//! `default_value` defaults to `null`, `nullable` to `false`, and `struct`
//! (the nested record type) to none. Unknown keys are rejected.

use serde::{Deserialize, Serialize};

/// A parsed schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Record types, in the order they are registered.
    pub types: Vec<TypeDocument>,
}

/// One record type in a schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDocument {
    /// The record type name.
    pub name: String,
    /// Field descriptors in slot order.
    pub fields: Vec<FieldDocument>,
}

/// One field descriptor in a schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDocument {
    /// The field name.
    pub field: String,
    /// Name of the guard the field's values must pass.
    pub type_guard: String,
    /// The field's default value.
    #[serde(default)]
    pub default_value: serde_json::Value,
    /// Whether `null` is acceptable.
    #[serde(default)]
    pub nullable: bool,
    /// Nested record type whose instances the field accepts.
    #[serde(rename = "struct", default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<String>,
}
