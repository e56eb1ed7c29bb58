//! # Schema: Ordered, Name-Unique Field Descriptors
//!
//! A `Schema` is the shape of a record type. Field order is the record's
//! slot layout; it has no bearing on how constructors are called (they take
//! a name-keyed mapping).
//!
//! ## Invariants
//!
//! - At least one field.
//! - At most [`MAX_FIELDS`] fields.
//! - Field names are unique.

use crate::descriptor::{FieldDescriptor, FieldName};
use crate::error::SchemaError;

/// Maximum number of fields a generated record type may declare.
pub const MAX_FIELDS: usize = 30;

/// An ordered collection of field descriptors with unique names.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Build a schema from descriptors in slot order.
    ///
    /// # Errors
    ///
    /// - `SchemaError::EmptySchema` if `fields` is empty.
    /// - `SchemaError::TooManyFields` if more than [`MAX_FIELDS`] are given.
    /// - `SchemaError::DuplicateField` if two descriptors share a name.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::EmptySchema {
                type_name: String::new(),
            });
        }
        if fields.len() > MAX_FIELDS {
            return Err(SchemaError::TooManyFields {
                count: fields.len(),
                max: MAX_FIELDS,
            });
        }
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|prev| prev.name() == field.name()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name().to_string(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false: `new` rejects an empty field list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate descriptors in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Slot index of the named field.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name().as_str() == name)
    }

    /// Descriptor of the named field.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    /// Field names in slot order.
    pub fn field_names(&self) -> impl Iterator<Item = &FieldName> {
        self.fields.iter().map(FieldDescriptor::name)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
