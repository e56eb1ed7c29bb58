//! # Field Descriptors and Identifier Newtypes
//!
//! A `FieldDescriptor` is the declared contract of one record field: its
//! name, its guard, its default value, whether `Nil` is acceptable, and an
//! optional nested record type whose instances are accepted regardless of
//! the guard.
//!
//! Field and type names are newtypes with validated constructors so that a
//! malformed identifier is rejected when the schema is built, never when a
//! record is.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use crate::error::SchemaError;
use crate::guard::Guard;
use crate::record::RecordTypeId;
use crate::value::Value;

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// The name of a record field.
///
/// Starts with an ASCII letter or `_`, continues with ASCII alphanumerics
/// or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldName(String);

impl FieldName {
    /// Validate and wrap a field name.
    pub fn new(name: impl Into<String>) -> Result<Self, SchemaError> {
        let name = name.into();
        if is_identifier(&name) {
            Ok(Self(name))
        } else {
            Err(SchemaError::InvalidIdentifier { kind: "field", name })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The name of a record type.
///
/// One or more identifier segments joined by `.`, e.g. `Car` or
/// `Garage.Car`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeName(String);

impl TypeName {
    /// Validate and wrap a type name.
    pub fn new(name: impl Into<String>) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.split('.').all(is_identifier) {
            Ok(Self(name))
        } else {
            Err(SchemaError::InvalidIdentifier { kind: "type", name })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_name_traits {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_name_traits!(FieldName);
impl_name_traits!(TypeName);

/// The contract of a single record field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: FieldName,
    guard: Guard,
    default_value: Value,
    nullable: bool,
    nested: Option<TypeName>,
    /// Set by the generator once `nested` is resolved.
    nested_id: Option<RecordTypeId>,
}

impl FieldDescriptor {
    /// Create a non-nullable descriptor with a `Nil` default and no nested type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidIdentifier` if `name` is not a valid
    /// field name.
    pub fn new(name: impl Into<String>, guard: Guard) -> Result<Self, SchemaError> {
        Ok(Self {
            name: FieldName::new(name)?,
            guard,
            default_value: Value::Nil,
            nullable: false,
            nested: None,
            nested_id: None,
        })
    }

    /// Set the value the field's slot starts from in the type's defaults.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Set whether `Nil` is an acceptable value.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Declare a record type whose instances this field accepts.
    ///
    /// The name is bound to a concrete type when the record type owning
    /// this field is generated; until then no record satisfies it.
    pub fn nested(mut self, type_name: TypeName) -> Self {
        self.nested = Some(type_name);
        self.nested_id = None;
        self
    }

    pub(crate) fn resolved(mut self, id: RecordTypeId) -> Self {
        self.nested_id = Some(id);
        self
    }

    pub fn name(&self) -> &FieldName {
        &self.name
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn nested_type(&self) -> Option<&TypeName> {
        self.nested.as_ref()
    }

    /// Identity of the nested type, once resolved by the generator.
    pub fn nested_type_id(&self) -> Option<RecordTypeId> {
        self.nested_id
    }
}
