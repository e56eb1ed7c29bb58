//! # Record Types and Record Instances
//!
//! [`RecordType::generate`] turns a type name and a [`Schema`] into a record
//! type: per-slot defaults, a constructor, and one [`FieldAccessor`] per
//! field, all built in a single pass over the schema. Generation happens
//! once per type; afterwards the type is only read.
//!
//! ## Construction
//!
//! [`RecordType::construct`] takes a name-keyed mapping. Names outside the
//! schema are ignored. Schema fields missing from the input are stored as
//! `Nil`, not as the field's default, and validated as such.
//! [`RecordType::construct_with_defaults`] is the explicit alternative that
//! backfills missing fields from their defaults before validating.
//!
//! ## Copy-on-Write
//!
//! A [`Record`] never changes after construction. [`FieldAccessor::set`]
//! returns a new record whose slot vector shares every untouched slot with
//! the original.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::descriptor::{FieldDescriptor, FieldName, TypeName};
use crate::error::{AccessError, ConstructError, SchemaError};
use crate::registry::TypeResolver;
use crate::schema::Schema;
use crate::validate;
use crate::value::Value;

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a generated record type.
///
/// Two types with the same name (for example from two registries) never
/// share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordTypeId(u64);

impl RecordTypeId {
    fn next() -> Self {
        Self(NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ─── Record Type ─────────────────────────────────────────────────────

/// A generated record type.
#[derive(Debug)]
pub struct RecordType {
    /// Accessor dispatch and nested-type checks compare this.
    id: RecordTypeId,
    name: TypeName,
    schema: Schema,
    defaults: im::Vector<Value>,
    accessors: Vec<FieldAccessor>,
}

impl RecordType {
    /// Generate a record type from a schema.
    ///
    /// Every nested type named by the schema must either be known to
    /// `resolver` or be `name` itself. The accessors keep the resolved
    /// identity, so only instances of that exact type satisfy rule 1 of the
    /// validator.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnresolvedNestedType` for the first field whose
    /// nested type cannot be resolved.
    pub fn generate<R>(name: TypeName, schema: Schema, resolver: &R) -> Result<Self, SchemaError>
    where
        R: TypeResolver + ?Sized,
    {
        let id = RecordTypeId::next();
        let mut defaults = im::Vector::new();
        let mut accessors = Vec::with_capacity(schema.len());

        for (index, descriptor) in schema.iter().enumerate() {
            let nested_id = match descriptor.nested_type() {
                None => None,
                Some(nested) if nested == &name => Some(id),
                Some(nested) => Some(resolver.resolve(nested).ok_or_else(|| {
                    SchemaError::UnresolvedNestedType {
                        type_name: name.to_string(),
                        field: descriptor.name().to_string(),
                        nested: nested.to_string(),
                    }
                })?),
            };
            let descriptor = match nested_id {
                Some(nested_id) => descriptor.clone().resolved(nested_id),
                None => descriptor.clone(),
            };
            defaults.push_back(descriptor.default_value().clone());
            accessors.push(FieldAccessor {
                type_id: id,
                type_name: name.clone(),
                index,
                descriptor,
            });
        }

        tracing::debug!(record_type = %name, fields = schema.len(), "generated record type");

        Ok(Self {
            id,
            name,
            schema,
            defaults,
            accessors,
        })
    }

    pub fn id(&self) -> RecordTypeId {
        self.id
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The configured default of every field, in slot order.
    pub fn defaults(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.schema.field_names().zip(self.defaults.iter())
    }

    /// The generated accessor for a field.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UnknownField` if the schema has no such field.
    pub fn accessor(&self, field: &str) -> Result<&FieldAccessor, AccessError> {
        self.schema
            .index_of(field)
            .map(|i| &self.accessors[i])
            .ok_or_else(|| AccessError::UnknownField {
                type_name: self.name.to_string(),
                field: field.to_string(),
            })
    }

    /// All accessors, in slot order.
    pub fn accessors(&self) -> &[FieldAccessor] {
        &self.accessors
    }

    /// Construct a record, storing `Nil` for every field absent from `values`.
    ///
    /// # Errors
    ///
    /// Returns the aggregate `ConstructError` if any field rejects its value.
    pub fn construct<I, K, V>(self: &Arc<Self>, values: I) -> Result<Record, ConstructError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.build(values, |_| Value::Nil)
    }

    /// Construct a record, backfilling absent fields from their defaults.
    ///
    /// # Errors
    ///
    /// Returns the aggregate `ConstructError` if any field rejects its value,
    /// including a backfilled default.
    pub fn construct_with_defaults<I, K, V>(
        self: &Arc<Self>,
        values: I,
    ) -> Result<Record, ConstructError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.build(values, |descriptor| descriptor.default_value().clone())
    }

    fn build<I, K, V>(
        self: &Arc<Self>,
        values: I,
        absent: impl Fn(&FieldDescriptor) -> Value,
    ) -> Result<Record, ConstructError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut input: HashMap<String, Value> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let slots: im::Vector<Value> = self
            .accessors
            .iter()
            .map(FieldAccessor::descriptor)
            .map(|d| input.remove(d.name().as_str()).unwrap_or_else(|| absent(d)))
            .collect();

        let descriptors = self.accessors.iter().map(FieldAccessor::descriptor);
        if let Some(field) = validate::first_failure(descriptors.zip(slots.iter())) {
            tracing::debug!(record_type = %self.name, %field, "constructor rejected input");
            return Err(ConstructError {
                type_name: self.name.to_string(),
            });
        }

        Ok(Record {
            ty: Arc::clone(self),
            slots: Arc::new(slots),
        })
    }
}

// ─── Field Accessor ──────────────────────────────────────────────────

/// The generated getter/setter pair of one field.
#[derive(Debug, Clone)]
pub struct FieldAccessor {
    type_id: RecordTypeId,
    type_name: TypeName,
    index: usize,
    descriptor: FieldDescriptor,
}

impl FieldAccessor {
    /// The field's descriptor, with its nested type resolved.
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Slot index of the field.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Read the field. The value was validated when it was written and is
    /// not re-checked.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::TypeMismatch` if `record` is not of this
    /// accessor's type.
    pub fn get<'r>(&self, record: &'r Record) -> Result<&'r Value, AccessError> {
        self.dispatch(record)?;
        record.slots.get(self.index).ok_or_else(|| self.mismatch(record))
    }

    /// Return a copy of `record` with this field replaced by `value`.
    ///
    /// `value` goes through the same validator the constructor uses.
    ///
    /// # Errors
    ///
    /// - `AccessError::TypeMismatch` if `record` is not of this accessor's type.
    /// - `AccessError::NoMatchingClause` if the field rejects `value`.
    pub fn set(&self, record: &Record, value: impl Into<Value>) -> Result<Record, AccessError> {
        self.dispatch(record)?;
        let value = value.into();
        if !validate::validate(&self.descriptor, &value) {
            return Err(AccessError::NoMatchingClause {
                type_name: self.type_name.to_string(),
                field: self.descriptor.name().to_string(),
            });
        }
        if self.index >= record.slots.len() {
            return Err(self.mismatch(record));
        }
        tracing::trace!(
            record_type = %self.type_name,
            field = %self.descriptor.name(),
            "replaced field"
        );
        Ok(Record {
            ty: Arc::clone(&record.ty),
            slots: Arc::new(record.slots.update(self.index, value)),
        })
    }

    fn dispatch(&self, record: &Record) -> Result<(), AccessError> {
        if record.ty.id == self.type_id {
            Ok(())
        } else {
            Err(self.mismatch(record))
        }
    }

    fn mismatch(&self, record: &Record) -> AccessError {
        AccessError::TypeMismatch {
            expected: self.type_name.to_string(),
            found: record.type_name().to_string(),
        }
    }
}

// ─── Record ──────────────────────────────────────────────────────────

/// An immutable instance of a generated record type.
///
/// The slot vector sits behind an `Arc` so that `Value`, which can hold a
/// `Record`, has a layout independent of the vector's inline storage.
#[derive(Clone)]
pub struct Record {
    ty: Arc<RecordType>,
    slots: Arc<im::Vector<Value>>,
}

impl Record {
    pub fn type_name(&self) -> &TypeName {
        &self.ty.name
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    /// Read a field by name.
    pub fn get(&self, field: &str) -> Result<&Value, AccessError> {
        self.ty.accessor(field)?.get(self)
    }

    /// Copy-on-write update of a field by name.
    pub fn set(&self, field: &str, value: impl Into<Value>) -> Result<Record, AccessError> {
        self.ty.accessor(field)?.set(self, value)
    }

    /// Fields and their values, in slot order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.ty.schema.field_names().zip(self.slots.iter())
    }

    /// The record as a JSON object keyed by field name.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields()
                .map(|(name, value)| (name.to_string(), value.to_json()))
                .collect(),
        )
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.ty.id == other.ty.id && self.slots == other.slots
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.ty.name.as_str());
        for (name, value) in self.fields() {
            s.field(name.as_str(), value);
        }
        s.finish()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name.as_str(), value)?;
        }
        map.end()
    }
}
