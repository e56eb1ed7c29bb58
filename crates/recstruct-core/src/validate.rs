//! # Field Validator
//!
//! The one validation contract shared by every generated constructor and
//! setter. Rules are evaluated in order and the first match wins:
//!
//! 1. The field declares a nested type and the value is a record of exactly
//!    that type (same [`RecordTypeId`], not merely the same name): accept.
//! 2. The field is nullable and the value is `Nil`: accept.
//! 3. Otherwise accept iff the field's guard accepts the value.
//!
//! A field that declares a nested type still falls through to its guard, so
//! a nested field accepts (nested instance OR guard) at every call site.
//!
//! Nested types are resolved when the record type is generated (see
//! [`crate::record::RecordType::generate`]), so rule 1 never has to check
//! whether the nested type exists. A descriptor that has not been through
//! generation carries no resolved identity and rule 1 never matches it.

use crate::descriptor::{FieldDescriptor, FieldName};
use crate::record::RecordTypeId;
use crate::value::Value;

/// Decide whether `value` is acceptable for `descriptor`. Pure; never fails.
pub fn validate(descriptor: &FieldDescriptor, value: &Value) -> bool {
    if let (Some(nested), Some(record)) = (descriptor.nested_type_id(), value.as_record()) {
        if record.record_type().id() == nested {
            return true;
        }
    }
    if descriptor.is_nullable() && value.is_nil() {
        return true;
    }
    descriptor.guard().check(value)
}

/// The first `(descriptor, value)` pair that fails validation, if any.
pub fn first_failure<'a, I>(pairs: I) -> Option<&'a FieldName>
where
    I: IntoIterator<Item = (&'a FieldDescriptor, &'a Value)>,
{
    pairs
        .into_iter()
        .find(|(descriptor, value)| !validate(descriptor, value))
        .map(|(descriptor, _)| descriptor.name())
}
