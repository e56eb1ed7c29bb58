//! # recstruct-core: Schema-Driven Record Types
//!
//! Generates validated, immutable record types from an ordered list of
//! field descriptors. Every record is created by a generated constructor
//! and changed only through generated setters, and both re-check each
//! field's contract through one shared validator.
//!
//! ## Pieces
//!
//! - [`Value`]: the dynamic value domain of fields and defaults.
//! - [`Guard`]: a field's accepted-value predicate.
//! - [`FieldDescriptor`]: one field's contract (name, guard, default,
//!   nullability, optional nested record type).
//! - [`Schema`]: 1 to [`MAX_FIELDS`] descriptors with unique names.
//! - [`validate()`]: the field validator shared by constructors and setters.
//! - [`Registry`] / [`RecordType`]: the generator and its output.
//! - [`Record`]: a copy-on-write record instance.
//!
//! ## Example
//!
//! ```
//! use recstruct_core::{FieldDescriptor, Guard, Registry, Schema, Value};
//!
//! let mut registry = Registry::new();
//! let car = registry.define(
//!     "Car",
//!     Schema::new(vec![
//!         FieldDescriptor::new("year", Guard::Integer)?.with_default(2),
//!         FieldDescriptor::new("age", Guard::Integer)?.with_default(10).nullable(true),
//!     ])?,
//! )?;
//!
//! let a = car.construct([("year", Value::from(10)), ("age", Value::Nil)])?;
//! let b = a.set("age", 99)?;
//! assert_eq!(a.get("age")?, &Value::Nil);
//! assert_eq!(b.get("age")?, &Value::Int(99));
//! # Ok::<(), recstruct_core::RecstructError>(())
//! ```
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Libraries emit `tracing` events but never install a subscriber.

pub mod descriptor;
pub mod error;
pub mod guard;
pub mod record;
pub mod registry;
pub mod schema;
pub mod validate;
pub mod value;

pub use descriptor::{FieldDescriptor, FieldName, TypeName};
pub use error::{AccessError, ConstructError, RecstructError, SchemaError};
pub use guard::Guard;
pub use record::{FieldAccessor, Record, RecordType, RecordTypeId};
pub use registry::{Registry, TypeResolver};
pub use schema::{Schema, MAX_FIELDS};
pub use validate::validate;
pub use value::Value;
