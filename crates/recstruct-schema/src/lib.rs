//! # recstruct-schema: Schema Documents and Data Hydration
//!
//! The generation-time input of recstruct, as files. A schema document lists
//! record types and, for each, its field descriptors in the form
//! `{field, type_guard, default_value, nullable, struct}`.
//!
//! - [`SchemaLoader`] parses documents (YAML or JSON, chosen by file
//!   extension), resolves guard names, and registers the types into a
//!   [`recstruct_core::Registry`] in document order.
//! - [`hydrate()`] builds records of a registered type from JSON/YAML data,
//!   constructing nested records along the way.
//!
//! ## Crate Policy
//!
//! - Depends only on `recstruct-core` internally.
//! - Every record is still created through the generated constructor; this
//!   crate never bypasses validation.

pub mod document;
pub mod error;
pub mod hydrate;
pub mod loader;

pub use document::{FieldDocument, SchemaDocument, TypeDocument};
pub use error::LoadError;
pub use hydrate::hydrate;
pub use loader::{parse_str, read_file, DocumentFormat, SchemaLoader};
