//! Error type for loading schema documents and hydrating data.

use recstruct_core::{ConstructError, SchemaError};
use thiserror::Error;

/// Error while loading a schema document or hydrating a record from data.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path (or `<inline>`) of the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// A field names a guard that is neither built in nor registered.
    #[error("field '{field}' of '{type_name}' uses unknown type guard '{guard}'")]
    UnknownGuard {
        /// The type declaring the field.
        type_name: String,
        /// The field naming the guard.
        field: String,
        /// The unrecognised guard name.
        guard: String,
    },

    /// A type in the document could not be generated.
    #[error("type '{type_name}': {source}")]
    Schema {
        /// The type being defined.
        type_name: String,
        /// Underlying schema error.
        #[source]
        source: SchemaError,
    },

    /// Data could not be turned into a record.
    #[error("cannot hydrate '{type_name}': {reason}")]
    Hydrate {
        /// The target record type.
        type_name: String,
        /// Why hydration failed.
        reason: String,
    },

    /// The hydrated values were rejected by the record constructor.
    #[error(transparent)]
    Construct(#[from] ConstructError),
}
