//! # Schema Loader
//!
//! Reads [`SchemaDocument`]s from YAML or JSON and registers their record
//! types into a [`Registry`].
//!
//! ## Guard Resolution
//!
//! A field's `type_guard` is looked up first in the loader's table of custom
//! guards (see [`SchemaLoader::with_guard`]) and then among the built-in
//! guard names. Anything else is rejected before the type is generated.
//!
//! ## Registration Order
//!
//! Types are registered in document order. A `struct:` reference must name a
//! type registered earlier (in this document or already in the target
//! registry) or the type itself.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use recstruct_core::{FieldDescriptor, Guard, RecordType, Registry, Schema, SchemaError, TypeName, Value};
use serde::de::DeserializeOwned;

use crate::document::{FieldDocument, SchemaDocument, TypeDocument};
use crate::error::LoadError;

const INLINE_ORIGIN: &str = "<inline>";

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.yaml`/`.yml` is YAML; anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
            "yaml" | "yml" => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse a document in the given format.
///
/// `origin` names the document in error messages.
pub fn parse_str<T: DeserializeOwned>(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<T, LoadError> {
    match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| LoadError::DocumentLoad {
            path: origin.to_string(),
            reason: format!("invalid YAML: {e}"),
        }),
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| LoadError::DocumentLoad {
            path: origin.to_string(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

/// Read and parse a document, choosing the format from the file extension.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::DocumentLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    parse_str(&content, DocumentFormat::from_path(path), &path.display().to_string())
}

/// Loads schema documents into registries.
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    guards: HashMap<String, Guard>,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a custom guard available to documents under `name`.
    ///
    /// Custom names take precedence over built-in guard names.
    pub fn with_guard(mut self, name: impl Into<String>, guard: Guard) -> Self {
        self.guards.insert(name.into(), guard);
        self
    }

    /// Parse a schema document and register its types into a fresh registry.
    pub fn load_str(&self, content: &str, format: DocumentFormat) -> Result<Registry, LoadError> {
        let doc: SchemaDocument = parse_str(content, format, INLINE_ORIGIN)?;
        let mut registry = Registry::new();
        self.register(&doc, &mut registry)?;
        Ok(registry)
    }

    /// Read a schema document file and register its types into a fresh registry.
    pub fn load_file(&self, path: &Path) -> Result<Registry, LoadError> {
        let doc: SchemaDocument = read_file(path)?;
        let mut registry = Registry::new();
        self.register(&doc, &mut registry)?;
        tracing::debug!(path = %path.display(), types = registry.len(), "loaded schema document");
        Ok(registry)
    }

    /// Register every type of `doc` into `registry`, in document order.
    ///
    /// Stops at the first type that fails; types registered before it stay
    /// in the registry.
    pub fn register(
        &self,
        doc: &SchemaDocument,
        registry: &mut Registry,
    ) -> Result<Vec<Arc<RecordType>>, LoadError> {
        doc.types
            .iter()
            .map(|ty| {
                let schema = self.build_schema(ty)?;
                registry.define(ty.name.as_str(), schema).map_err(|source| LoadError::Schema {
                    type_name: ty.name.clone(),
                    source,
                })
            })
            .collect()
    }

    fn build_schema(&self, ty: &TypeDocument) -> Result<Schema, LoadError> {
        let schema_err = |source: SchemaError| LoadError::Schema {
            type_name: ty.name.clone(),
            source,
        };

        let fields = ty
            .fields
            .iter()
            .map(|field| self.build_descriptor(ty, field))
            .collect::<Result<Vec<_>, _>>()?;

        Schema::new(fields).map_err(|e| match e {
            SchemaError::EmptySchema { .. } => schema_err(SchemaError::EmptySchema {
                type_name: ty.name.clone(),
            }),
            other => schema_err(other),
        })
    }

    fn build_descriptor(
        &self,
        ty: &TypeDocument,
        field: &FieldDocument,
    ) -> Result<FieldDescriptor, LoadError> {
        let schema_err = |source: SchemaError| LoadError::Schema {
            type_name: ty.name.clone(),
            source,
        };

        let guard = self.resolve_guard(&field.type_guard).ok_or_else(|| LoadError::UnknownGuard {
            type_name: ty.name.clone(),
            field: field.field.clone(),
            guard: field.type_guard.clone(),
        })?;

        let mut descriptor = FieldDescriptor::new(field.field.as_str(), guard)
            .map_err(schema_err)?
            .with_default(Value::from(field.default_value.clone()))
            .nullable(field.nullable);

        if let Some(nested) = &field.nested {
            descriptor = descriptor.nested(TypeName::new(nested.as_str()).map_err(schema_err)?);
        }
        Ok(descriptor)
    }

    fn resolve_guard(&self, name: &str) -> Option<Guard> {
        self.guards
            .get(name)
            .cloned()
            .or_else(|| name.parse().ok())
    }
}
