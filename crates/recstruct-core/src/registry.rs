//! # Record Type Registry
//!
//! The registry is where record types are generated and where nested type
//! references are resolved. A type can only name a nested type that is
//! already registered (or itself), so an unknown nested type is a
//! definition-time error instead of a validation-time branch.
//!
//! ## Thread Safety
//!
//! Definition needs `&mut Registry`; once every type is defined the registry
//! and the `Arc<RecordType>` handles it gives out are read-only and can be
//! shared across threads.

use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::TypeName;
use crate::error::SchemaError;
use crate::record::{RecordType, RecordTypeId};
use crate::schema::Schema;

/// Maps a record type name to the identity of the type it denotes.
pub trait TypeResolver {
    fn resolve(&self, name: &TypeName) -> Option<RecordTypeId>;
}

/// A collection of generated record types, indexed by name.
#[derive(Debug, Default)]
pub struct Registry {
    types: HashMap<TypeName, Arc<RecordType>>,
    /// Type names in definition order.
    order: Vec<TypeName>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate and register a record type.
    ///
    /// # Errors
    ///
    /// - `SchemaError::InvalidIdentifier` if `name` is not a valid type name.
    /// - `SchemaError::DuplicateType` if `name` is already registered.
    /// - `SchemaError::UnresolvedNestedType` if a field names a nested type
    ///   that is neither registered nor `name` itself.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        schema: Schema,
    ) -> Result<Arc<RecordType>, SchemaError> {
        let name = TypeName::new(name)?;
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateType {
                name: name.to_string(),
            });
        }

        let record_type = Arc::new(RecordType::generate(name.clone(), schema, &*self)?);
        self.types.insert(name.clone(), Arc::clone(&record_type));
        self.order.push(name);
        tracing::debug!(
            record_type = %record_type.name(),
            registered = self.order.len(),
            "registered record type"
        );
        Ok(record_type)
    }

    /// Look up a record type by name.
    pub fn get(&self, name: &str) -> Option<&Arc<RecordType>> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names, in definition order.
    pub fn type_names(&self) -> impl Iterator<Item = &TypeName> {
        self.order.iter()
    }

    /// Registered types, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RecordType>> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl TypeResolver for Registry {
    fn resolve(&self, name: &TypeName) -> Option<RecordTypeId> {
        self.types.get(name).map(|ty| ty.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldDescriptor;
    use crate::guard::Guard;

    fn one_field(name: &str) -> Schema {
        Schema::new(vec![FieldDescriptor::new(name, Guard::Any).unwrap()]).unwrap()
    }

    fn nested_field(name: &str, nested: &str) -> Schema {
        Schema::new(vec![FieldDescriptor::new(name, Guard::Map)
            .unwrap()
            .nullable(true)
            .nested(TypeName::new(nested).unwrap())])
        .unwrap()
    }

    #[test]
    fn test_define_and_lookup() {
        let mut registry = Registry::new();
        registry.define("Engine", one_field("cylinders")).unwrap();
        registry.define("Wheel", one_field("size")).unwrap();
        assert!(registry.contains("Engine"));
        assert!(!registry.contains("Car"));
        assert_eq!(registry.get("Wheel").unwrap().name().as_str(), "Wheel");
        let names: Vec<&str> = registry.type_names().map(TypeName::as_str).collect();
        assert_eq!(names, vec!["Engine", "Wheel"]);
        assert_eq!(registry.iter().count(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut registry = Registry::new();
        registry.define("Engine", one_field("a")).unwrap();
        let err = registry.define("Engine", one_field("b")).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateType {
                name: "Engine".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_type_name_rejected() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.define("not a type", one_field("a")),
            Err(SchemaError::InvalidIdentifier { kind: "type", .. })
        ));
    }

    #[test]
    fn test_unresolved_nested_type_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .define("Car", nested_field("engine", "Engine"))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnresolvedNestedType {
                type_name: "Car".to_string(),
                field: "engine".to_string(),
                nested: "Engine".to_string(),
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_nested_type_resolved_when_registered_first() {
        let mut registry = Registry::new();
        registry.define("Engine", one_field("cylinders")).unwrap();
        assert!(registry.define("Car", nested_field("engine", "Engine")).is_ok());
    }

    #[test]
    fn test_nested_type_bound_to_registered_instance() {
        let mut registry = Registry::new();
        let engine = registry.define("Engine", one_field("cylinders")).unwrap();
        let car = registry.define("Car", nested_field("engine", "Engine")).unwrap();
        let resolved = car.accessor("engine").unwrap().descriptor().nested_type_id();
        assert_eq!(resolved, Some(engine.id()));
        assert_eq!(registry.resolve(&TypeName::new("Engine").unwrap()), Some(engine.id()));
        assert_eq!(registry.resolve(&TypeName::new("Wheel").unwrap()), None);
    }

    #[test]
    fn test_self_reference_allowed() {
        let mut registry = Registry::new();
        let node = registry.define("Node", nested_field("next", "Node")).unwrap();
        let tail = node.construct([("next", crate::Value::Nil)]).unwrap();
        let head = node.construct([("next", tail.clone())]).unwrap();
        assert_eq!(head.get("next").unwrap().as_record(), Some(&tail));
        assert_eq!(
            node.accessor("next").unwrap().descriptor().nested_type_id(),
            Some(node.id())
        );
    }
}
