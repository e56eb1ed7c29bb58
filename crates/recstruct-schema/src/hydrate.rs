//! # Hydration: Data Documents to Records
//!
//! Turns a JSON object into a record of a registered type. Fields that
//! declare a nested type and hold an object are hydrated into a nested
//! record first; everything else is converted with `Value::from`. The
//! parent is then built with the strict constructor, so absent fields are
//! `Nil`, not their defaults.

use std::sync::Arc;

use recstruct_core::{Record, RecordType, RecordTypeId, Registry, TypeName, Value};

use crate::error::LoadError;

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// The type a nested field was bound to, looked up in `registry`.
///
/// A same-named type that is not the bound one (a registry other than the
/// one `parent` was defined in) is an error, since its records would be
/// rejected by the parent's constructor anyway.
fn bound_nested_type<'r>(
    parent: &'r Arc<RecordType>,
    registry: &'r Registry,
    name: &TypeName,
    id: RecordTypeId,
) -> Result<&'r Arc<RecordType>, LoadError> {
    if parent.id() == id {
        return Ok(parent);
    }
    match registry.get(name.as_str()) {
        Some(ty) if ty.id() == id => Ok(ty),
        Some(_) => Err(LoadError::Hydrate {
            type_name: parent.name().to_string(),
            reason: format!(
                "nested type '{name}' in the registry is not the one '{}' was defined against",
                parent.name()
            ),
        }),
        None => Err(LoadError::Hydrate {
            type_name: parent.name().to_string(),
            reason: format!("nested type '{name}' is not registered"),
        }),
    }
}

/// Build a record of `record_type` from a JSON object.
///
/// Nested types are looked up in `registry`, which must be the registry
/// `record_type` was defined in.
///
/// # Errors
///
/// - `LoadError::Hydrate` if `data` is not an object, or a nested type is
///   not registered or is a different type of the same name.
/// - `LoadError::Construct` if the constructor (of the record or of a
///   nested record) rejects the values.
pub fn hydrate(
    record_type: &Arc<RecordType>,
    registry: &Registry,
    data: &serde_json::Value,
) -> Result<Record, LoadError> {
    let serde_json::Value::Object(map) = data else {
        return Err(LoadError::Hydrate {
            type_name: record_type.name().to_string(),
            reason: format!("expected an object, found {}", json_kind(data)),
        });
    };

    let mut values = Vec::with_capacity(map.len());
    for (key, raw) in map {
        let nested = record_type
            .accessor(key)
            .ok()
            .map(|accessor| accessor.descriptor())
            .and_then(|d| d.nested_type().zip(d.nested_type_id()));

        let value = match (nested, raw) {
            (Some((name, id)), serde_json::Value::Object(_)) => {
                let nested_type = bound_nested_type(record_type, registry, name, id)?;
                Value::Record(hydrate(nested_type, registry, raw)?)
            }
            _ => Value::from(raw.clone()),
        };
        values.push((key.clone(), value));
    }

    Ok(record_type.construct(values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{DocumentFormat, SchemaLoader};
    use serde_json::json;

    fn registry() -> Registry {
        SchemaLoader::new()
            .load_str(
                r#"
types:
  - name: Engine
    fields:
      - field: cylinders
        type_guard: is_integer
  - name: Car
    fields:
      - field: year
        type_guard: is_integer
      - field: engine
        type_guard: is_nil
        nullable: true
        struct: Engine
  - name: Node
    fields:
      - field: label
        type_guard: is_binary
      - field: next
        type_guard: is_nil
        nullable: true
        struct: Node
"#,
                DocumentFormat::Yaml,
            )
            .unwrap()
    }

    #[test]
    fn test_hydrate_flat_record() {
        let registry = registry();
        let engine = registry.get("Engine").unwrap();
        let rec = hydrate(engine, &registry, &json!({"cylinders": 8})).unwrap();
        assert_eq!(rec.get("cylinders").unwrap(), &Value::Int(8));
    }

    #[test]
    fn test_hydrate_nested_record() {
        let registry = registry();
        let car = registry.get("Car").unwrap();
        let rec = hydrate(
            car,
            &registry,
            &json!({"year": 1999, "engine": {"cylinders": 6}}),
        )
        .unwrap();
        let engine = rec.get("engine").unwrap().as_record().unwrap();
        assert_eq!(engine.type_name().as_str(), "Engine");
        assert_eq!(engine.get("cylinders").unwrap(), &Value::Int(6));
    }

    #[test]
    fn test_hydrate_self_referencing_chain() {
        let registry = registry();
        let node = registry.get("Node").unwrap();
        let rec = hydrate(
            node,
            &registry,
            &json!({"label": "a", "next": {"label": "b", "next": null}}),
        )
        .unwrap();
        let next = rec.get("next").unwrap().as_record().unwrap();
        assert_eq!(next.get("label").unwrap(), &Value::from("b"));
        assert_eq!(next.get("next").unwrap(), &Value::Nil);
    }

    #[test]
    fn test_hydrate_rejects_invalid_nested_data() {
        let registry = registry();
        let car = registry.get("Car").unwrap();
        let err = hydrate(
            car,
            &registry,
            &json!({"year": 1999, "engine": {"cylinders": "six"}}),
        )
        .unwrap_err();
        match err {
            LoadError::Construct(e) => assert_eq!(e.type_name, "Engine"),
            other => panic!("expected Construct error, got {other}"),
        }
    }

    #[test]
    fn test_hydrate_rejects_non_object() {
        let registry = registry();
        let car = registry.get("Car").unwrap();
        let err = hydrate(car, &registry, &json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("expected an object, found array"), "{err}");
    }

    #[test]
    fn test_hydrate_rejects_foreign_registry() {
        let ours = registry();
        let theirs = SchemaLoader::new()
            .load_str(
                r#"{"types":[{"name":"Engine","fields":[{"field":"label","type_guard":"string"}]}]}"#,
                DocumentFormat::Json,
            )
            .unwrap();
        let car = ours.get("Car").unwrap();
        let err = hydrate(
            car,
            &theirs,
            &json!({"year": 1999, "engine": {"label": "v8"}}),
        )
        .unwrap_err();
        match err {
            LoadError::Hydrate { type_name, reason } => {
                assert_eq!(type_name, "Car");
                assert!(reason.contains("not the one 'Car' was defined against"), "{reason}");
            }
            other => panic!("expected Hydrate error, got {other}"),
        }
    }

    #[test]
    fn test_hydrate_missing_field_is_nil() {
        let registry = registry();
        let car = registry.get("Car").unwrap();
        let rec = hydrate(car, &registry, &json!({"year": 2000})).unwrap();
        assert_eq!(rec.get("engine").unwrap(), &Value::Nil);
    }
}
