//! Integration tests for the record contract: construction, accessors,
//! nested record types, the field-count boundary, and sharing records
//! across threads.

use std::sync::Arc;
use std::thread;

use recstruct_core::{
    AccessError, FieldDescriptor, Guard, RecordType, Registry, Schema, SchemaError, TypeName,
    Value, MAX_FIELDS,
};

fn car_registry() -> (Registry, Arc<RecordType>) {
    let mut registry = Registry::new();
    let car = registry
        .define(
            "Car",
            Schema::new(vec![
                FieldDescriptor::new("year", Guard::Integer)
                    .unwrap()
                    .with_default(2),
                FieldDescriptor::new("age", Guard::Integer)
                    .unwrap()
                    .with_default(10)
                    .nullable(true),
            ])
            .unwrap(),
        )
        .unwrap();
    (registry, car)
}

#[test]
fn test_scenario_construct_with_explicit_nil() {
    let (_, car) = car_registry();
    let rec = car
        .construct([("year", Value::Int(10)), ("age", Value::Nil)])
        .unwrap();
    assert_eq!(rec.get("year").unwrap(), &Value::Int(10));
    assert_eq!(rec.get("age").unwrap(), &Value::Nil);
}

#[test]
fn test_scenario_construct_rejects_string_year() {
    let (_, car) = car_registry();
    let err = car
        .construct([("year", Value::from("x")), ("age", Value::Int(5))])
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("type mismatch for constructor parameter(s) or required parameters are missing"));
}

#[test]
fn test_scenario_setter_leaves_original_untouched() {
    let (_, car) = car_registry();
    let original = car.construct([("year", 10), ("age", 1)]).unwrap();
    let age = car.accessor("age").unwrap();
    let updated = age.set(&original, 99).unwrap();
    assert_eq!(age.get(&updated).unwrap(), &Value::Int(99));
    assert_eq!(age.get(&original).unwrap(), &Value::Int(1));
    assert_eq!(original.get("year").unwrap(), &Value::Int(10));
}

#[test]
fn test_nullable_key_absent() {
    let (_, car) = car_registry();
    let rec = car.construct([("year", 2024)]).unwrap();
    assert_eq!(rec.get("age").unwrap(), &Value::Nil);
}

#[test]
fn test_nested_instance_accepted_despite_guard() {
    let mut registry = Registry::new();
    let engine = registry
        .define(
            "Engine",
            Schema::new(vec![FieldDescriptor::new("cylinders", Guard::Integer).unwrap()]).unwrap(),
        )
        .unwrap();
    // The guard alone would reject any record.
    let car = registry
        .define(
            "Car",
            Schema::new(vec![FieldDescriptor::new("engine", Guard::Integer)
                .unwrap()
                .nested(TypeName::new("Engine").unwrap())])
            .unwrap(),
        )
        .unwrap();

    let v8 = engine.construct([("cylinders", 8)]).unwrap();
    let rec = car.construct([("engine", v8.clone())]).unwrap();
    assert_eq!(rec.get("engine").unwrap().as_record(), Some(&v8));

    // The setter follows the same rules as the constructor.
    let v6 = engine.construct([("cylinders", 6)]).unwrap();
    let swapped = rec.set("engine", v6.clone()).unwrap();
    assert_eq!(swapped.get("engine").unwrap().as_record(), Some(&v6));
    let by_guard = rec.set("engine", 4).unwrap();
    assert_eq!(by_guard.get("engine").unwrap(), &Value::Int(4));
    assert!(matches!(
        rec.set("engine", "v12"),
        Err(AccessError::NoMatchingClause { .. })
    ));

    assert_eq!(
        rec.to_json(),
        serde_json::json!({"engine": {"cylinders": 8}})
    );
}

#[test]
fn test_record_of_wrong_nested_type_rejected() {
    let mut registry = Registry::new();
    let wheel = registry
        .define(
            "Wheel",
            Schema::new(vec![FieldDescriptor::new("size", Guard::Integer).unwrap()]).unwrap(),
        )
        .unwrap();
    registry
        .define(
            "Engine",
            Schema::new(vec![FieldDescriptor::new("cylinders", Guard::Integer).unwrap()]).unwrap(),
        )
        .unwrap();
    let car = registry
        .define(
            "Car",
            Schema::new(vec![FieldDescriptor::new("engine", Guard::Map)
                .unwrap()
                .nested(TypeName::new("Engine").unwrap())])
            .unwrap(),
        )
        .unwrap();

    let w = wheel.construct([("size", 17)]).unwrap();
    assert!(car.construct([("engine", w)]).is_err());
}

#[test]
fn test_same_named_type_from_other_registry_rejected() {
    let mut ours = Registry::new();
    let engine = ours
        .define(
            "Engine",
            Schema::new(vec![FieldDescriptor::new("cylinders", Guard::Integer).unwrap()]).unwrap(),
        )
        .unwrap();
    let car = ours
        .define(
            "Car",
            Schema::new(vec![FieldDescriptor::new("engine", Guard::Nil)
                .unwrap()
                .nested(TypeName::new("Engine").unwrap())])
            .unwrap(),
        )
        .unwrap();

    let mut theirs = Registry::new();
    let foreign_engine = theirs
        .define(
            "Engine",
            Schema::new(vec![FieldDescriptor::new("label", Guard::String).unwrap()]).unwrap(),
        )
        .unwrap();
    let foreign = foreign_engine.construct([("label", "v8")]).unwrap();
    assert_eq!(foreign.type_name().as_str(), "Engine");

    assert!(car.construct([("engine", foreign.clone())]).is_err());

    let rec = car
        .construct([("engine", engine.construct([("cylinders", 8)]).unwrap())])
        .unwrap();
    assert!(matches!(
        rec.set("engine", foreign),
        Err(AccessError::NoMatchingClause { .. })
    ));
}

#[test]
fn test_thirty_field_type_generated_and_usable() {
    let mut registry = Registry::new();
    let fields = (0..MAX_FIELDS)
        .map(|i| {
            FieldDescriptor::new(format!("f{i}"), Guard::Integer)
                .unwrap()
                .with_default(i as i64)
        })
        .collect();
    let wide = registry.define("Wide", Schema::new(fields).unwrap()).unwrap();
    let rec = wide
        .construct_with_defaults(std::iter::empty::<(String, Value)>())
        .unwrap();
    assert_eq!(rec.get("f29").unwrap(), &Value::Int(29));
    assert_eq!(wide.accessors().len(), 30);
}

#[test]
fn test_thirty_one_field_schema_rejected() {
    let fields = (0..=MAX_FIELDS)
        .map(|i| FieldDescriptor::new(format!("f{i}"), Guard::Any).unwrap())
        .collect();
    assert_eq!(
        Schema::new(fields).unwrap_err(),
        SchemaError::TooManyFields { count: 31, max: 30 }
    );
}

#[test]
fn test_records_shared_across_threads() {
    let (_, car) = car_registry();
    let base = car.construct([("year", 1), ("age", 0)]).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let base = base.clone();
            thread::spawn(move || base.set("age", i).unwrap())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let rec = handle.join().unwrap();
        assert_eq!(rec.get("age").unwrap(), &Value::Int(i as i64));
    }
    assert_eq!(base.get("age").unwrap(), &Value::Int(0));
}

#[test]
fn test_custom_guard_in_schema() {
    let mut registry = Registry::new();
    let positive = Guard::custom("is_positive", |v| v.as_int().is_some_and(|i| i > 0));
    let order = registry
        .define(
            "Order",
            Schema::new(vec![FieldDescriptor::new("quantity", positive).unwrap()]).unwrap(),
        )
        .unwrap();
    assert!(order.construct([("quantity", 3)]).is_ok());
    assert!(order.construct([("quantity", 0)]).is_err());
}
