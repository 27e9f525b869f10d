//! Integration tests: descriptors used the way a module boundary uses them.
//!
//! Descriptors are built once, up front, and then applied to values arriving
//! from elsewhere: hand-built host objects, JSON payloads, and objects
//! produced by classes.

use shapecheck::{
    check_instance, extend, interface, list, map, optional, Class, DescriptorDefinitionError,
    Interface, Primitive, ShapeError, ShapeMismatch, Type, TypeDescriptor, Value,
};

fn install_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn greeter() -> Interface {
    interface([
        ("name", Primitive::String),
        ("greet", Primitive::Method),
    ])
    .expect("primitive fields are always valid")
}

#[test]
fn greeter_scenario() {
    install_subscriber();
    let greeter = greeter();

    let complete = Value::object([
        ("name", Value::from("a")),
        ("greet", Value::function("greet", |_| Value::Undefined)),
    ]);
    let partial = Value::object([("name", "a")]);

    assert!(greeter.satisfied(&complete));
    assert!(!greeter.satisfied(&partial));

    let err = greeter.check(&partial).unwrap_err();
    assert!(matches!(err, ShapeMismatch::Field { ref field, .. } if field == "greet"));
    assert!(err.to_string().contains("greet"));
}

#[test]
fn extend_overrides_and_requires_all_fields() {
    let a = interface([("x", Primitive::Number)]).unwrap();
    let b = interface([("x", Primitive::String), ("y", Primitive::Bool)]).unwrap();
    let ab = extend([&a, &b]);

    assert!(ab.satisfied(&Value::object([("x", Value::from("s")), ("y", Value::from(true))])));
    assert!(!ab.satisfied(&Value::object([("x", Value::from(1)), ("y", Value::from(true))])));
    assert!(!ab.satisfied(&Value::object([("x", "s")])));
}

#[test]
fn malformed_field_fails_before_any_check() {
    let not_a_descriptor = Value::object([("name", "foo")]);
    let err = interface([("foo", not_a_descriptor)]).unwrap_err();
    assert!(matches!(
        err,
        DescriptorDefinitionError::InvalidField { ref field, .. } if field == "foo"
    ));
}

#[test]
fn json_payload_validation() -> Result<(), ShapeError> {
    install_subscriber();
    let order = interface([
        ("id", Type::from(Primitive::StringInt)),
        ("lines", list(interface([
            ("sku", Primitive::String),
            ("qty", Primitive::Integer),
        ])?)?),
        ("attributes", map(Primitive::StringIntBool)?),
        ("note", optional(Primitive::String)?),
    ])?;

    let payload: Value = serde_json::json!({
        "id": 1042,
        "lines": [
            {"sku": "A-1", "qty": 2},
            {"sku": "B-7", "qty": 1, "discount": 0.1}
        ],
        "attributes": {"gift": true, "channel": "web", "priority": 3},
        "extra": "ignored"
    })
    .into();
    order.check(&payload)?;

    let fractional_qty: Value = serde_json::json!({
        "id": "ord-1",
        "lines": [{"sku": "A-1", "qty": 1.5}],
        "attributes": {}
    })
    .into();
    let err = order.check(&fractional_qty).unwrap_err();
    assert_eq!(
        err,
        ShapeMismatch::Field {
            field: "lines".into(),
            expected: "list(<interface>)".into(),
            actual: "Object".into(),
        }
    );

    let nested_attributes: Value = serde_json::json!({
        "id": 7,
        "lines": [],
        "attributes": {"dims": [1, 2]}
    })
    .into();
    assert!(!order.satisfied(&nested_attributes));
    Ok(())
}

#[test]
fn json_nan_free_numbers_are_numbers() {
    let v: Value = serde_json::json!(3).into();
    assert!(Primitive::Integer.satisfied(&v));
    let v: Value = serde_json::json!(3.5).into();
    assert!(Primitive::Number.satisfied(&v));
    assert!(!Primitive::Integer.satisfied(&v));
}

#[test]
fn plugin_contract_with_classes() {
    let plugin = Class::new("Plugin");
    let exporter = Class::extending("Exporter", &plugin);

    let plugin_shape = interface([
        ("id", Type::from(Primitive::IDENTIFIER)),
        ("run", Type::from(Primitive::Method)),
        ("formats", list(Primitive::String).unwrap()),
    ])
    .unwrap();

    let csv = exporter.instantiate([
        ("id", Value::from("csv")),
        ("run", Value::function("run", |_| Value::Bool(true))),
        ("formats", Value::List(vec!["csv".into()])),
    ]);

    let accepted = check_instance(plugin_shape.check(&csv).unwrap(), &plugin).unwrap();
    assert_eq!(accepted, &csv);

    let impostor = Value::object([
        ("id", Value::from(9)),
        ("run", Value::function("run", |_| Value::Null)),
        ("formats", Value::List(vec![])),
    ]);
    assert!(plugin_shape.satisfied(&impostor));
    assert!(check_instance(&impostor, &plugin).is_err());

    let broken = exporter.instantiate([("id", Value::from("x"))]);
    assert_eq!(
        plugin_shape.check(&broken).unwrap_err().to_string(),
        "interface not satisfied, object of instance Exporter lacks list(string) field formats"
    );
}

#[test]
fn primitives_resolve_by_name() {
    let shape = interface(
        [("count", "int"), ("label", "identifier"), ("flag", "boolean")]
            .into_iter()
            .map(|(field, name)| (field, name.parse::<Primitive>().unwrap())),
    )
    .unwrap();
    assert!(shape.satisfied(&Value::object([
        ("count", Value::from(2)),
        ("label", Value::from(5)),
        ("flag", Value::from(false)),
    ])));
}
