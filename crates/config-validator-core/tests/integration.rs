//! Integration tests for the validation engine
//!
//! Covers:
//! - End-to-end validation of JSON, TOML and INI documents
//! - Cross-format coercion of INI strings
//! - Determinism, cascade suppression and open-schema properties (proptest)

use config_validator_core::{
    format, load_schema, validate, DiagnosticKind, DocPath, Format, SchemaNode, SchemaType,
    Severity, ValidationReport, Validator, ValidatorOptions, Value,
};
use proptest::prelude::*;

const SERVICE_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "service": {
            "type": "object",
            "required": ["port"],
            "properties": {"port": {"type": "integer"}}
        }
    }
}"#;

fn check(source: &str, format: Format, schema: &str) -> ValidationReport {
    let value = format::parse(source.as_bytes(), format).unwrap();
    let schema = load_schema(schema.as_bytes()).unwrap();
    validate(&value, &schema)
}

#[test]
fn test_ini_document_passes_typed_schema() {
    let report = check("[service]\nport=8080", Format::Ini, SERVICE_SCHEMA);
    assert!(report.passed());
    assert!(report.diagnostics().is_empty());
    assert_eq!(report.coercions().len(), 1);
    assert_eq!(report.coercions()[0].path.to_string(), "$.service.port");
}

#[test]
fn test_same_config_in_every_format() {
    let sources = [
        (r#"{"service": {"port": 8080}}"#, Format::Json),
        ("[service]\nport = 8080\n", Format::Toml),
        ("[service]\nport = 8080\n", Format::Ini),
    ];
    for (source, format) in sources {
        let report = check(source, format, SERVICE_SCHEMA);
        assert!(report.passed(), "{} document should pass", format);
    }
}

#[test]
fn test_ini_indented_keys_pass() {
    let report = check("[service]\n  host = a\n  port = 8080\n", Format::Ini, SERVICE_SCHEMA);
    assert!(report.passed());
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.diagnostics()[0].path.to_string(), "$.service.host");
}

#[test]
fn test_ini_non_numeric_port_fails() {
    let report = check("[service]\nport=http", Format::Ini, SERVICE_SCHEMA);
    assert!(!report.passed());
    assert_eq!(report.diagnostics().len(), 1);
    let d = &report.diagnostics()[0];
    assert_eq!(d.kind, DiagnosticKind::TypeMismatch);
    assert_eq!(d.path.to_string(), "$.service.port");
    assert!(d.message.contains("expected type 'integer'"));
    assert!(d.message.contains("\"http\""));
}

#[test]
fn test_ini_missing_required_key() {
    let report = check("[service]\nhost=localhost", Format::Ini, SERVICE_SCHEMA);
    let kinds: Vec<DiagnosticKind> = report.diagnostics().iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::MissingRequiredProperty, DiagnosticKind::UnknownProperty]
    );
    assert_eq!(report.summary(), "Validation FAIL | Errors: 1 | Warnings: 1");
}

#[test]
fn test_toml_integer_is_not_silently_stringified() {
    let schema = r#"{"type": "object", "properties": {"name": {"type": "string"}}}"#;
    let report = check("name = 42\n", Format::Toml, schema);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.diagnostics()[0].kind, DiagnosticKind::TypeMismatch);
}

#[test]
fn test_ini_boolean_and_number_coercion() {
    let schema = r#"{
        "type": "object",
        "properties": {
            "feature": {
                "type": "object",
                "properties": {
                    "enabled": {"type": "boolean"},
                    "ratio": {"type": "number"},
                    "mode": {"type": "string", "enum": ["fast", "safe"]}
                }
            }
        }
    }"#;
    let report = check(
        "[feature]\nenabled = True\nratio = 0.75\nmode = safe\n",
        Format::Ini,
        schema,
    );
    assert!(report.passed());
    assert_eq!(report.coercions().len(), 2);
}

#[test]
fn test_nested_arrays_of_objects() {
    let schema = r#"{
        "type": "object",
        "required": ["servers"],
        "properties": {
            "servers": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["host"],
                    "properties": {"host": {"type": "string"}, "port": {"type": "integer"}}
                }
            }
        }
    }"#;
    let source = r#"
[[servers]]
host = "a"
port = 1

[[servers]]
port = "2"

[[servers]]
host = "c"
port = 3.5
"#;
    let report = check(source, Format::Toml, schema);
    let paths: Vec<String> = report.diagnostics().iter().map(|d| d.path.to_string()).collect();
    assert_eq!(paths, vec!["$.servers[1].host", "$.servers[2].port"]);
    // "2" coerces even in TOML: coercion keys off the value, not the format
    assert_eq!(report.coercions().len(), 1);
}

#[test]
fn test_strict_unknown_properties() {
    let value = format::parse(br#"{"a": 1, "b": 2}"#, Format::Json).unwrap();
    let schema = SchemaNode::typed(SchemaType::Object).property("a", SchemaNode::any());

    let tolerant = Validator::default().validate(&value, &schema);
    assert!(tolerant.passed());
    assert_eq!(tolerant.diagnostics()[0].severity, Severity::Warning);

    let strict = Validator::new(ValidatorOptions::strict()).validate(&value, &schema);
    assert!(!strict.passed());
    assert_eq!(strict.diagnostics()[0].severity, Severity::Error);
}

#[test]
fn test_validate_bytes() {
    let schema = load_schema(SERVICE_SCHEMA.as_bytes()).unwrap();
    let report = config_validator_core::validate_bytes(
        b"[service]\nport = 1\n",
        Format::Toml,
        &schema,
        &ValidatorOptions::default(),
    )
    .unwrap();
    assert!(report.passed());

    let err = config_validator_core::validate_bytes(
        b"[service\n",
        Format::Toml,
        &schema,
        &ValidatorOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, config_validator_core::ValidatorError::Parse(_)));
}

#[test]
fn test_load_schema_file_missing() {
    let err = config_validator_core::load_schema_file(std::path::Path::new("/nonexistent/schema.json"))
        .unwrap_err();
    assert!(!err.is_user_error());
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        "[a-z0-9]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-e]", inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn arb_type() -> impl Strategy<Value = Option<SchemaType>> {
    prop_oneof![
        Just(None),
        Just(Some(SchemaType::Object)),
        Just(Some(SchemaType::Array)),
        Just(Some(SchemaType::String)),
        Just(Some(SchemaType::Integer)),
        Just(Some(SchemaType::Number)),
        Just(Some(SchemaType::Boolean)),
        Just(Some(SchemaType::Null)),
    ]
}

fn arb_schema() -> impl Strategy<Value = SchemaNode> {
    let leaf = arb_type().prop_map(|expected_type| SchemaNode {
        expected_type,
        ..SchemaNode::any()
    });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            arb_type(),
            prop::collection::vec(("[a-e]", inner.clone()), 0..4),
            prop::collection::vec("[a-e]", 0..3),
            prop::option::of(inner),
            any::<bool>(),
        )
            .prop_map(|(expected_type, properties, required, items, additional)| {
                let mut node = SchemaNode {
                    expected_type,
                    additional_properties: additional,
                    ..SchemaNode::any()
                };
                for (name, child) in properties {
                    node = node.property(name, child);
                }
                for name in required {
                    node = node.require(name);
                }
                if let Some(items) = items {
                    node = node.items(items);
                }
                node
            })
    })
}

proptest! {
    #[test]
    fn prop_validation_is_deterministic(value in arb_value(), schema in arb_schema()) {
        let first = validate(&value, &schema);
        let second = validate(&value, &schema);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn prop_type_mismatch_does_not_cascade(value in arb_value(), schema in arb_schema()) {
        let report = validate(&value, &schema);
        let mismatches: Vec<&DocPath> = report
            .diagnostics()
            .iter()
            .filter(|d| d.kind == DiagnosticKind::TypeMismatch)
            .map(|d| &d.path)
            .collect();
        for diagnostic in report.diagnostics() {
            for ancestor in &mismatches {
                prop_assert!(!diagnostic.path.is_descendant_of(ancestor));
            }
        }
    }

    #[test]
    fn prop_open_schema_accepts_everything(value in arb_value()) {
        let report = validate(&value, &SchemaNode::any());
        prop_assert!(report.diagnostics().is_empty());
        prop_assert!(report.passed());
    }

    #[test]
    fn prop_passed_iff_no_errors(value in arb_value(), schema in arb_schema()) {
        let report = validate(&value, &schema);
        prop_assert_eq!(report.passed(), report.error_count() == 0);
        prop_assert_eq!(
            report.error_count() + report.warning_count(),
            report.diagnostics().len()
        );
    }
}
