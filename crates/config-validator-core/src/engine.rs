//! Validation engine
//!
//! Walks a value tree and a schema tree together, depth-first and pre-order,
//! and collects every diagnostic in traversal order:
//!
//! - a type mismatch is reported at the node and its subtree is skipped;
//! - for objects, missing `required` names come first (declaration order),
//!   then declared properties are visited (declaration order), then
//!   undeclared keys are reported (document order);
//! - array elements are visited in index order when `items` is declared;
//! - a node with no keywords at all (`{}`) accepts its subtree unchecked.
//!
//! The walk never fails. Identical inputs always produce identical reports.

use crate::options::ValidatorOptions;
use crate::reconcile::{reconcile, Reconciliation};
use crate::report::{Coercion, Diagnostic, DocPath, ValidationReport};
use crate::schema::SchemaNode;
use crate::value::{Map, Value};

/// Validate `value` against `schema` with default options
pub fn validate(value: &Value, schema: &SchemaNode) -> ValidationReport {
    Validator::default().validate(value, schema)
}

/// The schema matcher
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate a whole document, starting at the root path `$`
    pub fn validate(&self, value: &Value, schema: &SchemaNode) -> ValidationReport {
        let mut report = ValidationReport::new();
        self.walk(value, schema, &DocPath::root(), &mut report);
        report
    }

    fn walk(&self, value: &Value, schema: &SchemaNode, path: &DocPath, report: &mut ValidationReport) {
        if schema.is_open() {
            return;
        }

        let coerced = match reconcile(value, schema.expected_type) {
            Reconciliation::Match => None,
            Reconciliation::Coercible(parsed) => {
                if let (Some(target), Value::String(text)) = (schema.expected_type, value) {
                    tracing::debug!(path = %path, text = %text, target = %target, "coerced string value");
                    report.record_coercion(Coercion {
                        path: path.clone(),
                        text: text.clone(),
                        target,
                    });
                }
                Some(parsed)
            }
            Reconciliation::Mismatch => {
                if let Some(expected) = schema.expected_type {
                    report.push(Diagnostic::type_mismatch(path.clone(), expected, value));
                }
                return;
            }
        };

        if let Some(allowed) = &schema.enum_values {
            let effective = coerced.as_ref().unwrap_or(value);
            if !allowed.iter().any(|candidate| candidate.loosely_equals(effective)) {
                report.push(Diagnostic::enum_mismatch(path.clone(), value, allowed));
            }
        }

        match value {
            Value::Object(map) => self.walk_object(map, schema, path, report),
            Value::Array(items) => {
                if let Some(item_schema) = &schema.items {
                    for (index, item) in items.iter().enumerate() {
                        self.walk(item, item_schema, &path.index(index), report);
                    }
                }
            }
            Value::Null | Value::Bool(_) | Value::Integer(_) | Value::Float(_) | Value::String(_) => {}
        }
    }

    fn walk_object(&self, map: &Map, schema: &SchemaNode, path: &DocPath, report: &mut ValidationReport) {
        for name in &schema.required {
            if !map.contains_key(name) {
                report.push(Diagnostic::missing_required(path.key(name.as_str()), name));
            }
        }

        for (key, child) in &schema.properties {
            if let Some(value) = map.get(key) {
                self.walk(value, child, &path.key(key.as_str()), report);
            }
        }

        for key in map.keys() {
            if schema.properties.contains_key(key) {
                continue;
            }
            let diagnostic = if schema.additional_properties {
                Diagnostic::unknown_property(path.key(key.as_str()), key, self.options.unknown_property_severity)
            } else {
                Diagnostic::disallowed_property(path.key(key.as_str()), key)
            };
            report.push(diagnostic);
        }
    }
}
