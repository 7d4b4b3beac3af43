//! Schema model
//!
//! A deliberately small subset of JSON Schema: `type`, `required`,
//! `properties`, `items`, `enum` and `additionalProperties`. Every other
//! keyword is ignored.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::format::{self, Format};
use crate::value::Value;

/// Type names a schema may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

impl SchemaType {
    /// Resolve a schema type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "object" => Some(SchemaType::Object),
            "array" => Some(SchemaType::Array),
            "string" => Some(SchemaType::String),
            "integer" => Some(SchemaType::Integer),
            "number" => Some(SchemaType::Number),
            "boolean" => Some(SchemaType::Boolean),
            "null" => Some(SchemaType::Null),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Null => "null",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected shape of one node of a configuration document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    /// `None` accepts any type
    pub expected_type: Option<SchemaType>,
    /// Names that must be present, in declaration order
    pub required: Vec<String>,
    /// Declared properties, in declaration order
    pub properties: IndexMap<String, SchemaNode>,
    /// Shape of every array element
    pub items: Option<Box<SchemaNode>>,
    /// Allowed values
    pub enum_values: Option<Vec<Value>>,
    /// `false` turns undeclared properties into errors
    pub additional_properties: bool,
}

impl Default for SchemaNode {
    fn default() -> Self {
        Self::any()
    }
}

impl SchemaNode {
    /// A node that accepts anything (the `{}` schema)
    pub fn any() -> Self {
        Self {
            expected_type: None,
            required: Vec::new(),
            properties: IndexMap::new(),
            items: None,
            enum_values: None,
            additional_properties: true,
        }
    }

    /// A node expecting `expected_type`
    pub fn typed(expected_type: SchemaType) -> Self {
        Self {
            expected_type: Some(expected_type),
            ..Self::any()
        }
    }

    /// Require a property
    pub fn require(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Declare a property
    pub fn property(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.properties.insert(name.into(), node);
        self
    }

    /// Declare the array element shape
    pub fn items(mut self, node: SchemaNode) -> Self {
        self.items = Some(Box::new(node));
        self
    }

    /// Restrict the node to a set of values
    pub fn one_of_values(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Reject properties not declared in `properties`
    pub fn closed(mut self) -> Self {
        self.additional_properties = false;
        self
    }

    /// True for a node without any constraint; it accepts its whole subtree
    pub fn is_open(&self) -> bool {
        self.expected_type.is_none()
            && self.required.is_empty()
            && self.properties.is_empty()
            && self.items.is_none()
            && self.enum_values.is_none()
            && self.additional_properties
    }

    /// Build a schema from an already parsed JSON-shaped document
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let mut location = Vec::new();
        build(value, &mut location)
    }
}

/// Parse a JSON schema document
pub fn load_schema(bytes: &[u8]) -> Result<SchemaNode, SchemaError> {
    let value = format::parse(bytes, Format::Json).map_err(|e| SchemaError::new(e.to_string()))?;
    SchemaNode::from_value(&value)
}

fn build(value: &Value, location: &mut Vec<String>) -> Result<SchemaNode, SchemaError> {
    let map = value.as_object().ok_or_else(|| {
        SchemaError::at(
            location,
            format!("schema node must be an object, found {}", value.kind()),
        )
    })?;

    let mut node = SchemaNode::any();

    for (keyword, entry) in map {
        location.push(keyword.clone());
        match keyword.as_str() {
            "type" => node.expected_type = Some(parse_type(entry, location)?),
            "required" => node.required = parse_required(entry, location)?,
            "properties" => {
                let props = entry.as_object().ok_or_else(|| {
                    SchemaError::at(
                        location,
                        format!("'properties' must be an object, found {}", entry.kind()),
                    )
                })?;
                for (name, child) in props {
                    location.push(name.clone());
                    let child = build(child, location)?;
                    location.pop();
                    node.properties.insert(name.clone(), child);
                }
            }
            "items" => node.items = Some(Box::new(build(entry, location)?)),
            "enum" => {
                let values = entry.as_array().ok_or_else(|| {
                    SchemaError::at(location, format!("'enum' must be an array, found {}", entry.kind()))
                })?;
                node.enum_values = Some(values.to_vec());
            }
            "additionalProperties" => {
                node.additional_properties = entry.as_bool().ok_or_else(|| {
                    SchemaError::at(
                        location,
                        format!("'additionalProperties' must be a boolean, found {}", entry.kind()),
                    )
                })?;
            }
            other => {
                tracing::debug!(keyword = other, path = %location.join("."), "ignoring unsupported schema keyword");
            }
        }
        location.pop();
    }

    Ok(node)
}

fn parse_type(entry: &Value, location: &[String]) -> Result<SchemaType, SchemaError> {
    match entry {
        Value::String(name) => SchemaType::from_name(name)
            .ok_or_else(|| SchemaError::at(location, format!("unknown type '{}'", name))),
        other => Err(SchemaError::at(
            location,
            format!("'type' must be a type name, found {}", other.kind()),
        )),
    }
}

fn parse_required(entry: &Value, location: &[String]) -> Result<Vec<String>, SchemaError> {
    let names = entry.as_array().ok_or_else(|| {
        SchemaError::at(location, format!("'required' must be an array, found {}", entry.kind()))
    })?;

    let mut required: Vec<String> = Vec::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        let name = name.as_str().ok_or_else(|| {
            SchemaError::at(
                location,
                format!("'required' entry {} must be a string, found {}", index, name.kind()),
            )
        })?;
        if !required.iter().any(|existing| existing == name) {
            required.push(name.to_string());
        }
    }
    Ok(required)
}
