//! Configuration validation against a [`Schema`].
//!
//! # Example
//!
//! ```
//! use aznamingtool_provider::schema::{Attribute, Schema};
//! use aznamingtool_provider::validation::validate;
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("components", Attribute::required_string_map())
//!     .with_attribute("resource_type_id", Attribute::optional_int64());
//!
//! let diagnostics = validate(&schema, &json!({
//!     "components": {"resource_type": "vm"},
//!     "resource_type_id": "twelve"
//! }));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute.as_deref(), Some("resource_type_id"));
//! ```

use crate::schema::{Attribute, AttributeType, Diagnostic, Schema};
use serde_json::Value;

/// Validate a configuration object against a schema.
///
/// Returns one diagnostic per problem; an empty list means the value is valid.
///
/// - Required attributes must be present and non-null.
/// - Computed-only attributes must not be configured.
/// - Attributes unknown to the schema are rejected.
/// - Values must match the attribute type.
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let obj = match value {
        Value::Object(map) => map,
        Value::Null => {
            for (name, attr) in &schema.attributes {
                if attr.flags.required {
                    diagnostics.push(missing(name));
                }
            }
            return diagnostics;
        },
        other => {
            diagnostics.push(
                Diagnostic::error("Expected object")
                    .with_detail(format!("Got {}", value_type_name(other))),
            );
            return diagnostics;
        },
    };

    for (name, attr) in &schema.attributes {
        validate_attribute(name, attr, obj.get(name), &mut diagnostics);
    }

    for name in obj.keys() {
        if !schema.attributes.contains_key(name) {
            diagnostics.push(
                Diagnostic::error(format!("Unsupported attribute '{}'", name))
                    .with_detail("This attribute is not part of the schema")
                    .with_attribute(name.as_str()),
            );
        }
    }

    diagnostics
}

/// Like [`validate`], but returns `Err` with the diagnostics when any were found.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, value);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

/// Whether `value` passes [`validate`].
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate(schema, value).is_empty()
}

fn validate_attribute(
    name: &str,
    attr: &Attribute,
    value: Option<&Value>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(missing(name));
            }
        },
        Some(_) if !attr.flags.is_configurable() => {
            diagnostics.push(
                Diagnostic::error(format!("Attribute '{}' is read-only", name))
                    .with_detail("This value is computed by the provider and cannot be set")
                    .with_attribute(name),
            );
        },
        Some(v) => validate_type(&attr.attr_type, v, name, diagnostics),
    }
}

fn validate_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String => {
            if !value.is_string() {
                diagnostics.push(type_error(path, attr_type, value));
            }
        },
        AttributeType::Int64 => {
            if !(value.is_i64() || value.is_u64() && value.as_u64() <= Some(i64::MAX as u64)) {
                diagnostics.push(type_error(path, attr_type, value));
            }
        },
        AttributeType::Bool => {
            if !value.is_boolean() {
                diagnostics.push(type_error(path, attr_type, value));
            }
        },
        AttributeType::List(element_type) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    validate_type(element_type, item, &format!("{}.{}", path, i), diagnostics);
                }
            },
            None => diagnostics.push(type_error(path, attr_type, value)),
        },
        AttributeType::Map(value_type) => match value.as_object() {
            Some(entries) => {
                for (key, item) in entries {
                    validate_type(value_type, item, &format!("{}.{}", path, key), diagnostics);
                }
            },
            None => diagnostics.push(type_error(path, attr_type, value)),
        },
    }
}

fn missing(name: &str) -> Diagnostic {
    Diagnostic::error(format!("Missing required attribute '{}'", name))
        .with_detail("This attribute is required and must be provided")
        .with_attribute(name)
}

fn type_error(path: &str, expected: &AttributeType, value: &Value) -> Diagnostic {
    Diagnostic::error(format!("Invalid type for '{}'", path))
        .with_detail(format!(
            "Expected {}, got {}",
            expected.type_name(),
            value_type_name(value)
        ))
        .with_attribute(path)
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
