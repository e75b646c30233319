//! Translation between the service's component model and flat attributes.
//!
//! The naming service describes a generated name as an ordered list of
//! `[ComponentKey, value]` pairs with PascalCase keys. The provider presents
//! them as a flat map keyed in snake_case, and turns such a map back into a
//! [`ResourceNameRequest`].

use std::collections::BTreeMap;

use crate::models::ResourceNameRequest;

/// Convert `PascalCase`/`camelCase` to `snake_case`.
///
/// An underscore is inserted wherever a lowercase letter or digit is followed
/// by an uppercase letter, then the whole string is lowercased.
pub fn camel_to_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;
    for c in input.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    out
}

/// Convert `snake_case` to `PascalCase`.
///
/// Splits on underscores, capitalizes the first letter of each segment and
/// concatenates.
pub fn snake_to_camel(input: &str) -> String {
    input
        .split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Flatten `[key, value]` pairs into a snake_case keyed map.
///
/// Pairs that do not have exactly two elements are skipped.
pub fn flatten_components(components: &[Vec<String>]) -> BTreeMap<String, String> {
    components
        .iter()
        .filter_map(|pair| match pair.as_slice() {
            [key, value] => Some((camel_to_snake(key), value.clone())),
            _ => None,
        })
        .collect()
}

/// Presentation keys of the standard components, in request field order.
pub const STANDARD_COMPONENTS: [&str; 8] = [
    "resource_environment",
    "resource_function",
    "resource_instance",
    "resource_location",
    "resource_org",
    "resource_proj_app_svc",
    "resource_type",
    "resource_unit_dept",
];

/// Build a name request from presentation-layer components.
///
/// Keys equal to a standard component key, ignoring ASCII case, fill the
/// typed request fields. Any other key, including near misses such as
/// `resource__type`, is passed through unchanged as a custom component.
pub fn components_to_request(
    components: &BTreeMap<String, String>,
    resource_type_id: Option<i64>,
) -> ResourceNameRequest {
    let mut request = ResourceNameRequest {
        resource_id: resource_type_id.unwrap_or_default(),
        ..Default::default()
    };

    for (key, value) in components {
        let value = value.clone();
        match key.to_ascii_lowercase().as_str() {
            "resource_environment" => request.resource_environment = value,
            "resource_function" => request.resource_function = value,
            "resource_instance" => request.resource_instance = value,
            "resource_location" => request.resource_location = value,
            "resource_org" => request.resource_org = value,
            "resource_proj_app_svc" => request.resource_proj_app_svc = value,
            "resource_type" => request.resource_type = value,
            "resource_unit_dept" => request.resource_unit_dept = value,
            _ => {
                request.custom_components.insert(key.clone(), value);
            },
        }
    }

    request
}
