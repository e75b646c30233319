//! Schema-driven plan computation.
//!
//! Resources in this provider share one planning rule set: configurable
//! attributes are diffed between prior state and proposed configuration,
//! computed attributes are carried over from prior state, and a change to
//! any force-new attribute replaces the resource.

use serde_json::{Map, Value};

use crate::schema::Schema;
use crate::types::{AttributeChange, PlanResult};

/// Plan a create or update from `prior` (None when creating) to `proposed`.
pub fn plan(schema: &Schema, prior: Option<&Value>, proposed: &Value) -> PlanResult {
    let prior = prior.and_then(Value::as_object);
    let proposed = proposed.as_object();

    let mut planned = Map::new();
    let mut changes = Vec::new();
    let mut requires_replace = false;

    for (name, attr) in &schema.attributes {
        let before = prior.and_then(|p| p.get(name)).filter(|v| !v.is_null());
        let configured = proposed.and_then(|p| p.get(name)).filter(|v| !v.is_null());

        if !attr.flags.is_configurable() {
            // Unknown until apply when creating or replacing.
            if let Some(value) = before {
                planned.insert(name.clone(), value.clone());
            }
            continue;
        }

        let after = configured.or(attr.default.as_ref());
        if let Some(value) = after {
            planned.insert(name.clone(), value.clone());
        }

        match (before, after) {
            (None, None) => {},
            (Some(b), Some(a)) if b == a => {},
            (b, a) => {
                if prior.is_some() && attr.force_new {
                    requires_replace = true;
                }
                changes.push(AttributeChange::new(name.as_str(), b.cloned(), a.cloned()));
            },
        }
    }

    if requires_replace {
        // A replacement gets fresh computed values.
        for (name, attr) in &schema.attributes {
            if !attr.flags.is_configurable() {
                planned.remove(name);
            }
        }
    }

    PlanResult::with_changes(Value::Object(planned), changes, requires_replace)
}

/// Plan the destruction of a resource: every prior attribute is removed.
pub fn plan_destroy(prior: &Value) -> PlanResult {
    let changes = prior
        .as_object()
        .into_iter()
        .flatten()
        .filter(|(_, v)| !v.is_null())
        .map(|(name, value)| AttributeChange::removed(name.as_str(), value.clone()))
        .collect();
    PlanResult::with_changes(Value::Null, changes, false)
}
