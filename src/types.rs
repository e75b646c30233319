//! Plan, import and metadata types returned by provider operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One attribute's transition in a plan.
///
/// `before` is `None` for an attribute being set for the first time and
/// `after` is `None` for one being cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    /// Attribute name.
    pub path: String,
    /// Value in prior state.
    pub before: Option<Value>,
    /// Value in the planned state.
    pub after: Option<Value>,
}

impl AttributeChange {
    /// A change from `before` to `after`.
    pub fn new(path: impl Into<String>, before: Option<Value>, after: Option<Value>) -> Self {
        Self {
            path: path.into(),
            before,
            after,
        }
    }

    /// An attribute set where there was none.
    pub fn added(path: impl Into<String>, value: Value) -> Self {
        Self::new(path, None, Some(value))
    }

    /// An attribute cleared.
    pub fn removed(path: impl Into<String>, value: Value) -> Self {
        Self::new(path, Some(value), None)
    }

    /// An attribute whose value changes.
    pub fn modified(path: impl Into<String>, before: Value, after: Value) -> Self {
        Self::new(path, Some(before), Some(after))
    }
}

/// Outcome of planning a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// State expected after apply. `Null` when the resource is destroyed.
    pub planned_state: Value,
    /// Attribute transitions, in schema order.
    pub changes: Vec<AttributeChange>,
    /// Whether applying requires delete-then-create.
    pub requires_replace: bool,
}

impl PlanResult {
    /// A plan that leaves `state` as it is.
    pub fn no_change(state: Value) -> Self {
        Self::with_changes(state, Vec::new(), false)
    }

    /// A plan with the given transitions.
    pub fn with_changes(
        planned_state: Value,
        changes: Vec<AttributeChange>,
        requires_replace: bool,
    ) -> Self {
        Self {
            planned_state,
            changes,
            requires_replace,
        }
    }

    /// Whether anything changes.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Whether the plan destroys the resource.
    pub fn is_destroy(&self) -> bool {
        self.planned_state.is_null()
    }

    /// The transition of `path`, if it changes.
    pub fn change(&self, path: &str) -> Option<&AttributeChange> {
        self.changes.iter().find(|c| c.path == path)
    }

    /// Names of every changed attribute.
    pub fn changed_paths(&self) -> Vec<&str> {
        self.changes.iter().map(|c| c.path.as_str()).collect()
    }
}

/// State of one object found by an import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedResource {
    /// Resource type the state belongs to.
    pub resource_type: String,
    /// State as read from the naming service.
    pub state: Value,
}

impl ImportedResource {
    /// Pair a resource type with its imported state.
    pub fn new(resource_type: impl Into<String>, state: Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            state,
        }
    }
}

/// Names of the resources and data sources a provider serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderMetadata {
    /// Resource type names.
    pub resources: Vec<String>,
    /// Data source type names.
    pub data_sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_kinds() {
        let added = AttributeChange::added("short_name", json!("dev"));
        assert_eq!((added.before, added.after), (None, Some(json!("dev"))));

        let removed = AttributeChange::removed("short_name", json!("dev"));
        assert_eq!((removed.before, removed.after), (Some(json!("dev")), None));

        let modified = AttributeChange::modified("sort_order", json!(1), json!(2));
        assert_eq!(modified.before, Some(json!(1)));
        assert_eq!(modified.after, Some(json!(2)));
    }

    #[test]
    fn test_plan_lookup() {
        let unchanged = PlanResult::no_change(json!({"id": 3}));
        assert!(!unchanged.has_changes());
        assert!(!unchanged.is_destroy());

        let renamed = PlanResult::with_changes(
            json!({"id": 3, "name": "Production"}),
            vec![AttributeChange::modified("name", json!("Prod"), json!("Production"))],
            false,
        );
        assert_eq!(renamed.changed_paths(), vec!["name"]);
        assert_eq!(renamed.change("name").unwrap().before, Some(json!("Prod")));
        assert!(renamed.change("short_name").is_none());

        let destroyed = PlanResult::with_changes(Value::Null, vec![], false);
        assert!(destroyed.is_destroy());
    }

    #[test]
    fn test_imported_resource() {
        let imported = ImportedResource::new("aznamingtool_environment", json!({"id": 3}));
        assert_eq!(imported.resource_type, "aznamingtool_environment");
        assert_eq!(imported.state["id"], 3);
    }
}
