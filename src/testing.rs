//! Test harness for [`ProviderService`] implementations.
//!
//! [`ProviderTester`] drives a provider the way a host would, without any
//! transport in between, and turns error diagnostics into `Err` values so
//! tests can use `?` and `unwrap` directly.
//!
//! ```ignore
//! use aznamingtool_provider::testing::ProviderTester;
//! use aznamingtool_provider::NamingToolProvider;
//! use serde_json::json;
//!
//! let tester = ProviderTester::new(NamingToolProvider::new());
//! tester.configure(json!({"base_url": stub.url(), "api_key": "k"})).await?;
//! let state = tester
//!     .lifecycle_create("aznamingtool_environment", json!({"name": "Development", "short_name": "dev"}))
//!     .await?;
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::error::ProviderError;
use crate::schema::{Diagnostic, ProviderSchema};
use crate::service::ProviderService;
use crate::types::{ImportedResource, PlanResult};

/// Drives a provider through its host-facing operations.
pub struct ProviderTester<P: ProviderService> {
    provider: P,
}

impl<P: ProviderService> ProviderTester<P> {
    /// Wrap `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The provider's schema.
    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Resource type names.
    pub fn resource_types(&self) -> Vec<String> {
        self.provider.metadata().resources
    }

    /// Data source type names.
    pub fn data_source_types(&self) -> Vec<String> {
        self.provider.metadata().data_sources
    }

    /// Validate provider configuration; error diagnostics become `Err`.
    pub async fn validate_provider_config(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.validate_provider_config(config).await?;
        check_diagnostics(diagnostics)
    }

    /// Configure the provider; error diagnostics become `Err`.
    pub async fn configure(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.configure(config).await?;
        check_diagnostics(diagnostics)
    }

    /// Stop the provider.
    pub async fn stop(&self) -> Result<(), ProviderError> {
        self.provider.stop().await
    }

    /// Validate a resource configuration; error diagnostics become `Err`.
    pub async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        let diagnostics = self
            .provider
            .validate_resource_config(resource_type, config)
            .await?;
        check_diagnostics(diagnostics)
    }

    /// Raw resource config diagnostics, warnings included.
    pub async fn resource_config_diagnostics(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        self.provider
            .validate_resource_config(resource_type, config)
            .await
    }

    /// Plan a creation.
    pub async fn plan_create(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider.plan(resource_type, None, config).await
    }

    /// Plan an update from `prior_state` to `config`.
    pub async fn plan_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, Some(prior_state), config)
            .await
    }

    /// Plan a deletion.
    pub async fn plan_delete(
        &self,
        resource_type: &str,
        prior_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, Some(prior_state), Value::Null)
            .await
    }

    /// Create a resource.
    pub async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        self.provider.create(resource_type, planned_state).await
    }

    /// Read a resource.
    pub async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
        self.provider.read(resource_type, current_state).await
    }

    /// Update a resource.
    pub async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .update(resource_type, prior_state, planned_state)
            .await
    }

    /// Delete a resource.
    pub async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        self.provider.delete(resource_type, current_state).await
    }

    /// Import a resource by id.
    pub async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        self.provider.import_resource(resource_type, id).await
    }

    /// Validate a data source configuration; error diagnostics become `Err`.
    pub async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        let diagnostics = self
            .provider
            .validate_data_source_config(data_source_type, config)
            .await?;
        check_diagnostics(diagnostics)
    }

    /// Read a data source.
    pub async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .read_data_source(data_source_type, config)
            .await
    }

    // =========================================================================
    // Lifecycle Helpers
    // =========================================================================

    /// plan → create → read. Returns the state after read.
    pub async fn lifecycle_create(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let plan = self.plan_create(resource_type, config).await?;
        let created = self.create(resource_type, plan.planned_state).await?;
        self.read(resource_type, created).await
    }

    /// plan → update → read. Returns the state after read.
    ///
    /// A plan that requires replacement is applied as delete then create.
    pub async fn lifecycle_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let plan = self
            .plan_update(resource_type, prior_state.clone(), config)
            .await?;
        let applied = if plan.requires_replace {
            self.delete(resource_type, prior_state).await?;
            self.create(resource_type, plan.planned_state).await?
        } else {
            self.update(resource_type, prior_state, plan.planned_state)
                .await?
        };
        self.read(resource_type, applied).await
    }

    /// plan → delete.
    pub async fn lifecycle_delete(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<(), ProviderError> {
        let plan = self
            .plan_delete(resource_type, current_state.clone())
            .await?;
        if !plan.is_destroy() {
            return Err(ProviderError::Sdk(format!(
                "delete plan for {} keeps a planned state",
                resource_type
            )));
        }
        self.delete(resource_type, current_state).await
    }

    /// import → read. Returns the state of the single imported object.
    pub async fn lifecycle_import(&self, resource_type: &str, id: &str) -> Result<Value, ProviderError> {
        let mut imported = self.import_resource(resource_type, id).await?;
        let resource = match imported.len() {
            1 => imported.remove(0),
            n => {
                return Err(ProviderError::Sdk(format!(
                    "expected one imported resource, got {}",
                    n
                )))
            },
        };
        self.read(&resource.resource_type, resource.state).await
    }
}

/// Failure of a tester operation.
#[derive(Debug, Error)]
pub enum TestError {
    /// The provider answered with error diagnostics.
    #[error("operation failed with {} diagnostic(s): {}", .0.len(), summarize(.0))]
    Diagnostics(Vec<Diagnostic>),
    /// The provider returned an error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| {
            let mut line = d.summary.clone();
            if let Some(detail) = &d.detail {
                line.push_str(": ");
                line.push_str(detail);
            }
            if let Some(attr) = &d.attribute {
                line.push_str(&format!(" (at {})", attr));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn check_diagnostics(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<_> = diagnostics.into_iter().filter(Diagnostic::is_error).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

// =========================================================================
// Assertion Helpers
// =========================================================================

/// Assert that a plan creates something and replaces nothing.
pub fn assert_plan_creates(plan: &PlanResult) {
    assert!(
        plan.has_changes(),
        "Expected plan to have changes for create, but got no changes"
    );
    assert!(!plan.requires_replace, "Expected plan to create, not replace");
}

/// Assert that a plan has no changes.
pub fn assert_plan_no_changes(plan: &PlanResult) {
    assert!(
        !plan.has_changes(),
        "Expected no changes, but got {} change(s): {:?}",
        plan.changes.len(),
        plan.changed_paths()
    );
}

/// Assert that a plan requires replacement.
pub fn assert_plan_replaces(plan: &PlanResult) {
    assert!(
        plan.requires_replace,
        "Expected plan to require replacement, but it does not"
    );
}

/// Assert that a plan updates in place.
pub fn assert_plan_updates_in_place(plan: &PlanResult) {
    assert!(plan.has_changes(), "Expected plan to have changes");
    assert!(
        !plan.requires_replace,
        "Expected plan to update in place, but it requires replacement"
    );
}

/// Assert that a plan changes the attribute `path`.
pub fn assert_plan_changes_attribute(plan: &PlanResult, path: &str) {
    assert!(
        plan.change(path).is_some(),
        "Expected plan to change attribute '{}'. Changed attributes: {:?}",
        path,
        plan.changed_paths()
    );
}

/// Assert that diagnostics contain no errors.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics.iter().filter(|d| d.is_error()).collect();
    assert!(
        errors.is_empty(),
        "Expected no errors, but got {} error(s): {:?}",
        errors.len(),
        errors.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

/// Assert that some error diagnostic's summary contains `substring`.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    assert!(
        diagnostics
            .iter()
            .any(|d| d.is_error() && d.summary.contains(substring)),
        "Expected an error containing '{}'. Errors: {:?}",
        substring,
        diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| &d.summary)
            .collect::<Vec<_>>()
    );
}

/// Assert that some warning diagnostic's summary contains `substring`.
pub fn assert_warning_contains(diagnostics: &[Diagnostic], substring: &str) {
    assert!(
        diagnostics
            .iter()
            .any(|d| !d.is_error() && d.summary.contains(substring)),
        "Expected a warning containing '{}'. Diagnostics: {:?}",
        substring,
        diagnostics.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{plan, plan_destroy};
    use crate::schema::{Attribute, Schema};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use tokio::sync::Mutex;

    /// Keeps environments in memory, keyed by id.
    #[derive(Default)]
    struct MemoryProvider {
        next_id: AtomicI64,
        store: Mutex<BTreeMap<i64, Value>>,
    }

    fn environment_schema() -> Schema {
        Schema::v0()
            .with_attribute("id", Attribute::computed_int64())
            .with_attribute("name", Attribute::required_string())
            .with_attribute("short_name", Attribute::required_string().with_force_new())
    }

    #[async_trait::async_trait]
    impl ProviderService for MemoryProvider {
        fn schema(&self) -> ProviderSchema {
            ProviderSchema::new().with_resource("memory_environment", environment_schema())
        }

        async fn configure(&self, _config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
            Ok(vec![])
        }

        async fn validate_resource_config(
            &self,
            _resource_type: &str,
            config: Value,
        ) -> Result<Vec<Diagnostic>, ProviderError> {
            Ok(crate::validation::validate(&environment_schema(), &config))
        }

        async fn plan(
            &self,
            _resource_type: &str,
            prior_state: Option<Value>,
            proposed_state: Value,
        ) -> Result<PlanResult, ProviderError> {
            Ok(match (&prior_state, proposed_state.is_null()) {
                (Some(prior), true) => plan_destroy(prior),
                _ => plan(&environment_schema(), prior_state.as_ref(), &proposed_state),
            })
        }

        async fn create(&self, _resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let mut state = planned_state;
            state["id"] = json!(id);
            self.store.lock().await.insert(id, state.clone());
            Ok(state)
        }

        async fn read(&self, _resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
            let id = current_state["id"].as_i64().unwrap_or_default();
            self.store
                .lock()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| ProviderError::NotFound(id.to_string()))
        }

        async fn update(
            &self,
            _resource_type: &str,
            _prior_state: Value,
            planned_state: Value,
        ) -> Result<Value, ProviderError> {
            let id = planned_state["id"].as_i64().unwrap_or_default();
            self.store.lock().await.insert(id, planned_state.clone());
            Ok(planned_state)
        }

        async fn delete(&self, _resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
            let id = current_state["id"].as_i64().unwrap_or_default();
            self.store.lock().await.remove(&id);
            Ok(())
        }

        async fn import_resource(
            &self,
            resource_type: &str,
            id: &str,
        ) -> Result<Vec<ImportedResource>, ProviderError> {
            let id: i64 = id
                .parse()
                .map_err(|_| ProviderError::InvalidRequest(id.to_string()))?;
            Ok(vec![ImportedResource::new(resource_type, json!({"id": id}))])
        }
    }

    fn tester() -> ProviderTester<MemoryProvider> {
        ProviderTester::new(MemoryProvider::default())
    }

    #[tokio::test]
    async fn test_schema_and_metadata() {
        let tester = tester();
        assert!(tester.schema().resources.contains_key("memory_environment"));
        assert_eq!(tester.resource_types(), vec!["memory_environment".to_string()]);
        assert!(tester.data_source_types().is_empty());
        assert!(tester.configure(json!({})).await.is_ok());
    }

    #[tokio::test]
    async fn test_validation_errors_become_err() {
        let err = tester()
            .validate_resource_config("memory_environment", json!({"name": "Development"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("short_name"));
    }

    #[tokio::test]
    async fn test_lifecycle_update_in_place() {
        let tester = tester();
        let created = tester
            .lifecycle_create("memory_environment", json!({"name": "Dev", "short_name": "dev"}))
            .await
            .unwrap();
        assert_eq!(created["id"], 1);

        let plan = tester
            .plan_update(
                "memory_environment",
                created.clone(),
                json!({"name": "Development", "short_name": "dev"}),
            )
            .await
            .unwrap();
        assert_plan_updates_in_place(&plan);
        assert_plan_changes_attribute(&plan, "name");

        let updated = tester
            .lifecycle_update(
                "memory_environment",
                created,
                json!({"name": "Development", "short_name": "dev"}),
            )
            .await
            .unwrap();
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["name"], "Development");
    }

    #[tokio::test]
    async fn test_lifecycle_update_replaces() {
        let tester = tester();
        let created = tester
            .lifecycle_create("memory_environment", json!({"name": "Dev", "short_name": "dev"}))
            .await
            .unwrap();

        let replaced = tester
            .lifecycle_update(
                "memory_environment",
                created.clone(),
                json!({"name": "Dev", "short_name": "dv"}),
            )
            .await
            .unwrap();
        assert_eq!(replaced["id"], 2);
        assert!(tester.read("memory_environment", created).await.is_err());
    }

    #[tokio::test]
    async fn test_lifecycle_delete_and_import() {
        let tester = tester();
        let created = tester
            .lifecycle_create("memory_environment", json!({"name": "Dev", "short_name": "dev"}))
            .await
            .unwrap();

        let imported = tester
            .lifecycle_import("memory_environment", "1")
            .await
            .unwrap();
        assert_eq!(imported, created);

        let plan = tester
            .plan_delete("memory_environment", created.clone())
            .await
            .unwrap();
        assert_eq!(plan.changes.len(), 3);

        tester
            .lifecycle_delete("memory_environment", created)
            .await
            .unwrap();
        assert!(matches!(
            tester.lifecycle_import("memory_environment", "1").await,
            Err(ProviderError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_no_change_plan() {
        let tester = tester();
        let state = json!({"id": 1, "name": "Dev", "short_name": "dev"});
        let plan = tester
            .plan_update("memory_environment", state, json!({"name": "Dev", "short_name": "dev"}))
            .await
            .unwrap();
        assert_plan_no_changes(&plan);
    }

    #[test]
    fn test_diagnostic_assertions() {
        let diagnostics = vec![
            Diagnostic::warning("Resource type catalog unavailable"),
            Diagnostic::error("Unknown resource type"),
        ];
        assert_error_contains(&diagnostics, "Unknown");
        assert_warning_contains(&diagnostics, "catalog");
        assert_no_errors(&diagnostics[..1]);
    }

    #[test]
    #[should_panic(expected = "Expected no errors")]
    fn test_assert_no_errors_fails() {
        assert_no_errors(&[Diagnostic::error("An error")]);
    }

    #[test]
    fn test_test_error_display() {
        let err = TestError::Diagnostics(vec![
            Diagnostic::error("First error").with_attribute("name"),
            Diagnostic::error("Second error").with_detail("More info"),
        ]);

        let display = err.to_string();
        assert!(display.starts_with("operation failed with 2 diagnostic(s)"));
        assert!(display.contains("First error (at name)"));
        assert!(display.contains("Second error: More info"));
    }
}
