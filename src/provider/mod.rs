//! The Azure Naming Tool provider.
//!
//! [`NamingToolProvider`] serves generated names, the flat taxonomy
//! (environments, locations, functions, organizations, projects, units) and
//! custom component values as resources, plus read-only data sources for the
//! resource type catalog, delimiters and name validation.
//!
//! The provider holds no client until [`configure`] succeeds. Each
//! configuration gets its own client, queue and resource type catalog;
//! configuring again replaces all three.
//!
//! [`configure`]: ProviderService::configure

mod data_sources;
mod resources;
mod schemas;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::ResourceTypeCatalog;
use crate::client::ApiClient;
use crate::config::{ClientConfig, ProviderConfig, ENV_ADMIN_PASSWORD};
use crate::error::ProviderError;
use crate::plan::{plan, plan_destroy};
use crate::schema::{Diagnostic, ProviderSchema};
use crate::service::ProviderService;
use crate::types::{ImportedResource, PlanResult};
use crate::validation::validate;

pub use schemas::{
    provider_schema, ResourceKind, CUSTOM_COMPONENT, DATA_DELIMITERS, DATA_RESOURCE_TYPES,
    DATA_VALIDATE_NAME, RESOURCE_NAME,
};

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

struct Configured {
    client: ApiClient,
    catalog: ResourceTypeCatalog,
}

/// Provider for the Azure Naming Tool.
pub struct NamingToolProvider {
    configured: RwLock<Option<Arc<Configured>>>,
    env: EnvLookup,
}

impl NamingToolProvider {
    /// A provider that falls back to the process environment.
    pub fn new() -> Self {
        Self::with_env_lookup(|key| std::env::var(key).ok())
    }

    /// A provider that falls back to `lookup` instead of the process
    /// environment.
    pub fn with_env_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            configured: RwLock::new(None),
            env: Arc::new(lookup),
        }
    }

    /// The client created by the last successful `configure`.
    pub async fn client(&self) -> Result<ApiClient, ProviderError> {
        Ok(self.configured().await?.client.clone())
    }

    async fn configured(&self) -> Result<Arc<Configured>, ProviderError> {
        self.configured.read().await.clone().ok_or_else(|| {
            ProviderError::Configuration("the provider has not been configured".to_string())
        })
    }

    fn resolve(&self, config: Value) -> Result<ClientConfig, ProviderError> {
        let config = ProviderConfig::from_value(config)
            .map_err(|e| ProviderError::Configuration(format!("invalid provider config: {}", e)))?;
        Ok(config.resolve_with(|key| (self.env)(key))?)
    }

    async fn check_resource_type(&self, config: &Value) -> Vec<Diagnostic> {
        let resource_type = config
            .get("components")
            .and_then(|c| c.get("resource_type"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        if resource_type.is_empty() {
            return vec![Diagnostic::error("Missing component 'resource_type'")
                .with_detail("Every generated name needs a resource type")
                .with_attribute("components.resource_type")];
        }

        let configured = match self.configured().await {
            Ok(configured) => configured,
            Err(_) => {
                debug!("provider not configured yet, skipping resource type check");
                return vec![];
            },
        };

        match configured
            .catalog
            .contains(&configured.client, resource_type)
            .await
        {
            Ok(true) => vec![],
            Ok(false) => vec![Diagnostic::error(format!(
                "Unknown resource type '{}'",
                resource_type
            ))
            .with_detail("Use the aznamingtool_resource_types data source to list valid types")
            .with_attribute("components.resource_type")],
            Err(e) => {
                warn!(error = %e, "could not load resource type catalog");
                vec![Diagnostic::warning("Resource type catalog unavailable")
                    .with_detail(format!("'{}' was not checked: {}", resource_type, e))
                    .with_attribute("components.resource_type")]
            },
        }
    }
}

impl Default for NamingToolProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn resource_kind(resource_type: &str) -> Result<ResourceKind, ProviderError> {
    ResourceKind::from_type_name(resource_type)
        .ok_or_else(|| ProviderError::UnknownResource(resource_type.to_string()))
}

fn name_update_unsupported() -> ProviderError {
    ProviderError::Unimplemented(
        "generated names cannot be updated; change `components` to request a new one".to_string(),
    )
}

fn log_failure<T>(operation: &str, result: Result<T, ProviderError>) -> Result<T, ProviderError> {
    if let Err(e) = &result {
        error!(operation, error = %e, "operation failed");
    }
    result
}

#[async_trait::async_trait]
impl ProviderService for NamingToolProvider {
    fn schema(&self) -> ProviderSchema {
        provider_schema()
    }

    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let mut diagnostics = validate(&provider_schema().provider, &config);
        if diagnostics.is_empty() {
            if let Err(e) = self.resolve(config) {
                diagnostics.push(
                    Diagnostic::error("Invalid provider configuration").with_detail(e.message()),
                );
            }
        }
        Ok(diagnostics)
    }

    #[instrument(skip(self, config), name = "provider.configure")]
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let client_config = self.resolve(config)?;
        let admin = client_config.admin_password.is_some();
        let client = log_failure("configure", ApiClient::new(client_config).map_err(Into::into))?;

        *self.configured.write().await = Some(Arc::new(Configured {
            client,
            catalog: ResourceTypeCatalog::new(),
        }));
        info!(admin, "provider configured");

        let mut diagnostics = Vec::new();
        if !admin {
            diagnostics.push(
                Diagnostic::warning("Admin password not set")
                    .with_detail(format!(
                        "Reading and deleting generated names requires `admin_password` or {}",
                        ENV_ADMIN_PASSWORD
                    ))
                    .with_attribute("admin_password"),
            );
        }
        Ok(diagnostics)
    }

    async fn stop(&self) -> Result<(), ProviderError> {
        // Dropping the last client handle lets the queue worker drain and exit.
        self.configured.write().await.take();
        info!("provider stopped");
        Ok(())
    }

    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let kind = resource_kind(resource_type)?;
        let mut diagnostics = validate(&kind.schema(), &config);
        if kind == ResourceKind::ResourceName && diagnostics.is_empty() {
            diagnostics.extend(self.check_resource_type(&config).await);
        }
        Ok(diagnostics)
    }

    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        let kind = resource_kind(resource_type)?;
        let result = match prior_state {
            Some(prior) if proposed_state.is_null() => plan_destroy(&prior),
            prior => plan(&kind.schema(), prior.as_ref(), &proposed_state),
        };
        debug!(
            resource_type,
            changes = result.changes.len(),
            requires_replace = result.requires_replace,
            "planned"
        );
        Ok(result)
    }

    #[instrument(skip(self, planned_state), name = "provider.create")]
    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        let kind = resource_kind(resource_type)?;
        let configured = self.configured().await?;
        let client = &configured.client;

        let result = match kind {
            ResourceKind::ResourceName => resources::create_resource_name(client, &planned_state).await,
            ResourceKind::Taxonomy(taxonomy) => {
                let mut planned = planned_state;
                if let Some(map) = planned.as_object_mut() {
                    map.remove("id");
                }
                resources::save_entity(client, taxonomy, &planned).await
            },
            ResourceKind::CustomComponent => {
                let mut planned = planned_state;
                if let Some(map) = planned.as_object_mut() {
                    map.remove("id");
                }
                resources::save_custom_component(client, &planned).await
            },
        };
        let state = log_failure("create", result)?;
        info!(id = %state["id"], "created");
        Ok(state)
    }

    #[instrument(skip(self, current_state), name = "provider.read")]
    async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
        let kind = resource_kind(resource_type)?;
        let configured = self.configured().await?;
        let client = &configured.client;

        let result = match kind {
            ResourceKind::ResourceName => resources::read_resource_name(client, &current_state).await,
            ResourceKind::Taxonomy(taxonomy) => match resources::state_id(&current_state) {
                Ok(id) => resources::read_entity(client, taxonomy, &id).await,
                Err(e) => Err(e),
            },
            ResourceKind::CustomComponent => match resources::state_id(&current_state) {
                Ok(id) => resources::read_custom_component(client, &id).await,
                Err(e) => Err(e),
            },
        };
        log_failure("read", result)
    }

    #[instrument(skip(self, prior_state, planned_state), name = "provider.update")]
    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let kind = resource_kind(resource_type)?;
        if kind == ResourceKind::ResourceName {
            return Err(name_update_unsupported());
        }
        let configured = self.configured().await?;
        let client = &configured.client;

        let mut planned = planned_state;
        if let (Some(map), Some(id)) = (planned.as_object_mut(), prior_state.get("id")) {
            map.insert("id".to_string(), id.clone());
        }

        let result = match kind {
            ResourceKind::Taxonomy(taxonomy) => resources::save_entity(client, taxonomy, &planned).await,
            ResourceKind::CustomComponent => resources::save_custom_component(client, &planned).await,
            ResourceKind::ResourceName => Err(name_update_unsupported()),
        };
        let state = log_failure("update", result)?;
        info!(id = %state["id"], "updated");
        Ok(state)
    }

    #[instrument(skip(self, current_state), name = "provider.delete")]
    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        let kind = resource_kind(resource_type)?;
        let configured = self.configured().await?;
        let client = &configured.client;

        let result = match kind {
            ResourceKind::ResourceName => resources::delete_resource_name(client, &current_state).await,
            ResourceKind::Taxonomy(taxonomy) => {
                resources::delete_entity(client, taxonomy, &current_state).await
            },
            ResourceKind::CustomComponent => {
                resources::delete_custom_component(client, &current_state).await
            },
        };
        log_failure("delete", result)?;
        info!(id = %current_state["id"], "deleted");
        Ok(())
    }

    #[instrument(skip(self), name = "provider.import")]
    async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        let kind = resource_kind(resource_type)?;
        let configured = self.configured().await?;
        let client = &configured.client;

        let result = match kind {
            ResourceKind::ResourceName => resources::import_resource_name(client, id).await,
            ResourceKind::Taxonomy(taxonomy) => match resources::parse_id(id) {
                Ok(id) => resources::read_entity(client, taxonomy, &id.to_string()).await,
                Err(e) => Err(e),
            },
            ResourceKind::CustomComponent => match resources::parse_id(id) {
                Ok(id) => resources::read_custom_component(client, &id.to_string()).await,
                Err(e) => Err(e),
            },
        };
        let state = log_failure("import", result)?;
        Ok(vec![ImportedResource::new(resource_type, state)])
    }

    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let schema = provider_schema();
        let data_source = schema
            .data_sources
            .get(data_source_type)
            .ok_or_else(|| ProviderError::UnknownResource(data_source_type.to_string()))?;
        Ok(validate(data_source, &config))
    }

    #[instrument(skip(self, config), name = "provider.read_data_source")]
    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let configured = self.configured().await?;
        let client = &configured.client;

        let result = match data_source_type {
            RESOURCE_NAME => resources::read_generated_name(client, &config).await,
            DATA_RESOURCE_TYPES => data_sources::read_resource_types(client, &configured.catalog).await,
            DATA_DELIMITERS => data_sources::read_delimiters(client).await,
            DATA_VALIDATE_NAME => data_sources::read_validate_name(client, &config).await,
            other => Err(ProviderError::UnknownResource(format!(
                "Unknown data source type: {}",
                other
            ))),
        };
        log_failure("read_data_source", result)
    }
}
