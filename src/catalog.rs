//! Cached catalog of the resource types known to the naming service.
//!
//! The catalog is loaded lazily on first use and kept until [`refresh`] is
//! called again. Resource type names in configuration are checked against
//! it before a name is requested.
//!
//! [`refresh`]: ResourceTypeCatalog::refresh

use tokio::sync::RwLock;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::ResourceType;
use crate::services::ResourceTypeService;

/// Lazily loaded set of resource types.
#[derive(Debug, Default)]
pub struct ResourceTypeCatalog {
    types: RwLock<Option<Vec<ResourceType>>>,
}

impl ResourceTypeCatalog {
    /// Create an empty, unloaded catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog preloaded with `types`.
    pub fn with_types(types: Vec<ResourceType>) -> Self {
        Self {
            types: RwLock::new(Some(types)),
        }
    }

    /// Whether the catalog has been loaded.
    pub async fn is_loaded(&self) -> bool {
        self.types.read().await.is_some()
    }

    /// Reload every resource type from the service.
    ///
    /// On failure the previous contents are kept.
    pub async fn refresh(&self, client: &ApiClient) -> Result<usize, ApiError> {
        let types = ResourceTypeService::new(client).get_all().await?;
        let count = types.len();
        *self.types.write().await = Some(types);
        debug!(count, "resource type catalog loaded");
        Ok(count)
    }

    /// Load the catalog unless it already is.
    ///
    /// Concurrent callers on a cold catalog wait on the write lock, so only
    /// the first one fetches.
    async fn ensure_loaded(&self, client: &ApiClient) -> Result<(), ApiError> {
        if self.is_loaded().await {
            return Ok(());
        }
        let mut guard = self.types.write().await;
        if guard.is_some() {
            return Ok(());
        }
        let types = ResourceTypeService::new(client).get_all().await?;
        debug!(count = types.len(), "resource type catalog loaded");
        *guard = Some(types);
        Ok(())
    }

    /// Display names of every resource type, sorted and deduplicated.
    pub async fn names(&self, client: &ApiClient) -> Result<Vec<String>, ApiError> {
        self.ensure_loaded(client).await?;
        let guard = self.types.read().await;
        let mut names: Vec<String> = guard
            .iter()
            .flatten()
            .map(|t| t.resource.clone())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Whether `name` matches a resource type by display name or short name.
    ///
    /// Matching is case-insensitive.
    pub async fn contains(&self, client: &ApiClient, name: &str) -> Result<bool, ApiError> {
        self.ensure_loaded(client).await?;
        Ok(self.lookup(name).await.is_some())
    }

    /// Find a loaded resource type by display name or short name.
    ///
    /// Does not load the catalog.
    pub async fn lookup(&self, name: &str) -> Option<ResourceType> {
        let guard = self.types.read().await;
        guard.iter().flatten().find(|t| matches(t, name)).cloned()
    }
}

fn matches(resource_type: &ResourceType, name: &str) -> bool {
    resource_type.resource.eq_ignore_ascii_case(name)
        || (!resource_type.short_name.is_empty()
            && resource_type.short_name.eq_ignore_ascii_case(name))
}
