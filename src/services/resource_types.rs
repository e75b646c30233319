use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::ResourceType;

/// Read access to the resource type catalog.
pub struct ResourceTypeService<'a> {
    client: &'a ApiClient,
}

impl<'a> ResourceTypeService<'a> {
    /// Wrap a client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List every resource type.
    pub async fn get_all(&self) -> Result<Vec<ResourceType>, ApiError> {
        self.client.get("GetAllResourceTypes", &[]).await
    }

    /// Fetch one resource type.
    pub async fn get(&self, id: &str) -> Result<ResourceType, ApiError> {
        self.client.get("GetResourceType", &[("id", id)]).await
    }
}
