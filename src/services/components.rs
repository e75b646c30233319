use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{CustomComponent, ResourceComponent};

/// Reads and updates the components of the naming convention.
pub struct ResourceComponentService<'a> {
    client: &'a ApiClient,
}

impl<'a> ResourceComponentService<'a> {
    /// Wrap a client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List every component.
    pub async fn get_all(&self) -> Result<Vec<ResourceComponent>, ApiError> {
        self.client.get("GetAllResourceComponents", &[]).await
    }

    /// Fetch one component.
    pub async fn get(&self, id: &str) -> Result<ResourceComponent, ApiError> {
        self.client.get("GetResourceComponent", &[("id", id)]).await
    }

    /// Create or update a component.
    pub async fn create_or_update(
        &self,
        component: &ResourceComponent,
    ) -> Result<ResourceComponent, ApiError> {
        self.client
            .post("CreateOrUpdateResourceComponent", Some(component))
            .await
    }
}

/// CRUD over custom component values.
pub struct CustomComponentService<'a> {
    client: &'a ApiClient,
}

impl<'a> CustomComponentService<'a> {
    /// Wrap a client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List every custom component value.
    pub async fn get_all(&self) -> Result<Vec<CustomComponent>, ApiError> {
        self.client.get("GetAllCustomComponents", &[]).await
    }

    /// Fetch one value.
    pub async fn get(&self, id: &str) -> Result<CustomComponent, ApiError> {
        self.client.get("GetCustomComponent", &[("id", id)]).await
    }

    /// Values belonging to the parent component with id `parent_id`.
    pub async fn get_by_parent_id(&self, parent_id: &str) -> Result<Vec<CustomComponent>, ApiError> {
        self.client
            .get(
                "GetCustomComponentByParentId",
                &[("parentComponentId", parent_id)],
            )
            .await
    }

    /// Values belonging to the parent component named `parent_type`.
    pub async fn get_by_parent_type(
        &self,
        parent_type: &str,
    ) -> Result<Vec<CustomComponent>, ApiError> {
        self.client
            .get(
                "GetCustomComponentByParentType",
                &[("parentComponentType", parent_type)],
            )
            .await
    }

    /// Create or update a value.
    pub async fn create_or_update(
        &self,
        component: &CustomComponent,
    ) -> Result<CustomComponent, ApiError> {
        self.client
            .post("CreateOrUpdateCustomComponent", Some(component))
            .await
    }

    /// Delete one value.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete("DeleteCustomComponent", &[("id", id)])
            .await
            .map(|_| ())
    }

    /// Delete every value under a parent component.
    pub async fn delete_by_parent_id(&self, parent_id: &str) -> Result<(), ApiError> {
        self.client
            .delete(
                "DeleteCustomComponentByParentId",
                &[("parentComponentId", parent_id)],
            )
            .await
            .map(|_| ())
    }
}
