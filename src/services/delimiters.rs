use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::ResourceDelimiter;

/// The first enabled delimiter in sort order.
pub fn active_delimiter(delimiters: &[ResourceDelimiter]) -> Option<&ResourceDelimiter> {
    delimiters
        .iter()
        .filter(|d| d.enabled)
        .min_by_key(|d| d.sort_order)
}

/// Reads and updates the delimiters placed between name components.
pub struct ResourceDelimiterService<'a> {
    client: &'a ApiClient,
}

impl<'a> ResourceDelimiterService<'a> {
    /// Wrap a client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List every delimiter.
    pub async fn get_all(&self) -> Result<Vec<ResourceDelimiter>, ApiError> {
        self.client.get("GetAllResourceDelimiters", &[]).await
    }

    /// Fetch one delimiter.
    pub async fn get(&self, id: &str) -> Result<ResourceDelimiter, ApiError> {
        self.client.get("GetResourceDelimiter", &[("id", id)]).await
    }

    /// The delimiter currently in use, if any.
    pub async fn active(&self) -> Result<Option<ResourceDelimiter>, ApiError> {
        let delimiters = self.get_all().await?;
        Ok(active_delimiter(&delimiters).cloned())
    }

    /// Create or update a delimiter.
    pub async fn create_or_update(
        &self,
        delimiter: &ResourceDelimiter,
    ) -> Result<ResourceDelimiter, ApiError> {
        self.client
            .post("CreateOrUpdateResourceDelimiter", Some(delimiter))
            .await
    }
}
