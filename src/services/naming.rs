use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    ResourceGeneratedName, ResourceNameRequest, ResourceNameRequestWithComponents,
    ResourceNameResponse, ValidateNameRequest, ValidateNameResponse,
};

/// Requests, validates, reads and deletes generated names.
pub struct ResourceNamingService<'a> {
    client: &'a ApiClient,
}

impl<'a> ResourceNamingService<'a> {
    /// Wrap a client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Request a name from component short names.
    ///
    /// A response with `Success: false` is returned as [`ApiError::Rejected`].
    pub async fn request_name(
        &self,
        request: &ResourceNameRequest,
    ) -> Result<ResourceNameResponse, ApiError> {
        let response = self.client.post("RequestName", Some(request)).await?;
        ensure_success(response)
    }

    /// Request a name from full component objects.
    pub async fn request_name_with_components(
        &self,
        request: &ResourceNameRequestWithComponents,
    ) -> Result<ResourceNameResponse, ApiError> {
        let response = self
            .client
            .post("RequestNameWithComponents", Some(request))
            .await?;
        ensure_success(response)
    }

    /// Check a name against a resource type's rules.
    pub async fn validate_name(
        &self,
        request: &ValidateNameRequest,
    ) -> Result<ValidateNameResponse, ApiError> {
        self.client.post("ValidateName", Some(request)).await
    }

    /// Fetch a previously generated name. Requires the admin password.
    pub async fn get_generated_name(&self, id: &str) -> Result<ResourceGeneratedName, ApiError> {
        self.client.get("GetGeneratedName", &[("id", id)]).await
    }

    /// Delete a generated name. Requires the admin password.
    pub async fn delete_generated_name(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete("DeleteGeneratedName", &[("id", id)])
            .await
            .map(|_| ())
    }
}

fn ensure_success(response: ResourceNameResponse) -> Result<ResourceNameResponse, ApiError> {
    if response.success {
        return Ok(response);
    }
    let message = if response.message.is_empty() {
        "the naming service did not report success".to_string()
    } else {
        response.message
    };
    Err(ApiError::Rejected { message })
}
