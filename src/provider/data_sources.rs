//! Data source reads.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::resources::{int_attr, str_attr};
use crate::catalog::ResourceTypeCatalog;
use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::models::ValidateNameRequest;
use crate::services::{active_delimiter, ResourceDelimiterService, ResourceNamingService};

/// Reload the catalog and list every resource type name.
pub(crate) async fn read_resource_types(
    client: &ApiClient,
    catalog: &ResourceTypeCatalog,
) -> Result<Value, ProviderError> {
    catalog.refresh(client).await?;
    let names = catalog.names(client).await?;
    Ok(json!({ "names": names }))
}

/// Delimiters by name, and the one currently in use.
pub(crate) async fn read_delimiters(client: &ApiClient) -> Result<Value, ProviderError> {
    let all = ResourceDelimiterService::new(client).get_all().await?;
    let active = active_delimiter(&all)
        .map(|d| d.delimiter.clone())
        .unwrap_or_default();
    let delimiters: BTreeMap<String, String> =
        all.into_iter().map(|d| (d.name, d.delimiter)).collect();

    Ok(json!({ "delimiters": delimiters, "active": active }))
}

/// Ask the service whether a name satisfies a resource type's rules.
pub(crate) async fn read_validate_name(client: &ApiClient, config: &Value) -> Result<Value, ProviderError> {
    let request = ValidateNameRequest {
        resource_type_id: int_attr(config, "resource_type_id").unwrap_or_default(),
        resource_type: str_attr(config, "resource_type"),
        name: str_attr(config, "name"),
    };
    let response = ResourceNamingService::new(client)
        .validate_name(&request)
        .await?;

    Ok(json!({
        "resource_type": request.resource_type,
        "name": request.name,
        "resource_type_id": int_attr(config, "resource_type_id"),
        "valid": response.valid,
        "message": response.message,
    }))
}
