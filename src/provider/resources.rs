//! Resource lifecycle against the naming service.
//!
//! State is a JSON object shaped by the resource's schema. Ids travel as
//! int64 in state and as strings in URLs.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ProviderError;
use crate::mapping::{components_to_request, flatten_components};
use crate::models::{CustomComponent, ResourceEntity, ResourceGeneratedName};
use crate::services::{CustomComponentService, ResourceNamingService, TaxonomyKind, TaxonomyService};

// =========================================================================
// State helpers
// =========================================================================

pub(crate) fn int_attr(state: &Value, name: &str) -> Option<i64> {
    state.get(name).and_then(Value::as_i64)
}

pub(crate) fn str_attr(state: &Value, name: &str) -> String {
    state
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The resource id, as used in URLs.
pub(crate) fn state_id(state: &Value) -> Result<String, ProviderError> {
    match int_attr(state, "id") {
        Some(id) => Ok(id.to_string()),
        None => Err(ProviderError::InvalidRequest(
            "state has no numeric 'id'".to_string(),
        )),
    }
}

/// Parse an import id.
pub(crate) fn parse_id(id: &str) -> Result<i64, ProviderError> {
    id.trim().parse().map_err(|_| {
        ProviderError::InvalidRequest(format!("could not parse id '{}' as an integer", id))
    })
}

fn components_attr(state: &Value) -> Result<BTreeMap<String, String>, ProviderError> {
    match state.get("components") {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(value) => Ok(serde_json::from_value(value.clone())?),
    }
}

// =========================================================================
// aznamingtool_resource_name
// =========================================================================

fn resource_name_state(
    generated: &ResourceGeneratedName,
    resource_type_id: Option<i64>,
    components: BTreeMap<String, String>,
) -> Value {
    json!({
        "id": generated.id,
        "resource_name": generated.resource_name,
        "resource_type_name": generated.resource_type_name,
        "created_on": generated.created_on,
        "resource_type_id": resource_type_id,
        "components": components,
    })
}

/// Request a name, then read back what the service recorded.
pub(crate) async fn create_resource_name(
    client: &ApiClient,
    planned: &Value,
) -> Result<Value, ProviderError> {
    let components = components_attr(planned)?;
    let resource_type_id = int_attr(planned, "resource_type_id").filter(|id| *id != 0);
    let request = components_to_request(&components, resource_type_id);

    let naming = ResourceNamingService::new(client);
    let response = naming.request_name(&request).await?;
    let id = response.resource_name_details.id.to_string();
    let generated = naming.get_generated_name(&id).await?;

    Ok(resource_name_state(&generated, resource_type_id, components))
}

/// Refresh a generated name.
///
/// Configured components are kept as written; the service's own component
/// list is only used when the state has none, as after an import.
pub(crate) async fn read_resource_name(
    client: &ApiClient,
    current: &Value,
) -> Result<Value, ProviderError> {
    let id = state_id(current)?;
    let generated = ResourceNamingService::new(client)
        .get_generated_name(&id)
        .await?;

    let mut components = components_attr(current)?;
    if components.is_empty() {
        components = flatten_components(&generated.components);
    }
    Ok(resource_name_state(
        &generated,
        int_attr(current, "resource_type_id"),
        components,
    ))
}

pub(crate) async fn delete_resource_name(
    client: &ApiClient,
    current: &Value,
) -> Result<(), ProviderError> {
    let id = state_id(current)?;
    ResourceNamingService::new(client)
        .delete_generated_name(&id)
        .await?;
    Ok(())
}

pub(crate) async fn import_resource_name(client: &ApiClient, id: &str) -> Result<Value, ProviderError> {
    let id = parse_id(id)?;
    let generated = ResourceNamingService::new(client)
        .get_generated_name(&id.to_string())
        .await?;
    let components = flatten_components(&generated.components);
    Ok(resource_name_state(&generated, None, components))
}

/// Data source view of a generated name.
pub(crate) async fn read_generated_name(client: &ApiClient, config: &Value) -> Result<Value, ProviderError> {
    let id = state_id(config)?;
    let generated = ResourceNamingService::new(client)
        .get_generated_name(&id)
        .await?;
    Ok(json!({
        "id": generated.id,
        "resource_name": generated.resource_name,
        "resource_type_name": generated.resource_type_name,
        "created_on": generated.created_on,
        "components": flatten_components(&generated.components),
    }))
}

// =========================================================================
// Taxonomy resources
// =========================================================================

fn entity_from_state(state: &Value) -> ResourceEntity {
    ResourceEntity {
        id: int_attr(state, "id").unwrap_or_default(),
        name: str_attr(state, "name"),
        short_name: str_attr(state, "short_name"),
        sort_order: int_attr(state, "sort_order").unwrap_or_default(),
    }
}

fn entity_state(entity: &ResourceEntity) -> Value {
    json!({
        "id": entity.id,
        "name": entity.name,
        "short_name": entity.short_name,
        "sort_order": entity.sort_order,
    })
}

/// Save an entity and return its state.
///
/// Fields the service leaves out of its answer keep the submitted value.
pub(crate) async fn save_entity(
    client: &ApiClient,
    kind: TaxonomyKind,
    planned: &Value,
) -> Result<Value, ProviderError> {
    let entity = entity_from_state(planned);
    let mut saved = TaxonomyService::new(client, kind)
        .create_or_update(&entity)
        .await?;

    if saved.id == 0 {
        saved.id = entity.id;
    }
    if saved.name.is_empty() {
        saved.name = entity.name;
    }
    if saved.short_name.is_empty() {
        saved.short_name = entity.short_name;
    }
    Ok(entity_state(&saved))
}

pub(crate) async fn read_entity(
    client: &ApiClient,
    kind: TaxonomyKind,
    id: &str,
) -> Result<Value, ProviderError> {
    let entity = TaxonomyService::new(client, kind).get(id).await?;
    Ok(entity_state(&entity))
}

pub(crate) async fn delete_entity(
    client: &ApiClient,
    kind: TaxonomyKind,
    current: &Value,
) -> Result<(), ProviderError> {
    let id = state_id(current)?;
    TaxonomyService::new(client, kind).delete(&id).await?;
    Ok(())
}

// =========================================================================
// aznamingtool_custom_component
// =========================================================================

fn custom_component_from_state(state: &Value) -> CustomComponent {
    CustomComponent {
        id: int_attr(state, "id").unwrap_or_default(),
        parent_component: str_attr(state, "parent_component"),
        name: str_attr(state, "name"),
        short_name: str_attr(state, "short_name"),
        sort_order: int_attr(state, "sort_order").unwrap_or_default(),
        min_length: int_attr(state, "min_length").unwrap_or_default(),
        max_length: int_attr(state, "max_length").unwrap_or_default(),
    }
}

fn custom_component_state(component: &CustomComponent) -> Value {
    json!({
        "id": component.id,
        "parent_component": component.parent_component,
        "name": component.name,
        "short_name": component.short_name,
        "sort_order": component.sort_order,
        "min_length": component.min_length,
        "max_length": component.max_length,
    })
}

pub(crate) async fn save_custom_component(
    client: &ApiClient,
    planned: &Value,
) -> Result<Value, ProviderError> {
    let component = custom_component_from_state(planned);
    let mut saved = CustomComponentService::new(client)
        .create_or_update(&component)
        .await?;

    if saved.id == 0 {
        saved.id = component.id;
    }
    if saved.parent_component.is_empty() {
        saved.parent_component = component.parent_component;
    }
    Ok(custom_component_state(&saved))
}

pub(crate) async fn read_custom_component(client: &ApiClient, id: &str) -> Result<Value, ProviderError> {
    let component = CustomComponentService::new(client).get(id).await?;
    Ok(custom_component_state(&component))
}

pub(crate) async fn delete_custom_component(
    client: &ApiClient,
    current: &Value,
) -> Result<(), ProviderError> {
    let id = state_id(current)?;
    CustomComponentService::new(client).delete(&id).await?;
    Ok(())
}
