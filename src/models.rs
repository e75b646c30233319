//! Data-transfer types exchanged with the naming service.
//!
//! Requests are serialized with PascalCase keys. Responses are accepted in
//! either PascalCase or camelCase, and missing fields fall back to their
//! defaults; validation is the server's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat taxonomy entry: environment, location, function, organization,
/// project/app/service or unit/department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceEntity {
    #[serde(alias = "id")]
    pub id: i64,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "shortName")]
    pub short_name: String,
    #[serde(alias = "sortOrder")]
    pub sort_order: i64,
}

/// A resource environment (`dev`, `prd`, ...).
pub type ResourceEnvironment = ResourceEntity;
/// A resource location (`eastus`, ...).
pub type ResourceLocation = ResourceEntity;
/// A resource function.
pub type ResourceFunction = ResourceEntity;
/// A resource organization.
pub type ResourceOrganization = ResourceEntity;
/// A project, application or service.
pub type ResourceProject = ResourceEntity;
/// A unit or department.
pub type ResourceUnit = ResourceEntity;

/// Delimiter placed between name components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceDelimiter {
    #[serde(alias = "id")]
    pub id: i64,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "delimiter")]
    pub delimiter: String,
    #[serde(alias = "enabled")]
    pub enabled: bool,
    #[serde(alias = "sortOrder")]
    pub sort_order: i64,
}

/// A component of the naming convention (environment, location, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceComponent {
    #[serde(alias = "id")]
    pub id: i64,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "displayName")]
    pub display_name: String,
    #[serde(alias = "enabled")]
    pub enabled: bool,
    #[serde(alias = "sortOrder")]
    pub sort_order: i64,
    #[serde(alias = "isCustom")]
    pub is_custom: bool,
    #[serde(alias = "isFreeText")]
    pub is_free_text: bool,
    #[serde(alias = "minLength")]
    pub min_length: String,
    #[serde(alias = "maxLength")]
    pub max_length: String,
    #[serde(alias = "enforceRandom")]
    pub enforce_random: bool,
    #[serde(alias = "alphanumeric")]
    pub alphanumeric: bool,
    #[serde(alias = "applyDelimiterBefore")]
    pub apply_delimiter_before: bool,
    #[serde(alias = "applyDelimiterAfter")]
    pub apply_delimiter_after: bool,
}

/// A value of a user-defined component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CustomComponent {
    #[serde(alias = "id")]
    pub id: i64,
    #[serde(alias = "parentComponent")]
    pub parent_component: String,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "shortName")]
    pub short_name: String,
    #[serde(alias = "sortOrder")]
    pub sort_order: i64,
    #[serde(alias = "minLength")]
    pub min_length: i64,
    #[serde(alias = "maxLength")]
    pub max_length: i64,
}

/// An Azure resource type and its naming rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceType {
    #[serde(alias = "id")]
    pub id: i64,
    #[serde(alias = "resource")]
    pub resource: String,
    #[serde(alias = "optional")]
    pub optional: String,
    #[serde(alias = "exclude")]
    pub exclude: String,
    #[serde(alias = "property")]
    pub property: String,
    #[serde(alias = "shortName")]
    pub short_name: String,
    #[serde(alias = "scope")]
    pub scope: String,
    #[serde(alias = "lengthMin")]
    pub length_min: String,
    #[serde(alias = "lengthMax")]
    pub length_max: String,
    #[serde(alias = "validText")]
    pub valid_text: String,
    #[serde(alias = "invalidText")]
    pub invalid_text: String,
    #[serde(alias = "invalidCharacters")]
    pub invalid_characters: String,
    #[serde(alias = "invalidCharactersStart")]
    pub invalid_characters_start: String,
    #[serde(alias = "invalidCharactersEnd")]
    pub invalid_characters_end: String,
    #[serde(alias = "invalidCharactersConsecutive")]
    pub invalid_characters_consecutive: String,
    #[serde(alias = "regx")]
    pub regx: String,
    #[serde(alias = "staticValues")]
    pub static_values: String,
    #[serde(alias = "enabled")]
    pub enabled: bool,
    #[serde(alias = "applyDelimiter")]
    pub apply_delimiter: bool,
}

/// Request for a generated name, with components given by short name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceNameRequest {
    pub resource_environment: String,
    pub resource_function: String,
    pub resource_instance: String,
    pub resource_location: String,
    pub resource_org: String,
    pub resource_proj_app_svc: String,
    pub resource_type: String,
    pub resource_unit_dept: String,
    pub custom_components: BTreeMap<String, String>,
    pub resource_id: i64,
    pub created_by: String,
}

/// Request for a generated name, with components given as full objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceNameRequestWithComponents {
    pub resource_environment: ResourceEnvironment,
    pub resource_function: ResourceFunction,
    pub resource_delimiter: ResourceDelimiter,
    pub resource_instance: String,
    pub resource_location: ResourceLocation,
    pub resource_org: ResourceOrganization,
    pub resource_proj_app_svc: ResourceProject,
    pub resource_type: ResourceType,
    pub resource_unit_dept: ResourceUnit,
}

/// A name issued by the service.
///
/// `components` lists the `[key, value]` pairs the name was assembled from,
/// in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceGeneratedName {
    #[serde(alias = "id")]
    pub id: i64,
    #[serde(alias = "createdOn")]
    pub created_on: String,
    #[serde(alias = "resourceName")]
    pub resource_name: String,
    #[serde(alias = "resourceTypeName")]
    pub resource_type_name: String,
    #[serde(alias = "user")]
    pub user: String,
    #[serde(alias = "message")]
    pub message: String,
    #[serde(alias = "components")]
    pub components: Vec<Vec<String>>,
}

/// Answer to a name request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceNameResponse {
    #[serde(alias = "resourceName")]
    pub resource_name: String,
    #[serde(alias = "message")]
    pub message: String,
    #[serde(alias = "success")]
    pub success: bool,
    #[serde(alias = "resourceNameDetails")]
    pub resource_name_details: ResourceGeneratedName,
}

/// Request to check a name against a resource type's rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ValidateNameRequest {
    pub resource_type_id: i64,
    pub resource_type: String,
    pub name: String,
}

/// Result of a name validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ValidateNameResponse {
    #[serde(alias = "valid")]
    pub valid: bool,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "message")]
    pub message: String,
}
