//! Resource and data source names and schemas.

use serde_json::json;

use crate::schema::{Attribute, ProviderSchema, Schema};
use crate::services::TaxonomyKind;

/// Generated resource name.
pub const RESOURCE_NAME: &str = "aznamingtool_resource_name";
/// Custom component value.
pub const CUSTOM_COMPONENT: &str = "aznamingtool_custom_component";

/// Resource type catalog data source.
pub const DATA_RESOURCE_TYPES: &str = "aznamingtool_resource_types";
/// Delimiter data source.
pub const DATA_DELIMITERS: &str = "aznamingtool_delimiters";
/// Name validation data source.
pub const DATA_VALIDATE_NAME: &str = "aznamingtool_validate_name";

/// What a resource type name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// `aznamingtool_resource_name`
    ResourceName,
    /// One of the flat taxonomy resources.
    Taxonomy(TaxonomyKind),
    /// `aznamingtool_custom_component`
    CustomComponent,
}

impl ResourceKind {
    /// Every resource this provider serves.
    pub fn all() -> impl Iterator<Item = ResourceKind> {
        std::iter::once(ResourceKind::ResourceName)
            .chain(TaxonomyKind::ALL.into_iter().map(ResourceKind::Taxonomy))
            .chain(std::iter::once(ResourceKind::CustomComponent))
    }

    /// Resolve a resource type name.
    pub fn from_type_name(name: &str) -> Option<ResourceKind> {
        ResourceKind::all().find(|kind| kind.type_name() == name)
    }

    /// The resource type name.
    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::ResourceName => RESOURCE_NAME,
            ResourceKind::CustomComponent => CUSTOM_COMPONENT,
            ResourceKind::Taxonomy(kind) => taxonomy_type_name(kind),
        }
    }

    /// The resource schema.
    pub fn schema(self) -> Schema {
        match self {
            ResourceKind::ResourceName => resource_name_schema(),
            ResourceKind::CustomComponent => custom_component_schema(),
            ResourceKind::Taxonomy(kind) => taxonomy_schema(kind),
        }
    }
}

fn taxonomy_type_name(kind: TaxonomyKind) -> &'static str {
    match kind {
        TaxonomyKind::Environment => "aznamingtool_environment",
        TaxonomyKind::Location => "aznamingtool_location",
        TaxonomyKind::Function => "aznamingtool_function",
        TaxonomyKind::Organization => "aznamingtool_organization",
        TaxonomyKind::Project => "aznamingtool_project",
        TaxonomyKind::Unit => "aznamingtool_unit_dept",
    }
}

/// The full provider schema.
pub fn provider_schema() -> ProviderSchema {
    let mut schema = ProviderSchema::new().with_provider_config(provider_config_schema());
    for kind in ResourceKind::all() {
        schema = schema.with_resource(kind.type_name(), kind.schema());
    }
    schema
        .with_data_source(RESOURCE_NAME, resource_name_data_schema())
        .with_data_source(DATA_RESOURCE_TYPES, resource_types_data_schema())
        .with_data_source(DATA_DELIMITERS, delimiters_data_schema())
        .with_data_source(DATA_VALIDATE_NAME, validate_name_data_schema())
}

fn provider_config_schema() -> Schema {
    Schema::v0()
        .with_description("Connection settings for the Azure Naming Tool")
        .with_attribute(
            "base_url",
            Attribute::optional_string()
                .with_description("Base URL of the naming service. Falls back to AZ_NAMINGTOOL_BASEURL."),
        )
        .with_attribute(
            "api_key",
            Attribute::optional_string()
                .sensitive()
                .with_description("API key. Falls back to AZ_NAMINGTOOL_APIKEY."),
        )
        .with_attribute(
            "admin_password",
            Attribute::optional_string().sensitive().with_description(
                "Admin password for admin-only operations. Falls back to AZ_NAMINGTOOL_ADMINPASSWORD.",
            ),
        )
        .with_attribute(
            "timeout_secs",
            Attribute::optional_int64().with_description("Per-request timeout in seconds."),
        )
}

fn resource_name_schema() -> Schema {
    Schema::v0()
        .with_description("A name generated by the naming service")
        .with_attribute("id", Attribute::computed_int64())
        .with_attribute("resource_name", Attribute::computed_string())
        .with_attribute("resource_type_name", Attribute::computed_string())
        .with_attribute("created_on", Attribute::computed_string())
        .with_attribute(
            "resource_type_id",
            Attribute::optional_int64().with_description("Id of the resource type"),
        )
        .with_attribute(
            "components",
            Attribute::required_string_map()
                .with_force_new()
                .with_description(
                    "Name components keyed in snake_case, e.g. resource_type or resource_environment",
                ),
        )
}

fn taxonomy_schema(kind: TaxonomyKind) -> Schema {
    Schema::v0()
        .with_description(format!("A resource {} entry", kind))
        .with_attribute("id", Attribute::computed_int64())
        .with_attribute("name", Attribute::required_string())
        .with_attribute("short_name", Attribute::required_string())
        .with_attribute("sort_order", Attribute::optional_int64().with_default(json!(0)))
}

fn custom_component_schema() -> Schema {
    Schema::v0()
        .with_description("A value of a custom name component")
        .with_attribute("id", Attribute::computed_int64())
        .with_attribute(
            "parent_component",
            Attribute::required_string().with_force_new(),
        )
        .with_attribute("name", Attribute::required_string())
        .with_attribute("short_name", Attribute::required_string())
        .with_attribute("sort_order", Attribute::optional_int64().with_default(json!(0)))
        .with_attribute("min_length", Attribute::optional_int64().with_default(json!(1)))
        .with_attribute("max_length", Attribute::optional_int64().with_default(json!(10)))
}

fn resource_name_data_schema() -> Schema {
    Schema::v0()
        .with_attribute("id", Attribute::required_int64())
        .with_attribute("resource_name", Attribute::computed_string())
        .with_attribute("resource_type_name", Attribute::computed_string())
        .with_attribute("created_on", Attribute::computed_string())
        .with_attribute("components", Attribute::computed_string_map())
}

fn resource_types_data_schema() -> Schema {
    Schema::v0().with_attribute("names", Attribute::computed_string_list())
}

fn delimiters_data_schema() -> Schema {
    Schema::v0()
        .with_attribute("delimiters", Attribute::computed_string_map())
        .with_attribute("active", Attribute::computed_string())
}

fn validate_name_data_schema() -> Schema {
    Schema::v0()
        .with_attribute("resource_type", Attribute::required_string())
        .with_attribute("name", Attribute::required_string())
        .with_attribute("resource_type_id", Attribute::optional_int64())
        .with_attribute("valid", Attribute::computed_bool())
        .with_attribute("message", Attribute::computed_string())
}
