//! Endpoint registry.
//!
//! Maps logical operation names (`"RequestName"`, `"GetResourceLocation"`, ...)
//! to absolute URL templates. Templates may contain `{name}` placeholders that
//! are filled by [`interpolate`].

use std::collections::HashMap;

use crate::error::ApiError;

/// Operation name to path template, relative to the service base URL.
const AZURE_NAMING_TOOL_ROUTES: &[(&str, &str)] = &[
    // Resource naming
    ("RequestName", "/api/ResourceNamingRequests/RequestName"),
    (
        "RequestNameWithComponents",
        "/api/ResourceNamingRequests/RequestNameWithComponents",
    ),
    ("ValidateName", "/api/ResourceNamingRequests/ValidateName"),
    ("GetGeneratedName", "/api/Admin/GetGeneratedName/{id}"),
    ("DeleteGeneratedName", "/api/Admin/DeleteGeneratedName/{id}"),
    // Custom components
    ("GetAllCustomComponents", "/api/CustomComponents"),
    ("GetCustomComponent", "/api/CustomComponents/{id}"),
    (
        "GetCustomComponentByParentId",
        "/api/CustomComponents/GetByParentId/{parentComponentId}",
    ),
    (
        "GetCustomComponentByParentType",
        "/api/CustomComponents/GetByParentType/{parentComponentType}",
    ),
    ("CreateOrUpdateCustomComponent", "/api/CustomComponents"),
    ("DeleteCustomComponent", "/api/CustomComponents/{id}"),
    (
        "DeleteCustomComponentByParentId",
        "/api/CustomComponents/DeleteByParentId/{parentComponentId}",
    ),
    // Resource components
    ("GetAllResourceComponents", "/api/ResourceComponents"),
    ("GetResourceComponent", "/api/ResourceComponents/{id}"),
    ("CreateOrUpdateResourceComponent", "/api/ResourceComponents"),
    // Resource delimiters
    ("GetAllResourceDelimiters", "/api/ResourceDelimiters"),
    ("GetResourceDelimiter", "/api/ResourceDelimiters/{id}"),
    ("CreateOrUpdateResourceDelimiter", "/api/ResourceDelimiters"),
    // Resource environments
    ("GetAllResourceEnvironments", "/api/ResourceEnvironments"),
    ("GetResourceEnvironment", "/api/ResourceEnvironments/{id}"),
    ("CreateOrUpdateResourceEnvironment", "/api/ResourceEnvironments"),
    ("DeleteResourceEnvironment", "/api/ResourceEnvironments/{id}"),
    // Resource functions
    ("GetAllResourceFunctions", "/api/ResourceFunctions"),
    ("GetResourceFunction", "/api/ResourceFunctions/{id}"),
    ("CreateOrUpdateResourceFunction", "/api/ResourceFunctions"),
    ("DeleteResourceFunction", "/api/ResourceFunctions/{id}"),
    // Resource locations
    ("GetAllResourceLocations", "/api/ResourceLocations"),
    ("GetResourceLocation", "/api/ResourceLocations/{id}"),
    ("CreateOrUpdateResourceLocation", "/api/ResourceLocations"),
    ("DeleteResourceLocation", "/api/ResourceLocations/{id}"),
    // Resource organizations
    ("GetAllResourceOrganizations", "/api/ResourceOrgs"),
    ("GetResourceOrganization", "/api/ResourceOrgs/{id}"),
    ("CreateOrUpdateResourceOrganization", "/api/ResourceOrgs"),
    ("DeleteResourceOrganization", "/api/ResourceOrgs/{id}"),
    // Resource projects / apps / services
    ("GetAllResourceProjects", "/api/ResourceProjAppSvcs"),
    ("GetResourceProject", "/api/ResourceProjAppSvcs/{id}"),
    ("CreateOrUpdateResourceProject", "/api/ResourceProjAppSvcs"),
    ("DeleteResourceProject", "/api/ResourceProjAppSvcs/{id}"),
    // Resource types
    ("GetAllResourceTypes", "/api/ResourceTypes"),
    ("GetResourceType", "/api/ResourceTypes/{id}"),
    // Resource units / departments
    ("GetAllResourceUnits", "/api/ResourceUnitDepts"),
    ("GetResourceUnit", "/api/ResourceUnitDepts/{id}"),
    ("CreateOrUpdateResourceUnit", "/api/ResourceUnitDepts"),
    ("DeleteResourceUnit", "/api/ResourceUnitDepts/{id}"),
];

/// Immutable mapping from operation name to absolute URL template.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    templates: HashMap<String, String>,
}

impl EndpointRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full Azure Naming Tool route table rooted at `base_url`.
    pub fn azure_naming_tool(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        AZURE_NAMING_TOOL_ROUTES
            .iter()
            .fold(Self::new(), |registry, (name, path)| {
                registry.with_endpoint(*name, format!("{}{}", base, path))
            })
    }

    /// Add or replace a single endpoint.
    pub fn with_endpoint(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(name.into(), template.into());
        self
    }

    /// Look up the template for an operation.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry has no operations at all.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Resolve an operation to a URL, filling placeholders from `params`.
    ///
    /// Fails with [`ApiError::Precondition`] when the registry is empty, the
    /// operation name is empty, or the operation is unknown.
    pub fn resolve(&self, name: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
        if self.is_empty() {
            return Err(ApiError::Precondition(
                "endpoint registry is empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(ApiError::Precondition(
                "operation name is empty".to_string(),
            ));
        }
        let template = self.get(name).ok_or_else(|| {
            ApiError::Precondition(format!("unknown operation '{}'", name))
        })?;
        Ok(interpolate(template, params))
    }
}

/// Replace `{key}` placeholders in `template` with the matching values.
///
/// Substitution is literal: values are not URL-encoded. Placeholders without a
/// matching key are left as they are.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |url, (key, value)| {
            url.replace(&format!("{{{}}}", key), value)
        })
}
