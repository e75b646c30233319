use std::fmt;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::ResourceEntity;

/// The flat taxonomy kinds sharing the [`ResourceEntity`] shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    /// `/api/ResourceEnvironments`
    Environment,
    /// `/api/ResourceLocations`
    Location,
    /// `/api/ResourceFunctions`
    Function,
    /// `/api/ResourceOrgs`
    Organization,
    /// `/api/ResourceProjAppSvcs`
    Project,
    /// `/api/ResourceUnitDepts`
    Unit,
}

impl TaxonomyKind {
    /// Every kind, in component order.
    pub const ALL: [TaxonomyKind; 6] = [
        TaxonomyKind::Environment,
        TaxonomyKind::Location,
        TaxonomyKind::Function,
        TaxonomyKind::Organization,
        TaxonomyKind::Project,
        TaxonomyKind::Unit,
    ];

    fn noun(self) -> &'static str {
        match self {
            TaxonomyKind::Environment => "Environment",
            TaxonomyKind::Location => "Location",
            TaxonomyKind::Function => "Function",
            TaxonomyKind::Organization => "Organization",
            TaxonomyKind::Project => "Project",
            TaxonomyKind::Unit => "Unit",
        }
    }

    fn plural(self) -> String {
        format!("{}s", self.noun())
    }

    /// Operation listing every entry.
    pub fn get_all_operation(self) -> String {
        format!("GetAllResource{}", self.plural())
    }

    /// Operation fetching one entry by id.
    pub fn get_operation(self) -> String {
        format!("GetResource{}", self.noun())
    }

    /// Operation creating or updating an entry.
    pub fn create_or_update_operation(self) -> String {
        format!("CreateOrUpdateResource{}", self.noun())
    }

    /// Operation deleting an entry by id.
    pub fn delete_operation(self) -> String {
        format!("DeleteResource{}", self.noun())
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.noun().to_ascii_lowercase())
    }
}

/// CRUD over one taxonomy kind.
pub struct TaxonomyService<'a> {
    client: &'a ApiClient,
    kind: TaxonomyKind,
}

impl<'a> TaxonomyService<'a> {
    /// Wrap a client for `kind`.
    pub fn new(client: &'a ApiClient, kind: TaxonomyKind) -> Self {
        Self { client, kind }
    }

    /// The kind this service manages.
    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    /// List every entry.
    pub async fn get_all(&self) -> Result<Vec<ResourceEntity>, ApiError> {
        self.client.get(&self.kind.get_all_operation(), &[]).await
    }

    /// Fetch one entry.
    pub async fn get(&self, id: &str) -> Result<ResourceEntity, ApiError> {
        self.client.get(&self.kind.get_operation(), &[("id", id)]).await
    }

    /// Create an entry (id 0) or update an existing one.
    pub async fn create_or_update(
        &self,
        entity: &ResourceEntity,
    ) -> Result<ResourceEntity, ApiError> {
        self.client
            .post(&self.kind.create_or_update_operation(), Some(entity))
            .await
    }

    /// Delete an entry.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&self.kind.delete_operation(), &[("id", id)])
            .await
            .map(|_| ())
    }
}
