//! Typed wrappers over the naming service endpoints.
//!
//! Each service borrows an [`ApiClient`](crate::client::ApiClient) and maps
//! one resource kind onto its named operations.

mod components;
mod delimiters;
mod naming;
mod resource_types;
mod taxonomy;

pub use components::{CustomComponentService, ResourceComponentService};
pub use delimiters::{active_delimiter, ResourceDelimiterService};
pub use naming::ResourceNamingService;
pub use resource_types::ResourceTypeService;
pub use taxonomy::{TaxonomyKind, TaxonomyService};
