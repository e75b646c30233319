//! Azure Naming Tool provider
//!
//! Infrastructure-as-code provider for the
//! [Azure Naming Tool](https://github.com/mspnp/AzureNamingTool). It requests
//! and tracks generated resource names and manages the naming taxonomy
//! (environments, locations, functions, organizations, projects, units and
//! custom components) through the tool's REST API.
//!
//! # Overview
//!
//! - **[`client`]**: the HTTP client. Every call goes through a single-worker
//!   FIFO queue, so the naming service sees one request at a time in
//!   submission order.
//! - **[`services`]**: typed wrappers, one per resource kind.
//! - **[`models`]**: request and response types.
//! - **[`mapping`]**: snake_case/PascalCase translation and component flattening.
//! - **[`provider`]**: [`NamingToolProvider`], the resources and data sources.
//! - **[`service`]**: the [`ProviderService`] contract the host drives.
//! - **[`testing`]**: a harness for driving a provider in tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use aznamingtool_provider::{init_logging, NamingToolProvider, ProviderService};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!
//!     let provider = NamingToolProvider::new();
//!     // base_url, api_key and admin_password fall back to
//!     // AZ_NAMINGTOOL_BASEURL, AZ_NAMINGTOOL_APIKEY and AZ_NAMINGTOOL_ADMINPASSWORD.
//!     provider.configure(json!({})).await?;
//!
//!     let name = provider
//!         .create(
//!             "aznamingtool_resource_name",
//!             json!({"components": {
//!                 "resource_type": "vm",
//!                 "resource_environment": "dev",
//!                 "resource_location": "eastus",
//!             }}),
//!         )
//!         .await?;
//!     println!("{}", name["resource_name"]);
//!     Ok(())
//! }
//! ```
//!
//! # Using the client directly
//!
//! ```ignore
//! use aznamingtool_provider::client::ApiClient;
//! use aznamingtool_provider::config::ClientConfig;
//! use aznamingtool_provider::services::{TaxonomyKind, TaxonomyService};
//!
//! let client = ApiClient::new(ClientConfig::new("https://naming.example.com", "key"))?;
//! let locations = TaxonomyService::new(&client, TaxonomyKind::Location).get_all().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
#[allow(missing_docs)]
pub mod models;
pub mod plan;
pub mod provider;
pub mod schema;
pub mod service;
pub mod services;
pub mod testing;
pub mod types;
pub mod validation;

// Re-export main types at crate root
pub use client::ApiClient;
pub use config::{ClientConfig, ProviderConfig};
pub use error::{ApiError, ProviderError};
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use provider::NamingToolProvider;
pub use schema::ProviderSchema;
pub use service::ProviderService;
pub use types::{AttributeChange, ImportedResource, PlanResult, ProviderMetadata};
pub use validation::{is_valid, validate, validate_result};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
