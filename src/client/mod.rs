//! HTTP client for the Azure Naming Tool API.
//!
//! [`ApiClient`] owns the endpoint registry, the transport and the request
//! queue. It is built once when the provider is configured and cloned freely
//! afterwards: every clone funnels its calls through the same single worker.
//!
//! # Example
//!
//! ```ignore
//! use aznamingtool_provider::client::ApiClient;
//! use aznamingtool_provider::config::ClientConfig;
//! use aznamingtool_provider::models::ResourceNameResponse;
//!
//! let client = ApiClient::new(ClientConfig::new("https://naming.example.com", "key"))?;
//! let response: ResourceNameResponse = client.post("RequestName", Some(&request)).await?;
//! ```

pub mod endpoints;
mod operations;
pub mod queue;

use std::sync::Arc;

use reqwest::{Request, Url};
use tracing::info;

use crate::config::ClientConfig;
use crate::error::ApiError;

pub use endpoints::{interpolate, EndpointRegistry};
pub use queue::{ApiResponse, PendingReply, RequestQueue, QUEUE_CAPACITY};

/// Client for the naming service.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    endpoints: EndpointRegistry,
    http: reqwest::Client,
    queue: RequestQueue,
}

impl ApiClient {
    /// Build a client with the default transport and the full route table.
    ///
    /// Must be called from within a tokio runtime; the queue worker is
    /// spawned onto it.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        ClientBuilder::new(config).build()
    }

    /// Start building a client with custom parts.
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Base URL of the naming service.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The endpoint registry.
    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.inner.endpoints
    }

    /// The underlying transport, for building requests.
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// The request queue shared by every clone of this client.
    pub fn queue(&self) -> &RequestQueue {
        &self.inner.queue
    }

    /// Submit a prepared request through the queue and wait for its result.
    ///
    /// Authentication headers are added by the queue worker.
    pub async fn submit(&self, request: &Request) -> Result<ApiResponse, ApiError> {
        self.inner.queue.submit(request).await
    }

    /// Enqueue a prepared request without waiting for it.
    pub async fn enqueue(&self, request: &Request) -> Result<PendingReply, ApiError> {
        self.inner.queue.enqueue(request).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("endpoints", &self.inner.endpoints.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`].
pub struct ClientBuilder {
    config: ClientConfig,
    http: Option<reqwest::Client>,
    endpoints: Option<EndpointRegistry>,
}

impl ClientBuilder {
    /// Start from resolved client settings.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: None,
            endpoints: None,
        }
    }

    /// Use a caller-supplied transport instead of building one.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Use a custom endpoint registry instead of the Azure Naming Tool routes.
    pub fn endpoints(mut self, endpoints: EndpointRegistry) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Validate the settings, build the transport and start the queue worker.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let ClientConfig {
            base_url,
            api_key,
            admin_password,
            timeout,
        } = self.config;

        if base_url.is_empty() {
            return Err(ApiError::Configuration(
                "base URL cannot be empty".to_string(),
            ));
        }
        if api_key.is_empty() {
            return Err(ApiError::Configuration("API key cannot be empty".to_string()));
        }
        Url::parse(&base_url).map_err(|e| {
            ApiError::Configuration(format!("invalid base URL '{}': {}", base_url, e))
        })?;

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            ApiError::Precondition("the client must be created inside a tokio runtime".to_string())
        })?;

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| ApiError::transport("failed to build HTTP client", e))?,
        };
        let endpoints = self
            .endpoints
            .unwrap_or_else(|| EndpointRegistry::azure_naming_tool(&base_url));
        let auth = queue::AuthHeaders::new(&api_key, admin_password.as_deref())?;
        let queue = RequestQueue::spawn(&runtime, http.clone(), auth);

        info!(
            base_url = %base_url,
            endpoints = endpoints.len(),
            admin = admin_password.is_some(),
            "Naming service client configured"
        );

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                base_url,
                endpoints,
                http,
                queue,
            }),
        })
    }
}
