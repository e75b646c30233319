//! Provider configuration.
//!
//! Configuration arrives as the provider's JSON config object. Every field is
//! optional there because each one falls back to an environment variable:
//!
//! | Field            | Environment variable          |
//! |------------------|-------------------------------|
//! | `base_url`       | `AZ_NAMINGTOOL_BASEURL`       |
//! | `api_key`        | `AZ_NAMINGTOOL_APIKEY`        |
//! | `admin_password` | `AZ_NAMINGTOOL_ADMINPASSWORD` |
//!
//! Explicit values take precedence over the environment.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiError;

/// Environment variable holding the naming service base URL.
pub const ENV_BASE_URL: &str = "AZ_NAMINGTOOL_BASEURL";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "AZ_NAMINGTOOL_APIKEY";
/// Environment variable holding the admin password.
pub const ENV_ADMIN_PASSWORD: &str = "AZ_NAMINGTOOL_ADMINPASSWORD";

/// Transport timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw provider configuration, as written by the user.
#[derive(Clone, Default, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the naming service.
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Admin password, required for admin-only operations such as deleting names.
    #[serde(default)]
    pub admin_password: Option<String>,
    /// Transport timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// Parse the provider configuration object.
    ///
    /// `null` is treated as an empty configuration.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }

    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<ClientConfig, ApiError> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` for environment fallback.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ClientConfig, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: &Option<String>, env: &str| {
            non_empty(explicit.clone()).or_else(|| non_empty(lookup(env)))
        };

        let base_url = pick(&self.base_url, ENV_BASE_URL).ok_or_else(|| {
            ApiError::Configuration(format!(
                "base URL cannot be empty; set `base_url` or {}",
                ENV_BASE_URL
            ))
        })?;
        let api_key = pick(&self.api_key, ENV_API_KEY).ok_or_else(|| {
            ApiError::Configuration(format!(
                "API key cannot be empty; set `api_key` or {}",
                ENV_API_KEY
            ))
        })?;
        let admin_password = pick(&self.admin_password, ENV_ADMIN_PASSWORD);

        Ok(ClientConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            admin_password,
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Fully resolved client settings.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// API key sent as the `APIKey` header.
    pub api_key: String,
    /// Admin password sent as the `AdminPassword` header, when set.
    pub admin_password: Option<String>,
    /// Timeout applied by the HTTP transport to each request.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config directly, without environment fallback.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            admin_password: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the admin password.
    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = non_empty(Some(password.into()));
        self
    }

    /// Set the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
