//! Configuration types for mcr-rss

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default catalog API root
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://mcr.microsoft.com/api/v1/catalog";

/// Default root of the public artifact pages, used for feed links
pub const DEFAULT_ARTIFACT_BASE_URL: &str = "https://mcr.microsoft.com/en-us/artifact/mar";

/// Default output directory for feed files
pub const DEFAULT_OUTPUT_DIR: &str = "feeds";

/// Settings for talking to the catalog API and writing feeds
///
/// Every field has a default matching the public Microsoft Container Registry,
/// so `Config::default()` works out of the box.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API root; repository endpoints are `{catalog_base_url}/{repo}/details` and `/tags`
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,

    /// Artifact page root; the fallback feed link is `{artifact_base_url}/{repo}/tags`
    #[serde(default = "default_artifact_base_url")]
    pub artifact_base_url: String,

    /// Registry host used in the `docker pull` command of each entry (default: "mcr.microsoft.com")
    #[serde(default = "default_pull_registry")]
    pub pull_registry: String,

    /// Value of the `reg` query parameter on catalog requests (default: "mar")
    #[serde(default = "default_registry_query")]
    pub registry_query: String,

    /// Directory feed files are written to (default: "feeds")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Per-request timeout in seconds (None = HTTP client default)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// User-Agent header sent with catalog requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: default_catalog_base_url(),
            artifact_base_url: default_artifact_base_url(),
            pull_registry: default_pull_registry(),
            registry_query: default_registry_query(),
            output_dir: default_output_dir(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Check that the configuration can be used to build requests and feeds
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the offending key if a base URL is not an
    /// absolute URL, or if a required string setting is empty.
    pub fn validate(&self) -> Result<()> {
        validate_base_url("catalog_base_url", &self.catalog_base_url)?;
        validate_base_url("artifact_base_url", &self.artifact_base_url)?;

        if self.registry_query.trim().is_empty() {
            return Err(config_error("registry_query", "must not be empty"));
        }
        if self.pull_registry.trim().is_empty() {
            return Err(config_error("pull_registry", "must not be empty"));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(config_error("request_timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`], if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn validate_base_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| config_error(key, &format!("invalid URL '{}': {}", value, e)))?;
    if url.cannot_be_a_base() {
        return Err(config_error(key, &format!("'{}' cannot be used as a base URL", value)));
    }
    Ok(())
}

fn config_error(key: &str, message: &str) -> Error {
    Error::Config {
        message: format!("{}: {}", key, message),
        key: Some(key.to_string()),
    }
}

fn default_catalog_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.to_string()
}

fn default_artifact_base_url() -> String {
    DEFAULT_ARTIFACT_BASE_URL.to_string()
}

fn default_pull_registry() -> String {
    "mcr.microsoft.com".to_string()
}

fn default_registry_query() -> String {
    "mar".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_user_agent() -> String {
    format!("mcr-rss/{}", env!("CARGO_PKG_VERSION"))
}
