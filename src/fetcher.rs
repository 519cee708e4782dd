//! JSON resource fetching against the catalog API
//!
//! One call to [`JsonFetcher::fetch`] is exactly one HTTP GET. There are no
//! retries and no caching; callers decide what a failure means.

use crate::config::Config;
use crate::error::{Error, FetchError, Result};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// HTTP client wrapper that retrieves and decodes JSON documents
#[derive(Clone, Debug)]
pub struct JsonFetcher {
    http_client: reqwest::Client,
}

impl JsonFetcher {
    /// Create a fetcher using the user agent and timeout from `config`
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder.build().map_err(|e| Error::Config {
            message: format!("failed to create HTTP client: {}", e),
            key: None,
        })?;

        Ok(Self { http_client })
    }

    /// GET `url` and decode the body as JSON
    ///
    /// # Errors
    /// - [`FetchError::Transport`] if the request or body read cannot be completed
    /// - [`FetchError::HttpStatus`] if the response status is not 2xx
    /// - [`FetchError::Malformed`] if the body is not valid JSON
    pub async fn fetch(&self, url: &Url) -> std::result::Result<Value, FetchError> {
        debug!(url = %url, "Fetching JSON resource");

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        // Check HTTP status before trying to parse the response body
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // The batch logs the failure at error level
            debug!(
                url = %url,
                status = status.as_u16(),
                body = %body,
                "Web service returned error status"
            );
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| FetchError::Malformed {
            url: url.to_string(),
            source,
        })
    }
}
