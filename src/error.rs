//! Error types for mcr-rss
//!
//! This module splits failures into three layers:
//! - [`FetchError`] for a single HTTP request against the catalog API
//! - [`Error`] for everything the library can fail with
//! - [`FeedError`] which pins an [`Error`] to the repository and [`Stage`] it happened in
//!
//! Each type exposes a short machine-readable `kind()` used in structured log fields.

use crate::catalog::RepositoryId;
use crate::types::Stage;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mcr-rss operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mcr-rss
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "catalog_base_url")
        key: Option<String>,
    },

    /// Request against the catalog API failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A payload decoded as JSON but does not have the expected shape
    #[error("unexpected {resource} payload: {source}")]
    Decode {
        /// Which resource was being decoded (e.g., "repository details")
        resource: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A mandatory field is missing from an otherwise well-formed payload
    #[error("{resource} is missing required field '{field}'")]
    RequiredField {
        /// Which resource lacked the field (e.g., "repository details", "tags[2]")
        resource: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// The repository list could not be read
    #[error("failed to read repository list {}: {source}", path.display())]
    RepoList {
        /// Path of the list file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Feed document could not be rendered to XML
    #[error("failed to render feed: {0}")]
    Render(#[from] rss::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short machine-readable classification of this error
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config",
            Error::Fetch(e) => e.kind(),
            Error::Decode { .. } => "malformed",
            Error::RequiredField { .. } => "required_field",
            Error::RepoList { .. } => "repo_list",
            Error::Render(_) => "render",
            Error::Io(_) => "io",
        }
    }
}

/// Failure of a single JSON request against the catalog API
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL for a repository could not be constructed
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The URL text that failed to parse
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// The request could not be completed (DNS, connection, timeout, interrupted body)
    #[error("request to {url} failed: {source}")]
    Transport {
        /// The requested URL
        url: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}: {body}")]
    HttpStatus {
        /// The requested URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The body is not valid JSON
    #[error("{url} returned malformed JSON: {source}")]
    Malformed {
        /// The requested URL
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Short machine-readable classification of this error
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl { .. } => "invalid_url",
            FetchError::Transport { .. } => "transport",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::Malformed { .. } => "malformed",
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            FetchError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// A feed generation failure for one repository
///
/// Carries the stage the repository was in when it failed, so the batch
/// log can say how far processing got.
#[derive(Debug, Error)]
#[error("feed for {repo} failed while {stage}: {source}")]
pub struct FeedError {
    /// Repository whose feed failed
    pub repo: RepositoryId,
    /// Stage reached before the failure
    pub stage: Stage,
    /// Underlying error
    #[source]
    pub source: Error,
}

impl FeedError {
    /// Pin `source` to `repo` at `stage`
    pub fn new(repo: &RepositoryId, stage: Stage, source: impl Into<Error>) -> Self {
        Self {
            repo: repo.clone(),
            stage,
            source: source.into(),
        }
    }

    /// Short machine-readable classification of the underlying error
    pub fn kind(&self) -> &'static str {
        self.source.kind()
    }
}
