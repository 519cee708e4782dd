//! Catalog API data model
//!
//! Typed views of the two JSON resources the catalog serves per repository, plus
//! [`RepositoryId`] which knows how to turn itself into endpoint URLs, feed links
//! and file names.

use crate::config::Config;
use crate::error::{Error, FetchError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use url::Url;

/// Identifier of a registry repository, e.g. `dotnet/runtime`
///
/// May contain `/`. Used verbatim as an API path segment and, with `/` replaced
/// by `_`, as the feed file name stem. No validation is applied: a malformed
/// identifier surfaces later as a URL or fetch failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(String);

impl RepositoryId {
    /// Wrap a repository path
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw repository path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Repository details endpoint: `{catalog_base_url}/{repo}/details?reg={registry_query}`
    pub fn details_url(&self, config: &Config) -> std::result::Result<Url, FetchError> {
        self.catalog_url(config, "details")
    }

    /// Tag list endpoint: `{catalog_base_url}/{repo}/tags?reg={registry_query}`
    pub fn tags_url(&self, config: &Config) -> std::result::Result<Url, FetchError> {
        self.catalog_url(config, "tags")
    }

    fn catalog_url(&self, config: &Config, resource: &str) -> std::result::Result<Url, FetchError> {
        let raw = format!(
            "{}/{}/{}",
            config.catalog_base_url.trim_end_matches('/'),
            self.0,
            resource
        );
        let mut url = Url::parse(&raw).map_err(|source| FetchError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;
        url.query_pairs_mut()
            .append_pair("reg", &config.registry_query);
        Ok(url)
    }

    /// Public tag list page: `{artifact_base_url}/{repo}/tags`
    ///
    /// Used as the channel link fallback and as the link of every entry.
    pub fn artifact_url(&self, config: &Config) -> String {
        format!(
            "{}/{}/tags",
            config.artifact_base_url.trim_end_matches('/'),
            self.0
        )
    }

    /// Command that pulls `tag` of this repository
    pub fn pull_command(&self, config: &Config, tag: &str) -> String {
        format!("docker pull {}/{}:{}", config.pull_registry, self.0, tag)
    }

    /// Feed entry guid for `tag`: `{repo}:{tag}`
    pub fn guid(&self, tag: &str) -> String {
        format!("{}:{}", self.0, tag)
    }

    /// Output file name: every `/` replaced by `_`, plus `.xml`
    pub fn feed_file_name(&self) -> String {
        format!("{}.xml", self.0.replace('/', "_"))
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepositoryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Repository details as served by `{repo}/details`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogDetails {
    /// Display name (required)
    pub name: String,
    /// Project homepage; `None` when absent, null or blank
    pub project_website: Option<String>,
    /// One-line description
    pub short_description: Option<String>,
    /// Last modification timestamp, verbatim
    pub last_modified_date: Option<String>,
    /// Category terms in source order
    pub categories: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDetails {
    name: Option<String>,
    project_website: Option<String>,
    short_description: Option<String>,
    last_modified_date: Option<String>,
    categories: Option<Vec<String>>,
}

impl CatalogDetails {
    /// Decode a details payload
    ///
    /// # Errors
    /// - [`Error::Decode`] if the payload is not an object of the expected shape
    /// - [`Error::RequiredField`] if `name` is absent or null
    pub fn from_json(value: Value) -> Result<Self> {
        let raw: RawDetails = serde_json::from_value(value).map_err(|source| Error::Decode {
            resource: "repository details".to_string(),
            source,
        })?;

        let name = raw.name.ok_or_else(|| Error::RequiredField {
            resource: "repository details".to_string(),
            field: "name",
        })?;

        Ok(Self {
            name,
            project_website: raw.project_website.filter(|link| !link.trim().is_empty()),
            short_description: raw.short_description,
            last_modified_date: raw.last_modified_date,
            categories: raw.categories.unwrap_or_default(),
        })
    }
}

/// One entry of the `{repo}/tags` list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagEntry {
    /// Tag name (required)
    pub name: String,
    /// Creation timestamp, verbatim
    pub created_date: Option<String>,
    /// Last modification timestamp, verbatim
    pub last_modified_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTag {
    name: Option<String>,
    created_date: Option<String>,
    last_modified_date: Option<String>,
}

impl TagEntry {
    /// Decode a tag list payload, preserving order
    ///
    /// # Errors
    /// - [`Error::Decode`] if the payload is not an array of tag objects
    /// - [`Error::RequiredField`] naming the first tag without a `name`
    pub fn list_from_json(value: Value) -> Result<Vec<Self>> {
        let raw: Vec<RawTag> = serde_json::from_value(value).map_err(|source| Error::Decode {
            resource: "tag list".to_string(),
            source,
        })?;

        raw.into_iter()
            .enumerate()
            .map(|(index, tag)| {
                let name = tag.name.ok_or_else(|| Error::RequiredField {
                    resource: format!("tags[{}]", index),
                    field: "name",
                })?;
                Ok(Self {
                    name,
                    created_date: tag.created_date,
                    last_modified_date: tag.last_modified_date,
                })
            })
            .collect()
    }
}
