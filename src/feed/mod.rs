//! RSS feed generation for registry repositories.
//!
//! [`build_channel`] maps the catalog payloads of one repository onto an RSS 2.0
//! channel, one item per tag, without doing any I/O. [`FeedGenerator`] drives the
//! two catalog requests, builds the channel and writes it to disk.
//!
//! The document is rendered completely in memory before the output file is
//! touched, so a failure at any stage leaves an existing feed file as it was.

use crate::catalog::{CatalogDetails, RepositoryId, TagEntry};
use crate::config::Config;
use crate::error::{FeedError, Result};
use crate::fetcher::JsonFetcher;
use crate::types::Stage;
use chrono::{DateTime, Utc};
use rss::extension::{Extension, ExtensionBuilder, ExtensionMap};
use rss::{CategoryBuilder, Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Namespace used for per-item `atom:updated` timestamps
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Value of the channel `<docs>` element
pub const RSS_DOCS_URL: &str = "https://www.rssboard.org/rss-specification";

/// Build the RSS channel for one repository
///
/// `built_at` becomes the channel `lastBuildDate`; callers capture it once per
/// repository. Channel link is `details.project_website`, or the repository's
/// artifact tag page when the catalog has none. Items follow the order of `tags`.
pub fn build_channel(
    config: &Config,
    repo: &RepositoryId,
    details: CatalogDetails,
    tags: &[TagEntry],
    built_at: DateTime<Utc>,
) -> Channel {
    let artifact_url = repo.artifact_url(config);

    // A channel without a link is not valid RSS
    let link = details
        .project_website
        .unwrap_or_else(|| artifact_url.clone());

    let categories = details
        .categories
        .into_iter()
        .map(|term| CategoryBuilder::default().name(term).build())
        .collect::<Vec<_>>();

    let items = tags
        .iter()
        .map(|tag| build_item(config, repo, tag, &artifact_url))
        .collect::<Vec<_>>();

    let mut namespaces = BTreeMap::new();
    namespaces.insert("atom".to_string(), ATOM_NAMESPACE.to_string());

    ChannelBuilder::default()
        .title(details.name)
        .link(link)
        .description(details.short_description.unwrap_or_default())
        .last_build_date(Some(built_at.to_rfc2822()))
        .pub_date(details.last_modified_date.as_deref().map(rss_date))
        .categories(categories)
        .generator(Some(format!("mcr-rss {}", env!("CARGO_PKG_VERSION"))))
        .docs(Some(RSS_DOCS_URL.to_string()))
        .namespaces(namespaces)
        .items(items)
        .build()
}

fn build_item(config: &Config, repo: &RepositoryId, tag: &TagEntry, artifact_url: &str) -> Item {
    // Guids are "{repo}:{tag}", not fetchable URLs
    let guid = GuidBuilder::default()
        .value(repo.guid(&tag.name))
        .permalink(false)
        .build();

    let mut extensions = ExtensionMap::new();
    if let Some(updated) = tag.last_modified_date.as_deref() {
        let mut atom = BTreeMap::new();
        atom.insert("updated".to_string(), vec![atom_updated(updated)]);
        extensions.insert("atom".to_string(), atom);
    }

    ItemBuilder::default()
        .title(Some(tag.name.clone()))
        // Every entry points at the repository's tag page; there are no per-tag pages
        .link(Some(artifact_url.to_string()))
        .description(Some(repo.pull_command(config, &tag.name)))
        .pub_date(tag.created_date.as_deref().map(rss_date))
        .guid(Some(guid))
        .extensions(extensions)
        .build()
}

fn atom_updated(timestamp: &str) -> Extension {
    let value = DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339())
        .unwrap_or_else(|_| timestamp.to_string());

    ExtensionBuilder::default()
        .name("atom:updated".to_string())
        .value(Some(value))
        .build()
}

/// Render a catalog timestamp in RSS (RFC 2822) form
///
/// Catalog timestamps are RFC 3339. Anything that does not parse is passed
/// through unchanged.
pub fn rss_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc).to_rfc2822())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Serialize a channel to an RSS 2.0 XML document
///
/// # Errors
/// Returns [`crate::Error::Render`] if the XML writer fails
pub fn render(channel: &Channel) -> Result<Vec<u8>> {
    let bytes = channel.pretty_write_to(Vec::new(), b' ', 2)?;
    Ok(bytes)
}

/// Fetches catalog data for a repository and writes its feed file
pub struct FeedGenerator {
    /// Shared configuration (endpoints, link roots)
    config: Arc<Config>,

    /// Fetcher for the catalog JSON resources
    fetcher: JsonFetcher,
}

impl FeedGenerator {
    /// Create a generator with a fetcher built from `config`
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let fetcher = JsonFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// Generate the feed for `repo` into `output_dir`
    ///
    /// Fetches repository details, then the tag list, builds the channel and
    /// writes `{output_dir}/{repo with '/' replaced by '_'}.xml`, overwriting any
    /// previous file. Returns the path written.
    ///
    /// # Errors
    /// Returns a [`FeedError`] carrying the stage that failed. Nothing is
    /// written unless every stage up to the write succeeded.
    pub async fn generate(
        &self,
        repo: &RepositoryId,
        output_dir: &Path,
    ) -> std::result::Result<PathBuf, FeedError> {
        let built_at = Utc::now();

        info!(repo = %repo, "Retrieving repository details...");
        let stage = Stage::FetchingDetails;
        let url = repo
            .details_url(&self.config)
            .map_err(|e| FeedError::new(repo, stage, e))?;
        let payload = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| FeedError::new(repo, stage, e))?;
        let details = CatalogDetails::from_json(payload).map_err(|e| FeedError::new(repo, stage, e))?;

        info!(repo = %repo, "Retrieving tag details...");
        let stage = Stage::FetchingTags;
        let url = repo
            .tags_url(&self.config)
            .map_err(|e| FeedError::new(repo, stage, e))?;
        let payload = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| FeedError::new(repo, stage, e))?;
        let tags = TagEntry::list_from_json(payload).map_err(|e| FeedError::new(repo, stage, e))?;
        debug!(repo = %repo, count = tags.len(), "Found {} tags.", tags.len());

        let stage = Stage::Building;
        let channel = build_channel(&self.config, repo, details, &tags, built_at);
        let bytes = render(&channel).map_err(|e| FeedError::new(repo, stage, e))?;

        let output_file = output_dir.join(repo.feed_file_name());
        info!(repo = %repo, path = %output_file.display(), "Writing feed...");
        tokio::fs::write(&output_file, bytes)
            .await
            .map_err(|e| FeedError::new(repo, stage, e))?;
        info!(repo = %repo, stage = %Stage::Written, "RSS feed saved.");

        Ok(output_file)
    }
}
