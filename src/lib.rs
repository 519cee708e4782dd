//! # mcr-rss
//!
//! Turns Microsoft Container Registry catalog metadata into RSS 2.0 feeds, one
//! feed file per repository, so feed readers can announce new image tags.
//!
//! For each repository the catalog serves two JSON resources: repository
//! details (the channel) and the tag list (one item per tag). A batch run works
//! through a list of repositories in order; a repository that fails is logged
//! and skipped, the rest still get their feeds.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcr_rss::{BatchProcessor, Config};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let processor = BatchProcessor::new(&config)?;
//!
//!     let report = processor
//!         .process_all(Path::new("repos.txt"), &config.output_dir)
//!         .await?;
//!
//!     for failed in &report.failed {
//!         eprintln!("{}: {}", failed.repo, failed.message);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Batch processing over a repository list
pub mod batch;
/// Catalog API data model
pub mod catalog;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// RSS feed building and writing
pub mod feed;
/// JSON resource fetching
pub mod fetcher;
/// Logging setup
pub mod telemetry;
/// Core types
pub mod types;

// Re-export commonly used types
pub use batch::{BatchProcessor, read_repo_list};
pub use catalog::{CatalogDetails, RepositoryId, TagEntry};
pub use config::Config;
pub use error::{Error, FeedError, FetchError, Result};
pub use feed::{FeedGenerator, build_channel};
pub use fetcher::JsonFetcher;
pub use telemetry::{LogConfig, init_tracing};
pub use types::{BatchReport, FailedRepository, Stage};
