//! Batch feed generation over a list of repositories
//!
//! Repositories are processed one at a time, in list order. A failure for one
//! repository is logged and recorded in the [`BatchReport`]; the batch carries on
//! with the next one. Only an unreadable list file or an output directory that
//! cannot be created stops the run, and both are checked before any repository
//! is touched.

use crate::catalog::RepositoryId;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::feed::FeedGenerator;
use crate::types::{BatchReport, FailedRepository, Stage};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Read a repository list: one identifier per line
///
/// Leading and trailing blank lines are dropped and `\r` line endings tolerated.
/// Lines are otherwise taken as-is.
///
/// # Errors
/// Returns [`Error::RepoList`] if the file cannot be read
pub async fn read_repo_list(path: &Path) -> Result<Vec<RepositoryId>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::RepoList {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(parse_repo_list(&content))
}

/// Split list file content into repository identifiers
pub fn parse_repo_list(content: &str) -> Vec<RepositoryId> {
    content
        .trim()
        .lines()
        .map(|line| RepositoryId::new(line.trim_end_matches('\r')))
        .collect()
}

/// Drives [`FeedGenerator`] over many repositories with per-repository failure isolation
pub struct BatchProcessor {
    generator: FeedGenerator,
}

impl BatchProcessor {
    /// Create a processor for `config`
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let generator = FeedGenerator::new(Arc::new(config.clone()))?;
        Ok(Self { generator })
    }

    /// Generate feeds for every repository listed in `repo_list` into `output_dir`
    ///
    /// # Errors
    /// - [`Error::RepoList`] if the list cannot be read; nothing is fetched or created
    /// - [`Error::Io`] if `output_dir` cannot be created
    ///
    /// Per-repository failures are not errors here; they are in the report.
    pub async fn process_all(&self, repo_list: &Path, output_dir: &Path) -> Result<BatchReport> {
        let repos = read_repo_list(repo_list).await?;
        info!("Found {} repositories to process.", repos.len());

        self.process_repositories(&repos, output_dir).await
    }

    /// Generate feeds for `repos` into `output_dir`, in order
    ///
    /// # Errors
    /// Returns [`Error::Io`] if `output_dir` cannot be created
    pub async fn process_repositories(
        &self,
        repos: &[RepositoryId],
        output_dir: &Path,
    ) -> Result<BatchReport> {
        tokio::fs::create_dir_all(output_dir).await?;

        let mut report = BatchReport::default();
        for repo in repos {
            debug!(repo = %repo, stage = %Stage::Pending, "Queued repository");
            info!(repo = %repo, "Generating feed for {}...", repo);

            match self.generator.generate(repo, output_dir).await {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    error!(
                        repo = %e.repo,
                        stage = %e.stage,
                        kind = e.kind(),
                        error = %e.source,
                        "Failed to generate feed for {}",
                        e.repo
                    );
                    report.failed.push(FailedRepository::from(&e));
                }
            }
        }

        info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "Finished generating feeds."
        );
        Ok(report)
    }
}
