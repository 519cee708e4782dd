//! Core types shared by the feed generator and batch processor

use crate::catalog::RepositoryId;
use crate::error::FeedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Processing stage of a single repository
///
/// A repository moves `Pending -> FetchingDetails -> FetchingTags -> Building -> Written`.
/// Any non-terminal stage may end in `Failed`; nothing is retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Not started yet
    Pending,
    /// Requesting the repository details resource
    FetchingDetails,
    /// Requesting the tag list resource
    FetchingTags,
    /// Mapping payloads to a feed document and writing it out
    Building,
    /// Feed file written (success terminal)
    Written,
    /// Processing stopped with an error (failure terminal)
    Failed,
}

impl Stage {
    /// Whether processing has finished, one way or the other
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Written | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Pending => "pending",
            Stage::FetchingDetails => "fetching details",
            Stage::FetchingTags => "fetching tags",
            Stage::Building => "building",
            Stage::Written => "written",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A repository whose feed could not be generated
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedRepository {
    /// Repository identifier as read from the list
    pub repo: RepositoryId,
    /// Stage the repository was in when it failed
    pub stage: Stage,
    /// Machine-readable error classification (see [`crate::error::Error::kind`])
    pub kind: &'static str,
    /// Human-readable error detail
    pub message: String,
}

impl From<&FeedError> for FailedRepository {
    fn from(err: &FeedError) -> Self {
        Self {
            repo: err.repo.clone(),
            stage: err.stage,
            kind: err.kind(),
            message: err.source.to_string(),
        }
    }
}

/// Outcome of one batch run
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    /// Feed files written, in processing order
    pub written: Vec<PathBuf>,
    /// Repositories that failed, in processing order
    pub failed: Vec<FailedRepository>,
}

impl BatchReport {
    /// Total number of repositories attempted
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    /// Whether every repository produced a feed
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
