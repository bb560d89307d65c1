//! Error types for the seasonal task engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the task engine
///
/// Repository failures are propagated to the caller unchanged apart from
/// the wrapping message. Nothing in this crate retries or downgrades them
/// into an empty result.
#[derive(Debug, Error)]
pub enum GuideError {
    /// The backing task store failed to answer a query
    #[error("failed to fetch seasonal tasks: {0}")]
    Repository(String),

    /// The task seed file could not be read
    #[error("failed to read task data from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The task seed file is not a valid task list
    #[error("failed to parse task data from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GuideError>;
