//! Error types for scanning, building and viewing a project index.

use crate::storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    /// The scan root could not be read. Never reported as an empty index.
    #[error("Cannot read project root {path}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project root {path} is not a directory")]
    RootNotDirectory { path: PathBuf },

    #[error("Invalid project id '{0}': use letters, digits, '-' or '_'")]
    InvalidProjectId(String),

    #[error("No scan found for project '{0}'. Run 'filegraph scan' first")]
    NotScanned(String),

    #[error("Failed to persist index")]
    Storage(#[from] StorageError),
}

pub type IndexResult<T> = Result<T, IndexError>;
