use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error in {path}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to commit {path}: {reason}")]
    Commit { path: PathBuf, reason: String },

    #[error("Duplicate file path '{path}' in project '{project}'")]
    DuplicatePath { project: String, path: String },

    #[error("Record for project '{found}' passed to project '{expected}'")]
    ProjectMismatch { expected: String, found: String },
}

pub type StorageResult<T> = Result<T, StorageError>;
