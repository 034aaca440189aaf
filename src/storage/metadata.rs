//! Metadata tracking for a project's index state

use crate::types::ProjectId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata about the index state of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Version of the index format
    pub version: u32,

    pub project_id: ProjectId,

    /// Root directory of the last scan
    pub root: Option<PathBuf>,

    pub file_count: u32,
    pub directory_count: u32,
    pub relation_count: u32,

    /// Unix timestamps (seconds, UTC)
    pub last_scan: Option<u64>,
    pub last_build: Option<u64>,
}

impl IndexMetadata {
    pub const FORMAT_VERSION: u32 = 1;

    /// Create metadata for a project that has not been scanned yet
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            version: Self::FORMAT_VERSION,
            project_id,
            root: None,
            file_count: 0,
            directory_count: 0,
            relation_count: 0,
            last_scan: None,
            last_build: None,
        }
    }

    pub fn record_scan(&mut self, root: PathBuf, file_count: u32, directory_count: u32) {
        self.root = Some(root);
        self.file_count = file_count;
        self.directory_count = directory_count;
        self.last_scan = Some(utc_timestamp());
    }

    pub fn record_build(&mut self, relation_count: u32) {
        self.relation_count = relation_count;
        self.last_build = Some(utc_timestamp());
    }
}

pub fn utc_timestamp() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
