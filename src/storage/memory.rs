//! In-process index store, used by tests and embedders.

use super::{IndexMetadata, IndexStore, StorageResult, validate_files};
use crate::types::{FileRecord, ProjectId, RelationRecord};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryIndexStore {
    files: RwLock<HashMap<ProjectId, Vec<FileRecord>>>,
    relations: RwLock<HashMap<ProjectId, Vec<RelationRecord>>>,
    metadata: RwLock<HashMap<ProjectId, IndexMetadata>>,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndexStore for MemoryIndexStore {
    fn replace_files(&self, project: &ProjectId, files: Vec<FileRecord>) -> StorageResult<()> {
        validate_files(project, &files)?;
        // Single map insert under the write lock: readers see old or new, nothing between.
        self.files.write().insert(project.clone(), files);
        Ok(())
    }

    fn load_files(&self, project: &ProjectId) -> StorageResult<Option<Vec<FileRecord>>> {
        Ok(self.files.read().get(project).cloned())
    }

    fn replace_relations(
        &self,
        project: &ProjectId,
        relations: Vec<RelationRecord>,
    ) -> StorageResult<()> {
        self.relations.write().insert(project.clone(), relations);
        Ok(())
    }

    fn load_relations(&self, project: &ProjectId) -> StorageResult<Vec<RelationRecord>> {
        Ok(self
            .relations
            .read()
            .get(project)
            .cloned()
            .unwrap_or_default())
    }

    fn load_metadata(&self, project: &ProjectId) -> StorageResult<Option<IndexMetadata>> {
        Ok(self.metadata.read().get(project).cloned())
    }

    fn save_metadata(&self, metadata: &IndexMetadata) -> StorageResult<()> {
        self.metadata
            .write()
            .insert(metadata.project_id.clone(), metadata.clone());
        Ok(())
    }
}
