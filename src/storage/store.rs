//! Persistence boundary for project indexes.
//!
//! Every `replace_*` call is all-or-nothing: readers observe either the
//! previous set of records or the new one, never an empty or partial state.

use super::{IndexMetadata, StorageError, StorageResult};
use crate::types::{FileRecord, ProjectId, RelationRecord};
use std::collections::HashSet;

pub trait IndexStore: Send + Sync {
    /// Replace every file record of `project` with `files`.
    fn replace_files(&self, project: &ProjectId, files: Vec<FileRecord>) -> StorageResult<()>;

    /// Load the file records of `project`. `None` when the project was never scanned.
    fn load_files(&self, project: &ProjectId) -> StorageResult<Option<Vec<FileRecord>>>;

    /// Replace every relation of `project` with `relations`.
    fn replace_relations(
        &self,
        project: &ProjectId,
        relations: Vec<RelationRecord>,
    ) -> StorageResult<()>;

    fn load_relations(&self, project: &ProjectId) -> StorageResult<Vec<RelationRecord>>;

    fn load_metadata(&self, project: &ProjectId) -> StorageResult<Option<IndexMetadata>>;

    fn save_metadata(&self, metadata: &IndexMetadata) -> StorageResult<()>;
}

/// Enforce the `(project_id, file_path)` uniqueness key before a replace.
pub fn validate_files(project: &ProjectId, files: &[FileRecord]) -> StorageResult<()> {
    let mut seen = HashSet::with_capacity(files.len());
    for record in files {
        if &record.project_id != project {
            return Err(StorageError::ProjectMismatch {
                expected: project.to_string(),
                found: record.project_id.to_string(),
            });
        }
        if !seen.insert(record.file_path.as_str()) {
            return Err(StorageError::DuplicatePath {
                project: project.to_string(),
                path: record.file_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_duplicates() {
        let project = ProjectId::new("p").unwrap();
        let files = vec![
            FileRecord::file(project.clone(), "a.ts", 1, None),
            FileRecord::file(project.clone(), "a.ts", 2, None),
        ];
        let err = validate_files(&project, &files).unwrap_err();
        assert!(matches!(err, StorageError::DuplicatePath { .. }));
    }

    #[test]
    fn test_validate_rejects_foreign_records() {
        let project = ProjectId::new("p").unwrap();
        let other = ProjectId::new("q").unwrap();
        let files = vec![FileRecord::file(other, "a.ts", 1, None)];
        let err = validate_files(&project, &files).unwrap_err();
        assert!(matches!(err, StorageError::ProjectMismatch { .. }));
    }
}
