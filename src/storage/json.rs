//! JSON-file index store.
//!
//! Layout under the base directory:
//!
//! ```text
//! <base>/<project>/files.json
//! <base>/<project>/relations.json
//! <base>/<project>/index.meta
//! ```
//!
//! Each file is written to a temporary sibling and renamed into place, so a
//! crash or serialization failure leaves the previous file untouched.

use super::{IndexMetadata, IndexStore, StorageError, StorageResult, validate_files};
use crate::types::{FileRecord, ProjectId, RelationRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const FILES_FILE: &str = "files.json";
const RELATIONS_FILE: &str = "relations.json";
const METADATA_FILE: &str = "index.meta";

#[derive(Debug, Clone)]
pub struct JsonIndexStore {
    base_path: PathBuf,
}

impl JsonIndexStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn project_dir(&self, project: &ProjectId) -> PathBuf {
        self.base_path.join(project.as_str())
    }

    /// Delete everything stored for `project`.
    pub fn clear(&self, project: &ProjectId) -> StorageResult<()> {
        let dir = self.project_dir(project);
        if dir.exists() {
            fs::remove_dir_all(&dir).map_err(|source| StorageError::Io { path: dir, source })?;
        }
        Ok(())
    }

    fn write_atomic<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> StorageResult<()> {
        let dir = path.parent().unwrap_or(&self.base_path);
        fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let temp = tempfile::NamedTempFile::new_in(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, value).map_err(|source| {
                StorageError::Serialization {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            writer.flush().map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        temp.as_file().sync_all().map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        temp.persist(path).map_err(|e| StorageError::Commit {
            path: path.to_path_buf(),
            reason: e.error.to_string(),
        })?;

        tracing::debug!(target: "store", "committed {}", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> StorageResult<Option<T>> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|source| StorageError::Serialization {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl IndexStore for JsonIndexStore {
    fn replace_files(&self, project: &ProjectId, files: Vec<FileRecord>) -> StorageResult<()> {
        validate_files(project, &files)?;
        let path = self.project_dir(project).join(FILES_FILE);
        self.write_atomic(&path, &files)
    }

    fn load_files(&self, project: &ProjectId) -> StorageResult<Option<Vec<FileRecord>>> {
        self.read_json(&self.project_dir(project).join(FILES_FILE))
    }

    fn replace_relations(
        &self,
        project: &ProjectId,
        relations: Vec<RelationRecord>,
    ) -> StorageResult<()> {
        let path = self.project_dir(project).join(RELATIONS_FILE);
        self.write_atomic(&path, &relations)
    }

    fn load_relations(&self, project: &ProjectId) -> StorageResult<Vec<RelationRecord>> {
        Ok(self
            .read_json(&self.project_dir(project).join(RELATIONS_FILE))?
            .unwrap_or_default())
    }

    fn load_metadata(&self, project: &ProjectId) -> StorageResult<Option<IndexMetadata>> {
        self.read_json(&self.project_dir(project).join(METADATA_FILE))
    }

    fn save_metadata(&self, metadata: &IndexMetadata) -> StorageResult<()> {
        let path = self.project_dir(&metadata.project_id).join(METADATA_FILE);
        self.write_atomic(&path, metadata)
    }
}
