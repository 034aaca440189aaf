//! IndexFacade - scan, build and view phases for one project
//!
//! ```text
//! scan(root)  ── DirectoryScanner ──> FileRecord[] ──> IndexStore::replace_files
//! build()     ── FileRecord[] + content ── GraphBuilder ──> IndexStore::replace_relations
//! view()      ── FileRecord[] + RelationRecord[] ── GraphAssembler ──> GraphDataset
//! ```
//!
//! Each phase replaces what it owns in one atomic store operation, so a failed
//! phase leaves the previous state readable.

use super::builder::{BuildStats, ContentSource, FsContentSource, GraphBuilder};
use super::scanner::{DirectoryScanner, ScanStats};
use crate::config::Settings;
use crate::error::{IndexError, IndexResult};
use crate::graph::{AssemblyStats, GraphAssembler, GraphDataset};
use crate::storage::{FileGraph, IndexMetadata, IndexStore, JsonIndexStore};
use crate::types::{FileRecord, ProjectId};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of a scan, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub project_id: ProjectId,
    pub root: PathBuf,
    pub stats: ScanStats,
}

/// Result of a build, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub project_id: ProjectId,
    pub stats: BuildStats,
}

pub struct IndexFacade {
    store: Arc<dyn IndexStore>,
    settings: Arc<Settings>,
    scanner: DirectoryScanner,
    builder: GraphBuilder,
    assembler: GraphAssembler,
}

impl IndexFacade {
    /// Facade persisting to a [`JsonIndexStore`] at the configured index path.
    pub fn new(settings: Arc<Settings>) -> Self {
        let store = Arc::new(JsonIndexStore::new(settings.resolved_index_path()));
        Self::with_store(settings, store)
    }

    pub fn with_store(settings: Arc<Settings>, store: Arc<dyn IndexStore>) -> Self {
        Self {
            scanner: DirectoryScanner::from_settings(&settings),
            builder: GraphBuilder::from_settings(&settings),
            assembler: GraphAssembler::new(),
            store,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &dyn IndexStore {
        self.store.as_ref()
    }

    /// Scan `root` and replace the project's file records.
    pub fn scan(&self, root: &Path, project: &ProjectId) -> IndexResult<ScanSummary> {
        let output = self.scanner.scan(root, project)?;

        let mut records = output.records;
        records.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        self.store.replace_files(project, records)?;

        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let mut metadata = self.metadata_or_new(project)?;
        metadata.record_scan(
            root.clone(),
            count_u32(output.stats.files),
            count_u32(output.stats.directories),
        );
        self.store.save_metadata(&metadata)?;

        Ok(ScanSummary {
            project_id: project.clone(),
            root,
            stats: output.stats,
        })
    }

    /// Rebuild relations from the last scan, reading content under the scanned root.
    pub fn build(&self, project: &ProjectId) -> IndexResult<BuildSummary> {
        let root = self
            .metadata(project)?
            .and_then(|m| m.root)
            .ok_or_else(|| IndexError::NotScanned(project.to_string()))?;
        let content = FsContentSource::new(root, self.settings.indexing.max_parse_bytes);
        self.build_with(project, &content)
    }

    /// Rebuild relations reading content from `content`.
    pub fn build_with(&self, project: &ProjectId, content: &dyn ContentSource) -> IndexResult<BuildSummary> {
        let files = self.scanned_files(project)?;
        let output = self.builder.build(&files, content);

        self.store.replace_relations(project, output.relations)?;

        let mut metadata = self.metadata_or_new(project)?;
        metadata.record_build(count_u32(output.stats.relations));
        self.store.save_metadata(&metadata)?;

        Ok(BuildSummary {
            project_id: project.clone(),
            stats: output.stats,
        })
    }

    /// Validated, deduplicated graph of the project's current index.
    pub fn view(&self, project: &ProjectId) -> IndexResult<(GraphDataset, AssemblyStats)> {
        let files = self.scanned_files(project)?;
        let relations = self.store.load_relations(project)?;
        Ok(self.assembler.assemble(&files, &relations))
    }

    /// Query view over [`view`](Self::view).
    pub fn file_graph(&self, project: &ProjectId) -> IndexResult<FileGraph> {
        let (dataset, _) = self.view(project)?;
        Ok(FileGraph::from_dataset(&dataset))
    }

    pub fn metadata(&self, project: &ProjectId) -> IndexResult<Option<IndexMetadata>> {
        Ok(self.store.load_metadata(project)?)
    }

    fn metadata_or_new(&self, project: &ProjectId) -> IndexResult<IndexMetadata> {
        Ok(self
            .store
            .load_metadata(project)?
            .unwrap_or_else(|| IndexMetadata::new(project.clone())))
    }

    fn scanned_files(&self, project: &ProjectId) -> IndexResult<Vec<FileRecord>> {
        self.store
            .load_files(project)?
            .ok_or_else(|| IndexError::NotScanned(project.to_string()))
    }
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
