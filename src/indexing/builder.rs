//! Relation building
//!
//! Runs every scanned file through the extractor registry, resolves the raw
//! targets and binds them to scanned paths. Files are processed in parallel on
//! a bounded rayon pool. A file whose content cannot be read contributes no
//! relations but stays in the index.

use super::targets::{TargetIndex, imports_of};
use crate::Settings;
use crate::parsing::ExtractorRegistry;
use crate::types::{FileRecord, RelationRecord};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Supplies file content to the builder by project-relative path.
pub trait ContentSource: Send + Sync {
    fn read(&self, file_path: &str) -> io::Result<String>;
}

/// Reads content from disk below a project root.
///
/// Files larger than `max_bytes`, files that are not valid UTF-8 and entries
/// that are not regular files (symlinks, pipes, sockets, devices) are
/// reported as unavailable. Symlinks are never followed.
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
    max_bytes: u64,
}

impl FsContentSource {
    pub fn new(root: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }
}

impl ContentSource for FsContentSource {
    fn read(&self, file_path: &str) -> io::Result<String> {
        let path = self.root.join(file_path);
        let meta = fs::symlink_metadata(&path)?;
        if !meta.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{file_path} is not a regular file"),
            ));
        }
        let size = meta.len();
        if size > self.max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{size} bytes exceeds parse limit of {}", self.max_bytes),
            ));
        }
        let bytes = fs::read(&path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// In-memory content keyed by file path.
impl ContentSource for HashMap<String, String> {
    fn read(&self, file_path: &str) -> io::Result<String> {
        self.get(file_path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, file_path.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Files handed to an extractor
    pub files_parsed: usize,
    /// Files no enabled extractor accepts
    pub files_skipped: usize,
    /// Files whose content was unavailable
    pub files_unreadable: usize,
    pub relations: usize,
    /// Relations whose target matched no scanned path
    pub unbound: usize,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Sorted by source, then line
    pub relations: Vec<RelationRecord>,
    pub stats: BuildStats,
}

pub struct GraphBuilder {
    registry: ExtractorRegistry,
    threads: usize,
}

impl GraphBuilder {
    pub fn new(registry: ExtractorRegistry) -> Self {
        Self {
            registry,
            threads: num_cpus::get(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(ExtractorRegistry::from_settings(settings))
            .with_threads(settings.indexing.parallel_threads)
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Extract, resolve and bind the relations of every file in `files`.
    pub fn build(&self, files: &[FileRecord], content: &dyn ContentSource) -> BuildOutput {
        let index = TargetIndex::new(files);
        let skipped = AtomicUsize::new(0);
        let unreadable = AtomicUsize::new(0);

        let extract_all = || -> Vec<Vec<RelationRecord>> {
            files
                .par_iter()
                .filter(|record| !record.is_directory)
                .map(|record| {
                    self.extract_file(record, content, &index, &skipped, &unreadable)
                })
                .collect()
        };

        let per_file = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
        {
            Ok(pool) => pool.install(extract_all),
            Err(err) => {
                tracing::warn!(target: "builder", "falling back to global thread pool: {err}");
                extract_all()
            }
        };

        let mut relations: Vec<RelationRecord> = per_file.into_iter().flatten().collect();
        relations.sort_by(|a, b| {
            (&a.source, a.line_number, &a.target, a.relation_type)
                .cmp(&(&b.source, b.line_number, &b.target, b.relation_type))
        });

        let files_total = files.iter().filter(|f| !f.is_directory).count();
        let skipped = skipped.into_inner();
        let unreadable = unreadable.into_inner();
        let stats = BuildStats {
            files_parsed: files_total - skipped - unreadable,
            files_skipped: skipped,
            files_unreadable: unreadable,
            relations: relations.len(),
            unbound: relations.iter().filter(|r| !index.contains(&r.target)).count(),
        };

        tracing::info!(
            target: "builder",
            "built {} relations from {} files ({} unbound, {} unreadable)",
            stats.relations,
            stats.files_parsed,
            stats.unbound,
            stats.files_unreadable
        );

        BuildOutput { relations, stats }
    }

    fn extract_file(
        &self,
        record: &FileRecord,
        content: &dyn ContentSource,
        index: &TargetIndex,
        skipped: &AtomicUsize,
        unreadable: &AtomicUsize,
    ) -> Vec<RelationRecord> {
        let source = record.file_path.as_str();
        let Some(extractor) = self.registry.get_extractor(source) else {
            skipped.fetch_add(1, Ordering::Relaxed);
            return Vec::new();
        };

        let text = match content.read(source) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(target: "builder", "no content for {source}: {err}");
                unreadable.fetch_add(1, Ordering::Relaxed);
                return Vec::new();
            }
        };

        let raw = extractor.parse(source, &text);
        let imports = imports_of(&raw);

        raw.iter()
            .filter_map(|relation| {
                let target = index.bind_relation(relation, source, &imports);
                // Self references, e.g. `from . import x` inside `__init__.py`
                (target != source)
                    .then(|| RelationRecord::new(source, target, relation.kind, relation.line))
            })
            .collect()
    }
}
