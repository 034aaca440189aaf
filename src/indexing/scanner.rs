//! Directory scanner producing [`FileRecord`]s.
//!
//! Uses the `ignore` crate's parallel walker with all of its standard filters
//! disabled: exclusion is decided solely by the supplied predicate, applied to
//! both the relative path and the bare entry name. Excluded directories are
//! pruned before they are read, as are entries whose path is not valid UTF-8.
//! Only regular files are fingerprinted.

use super::ExclusionMatcher;
use super::fingerprint::fingerprint_file;
use crate::Settings;
use crate::error::{IndexError, IndexResult};
use crate::types::{FileRecord, ProjectId};
use ignore::{DirEntry, WalkBuilder, WalkState};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for a finished scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files: usize,
    pub directories: usize,
    /// Entries recorded without size or fingerprint after a stat/read failure.
    pub degraded: usize,
    /// Entries the walker could not produce, or with a non UTF-8 path.
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct ScanOutput {
    /// Unordered; sort by `file_path` for presentation.
    pub records: Vec<FileRecord>,
    pub stats: ScanStats,
}

pub struct DirectoryScanner {
    matcher: Arc<ExclusionMatcher>,
    threads: usize,
    fingerprint_max_bytes: u64,
}

impl DirectoryScanner {
    pub const DEFAULT_FINGERPRINT_MAX_BYTES: u64 = 100 * 1024 * 1024;

    pub fn new(matcher: ExclusionMatcher) -> Self {
        Self {
            matcher: Arc::new(matcher),
            threads: num_cpus::get(),
            fingerprint_max_bytes: Self::DEFAULT_FINGERPRINT_MAX_BYTES,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(ExclusionMatcher::from_config(&settings.indexing))
            .with_threads(settings.indexing.parallel_threads)
            .with_fingerprint_limit(settings.indexing.fingerprint_max_bytes)
    }

    /// Upper bound on walker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Files of at least `bytes` are recorded without a fingerprint.
    pub fn with_fingerprint_limit(mut self, bytes: u64) -> Self {
        self.fingerprint_max_bytes = bytes;
        self
    }

    /// Scan `root` using the configured exclusion matcher.
    pub fn scan(&self, root: &Path, project: &ProjectId) -> IndexResult<ScanOutput> {
        let matcher = Arc::clone(&self.matcher);
        self.scan_with(root, project, move |path| matcher.is_excluded(path))
    }

    /// Scan `root`, skipping every entry for which `exclude` returns true on
    /// either its relative path or its name.
    pub fn scan_with<F>(&self, root: &Path, project: &ProjectId, exclude: F) -> IndexResult<ScanOutput>
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        check_root(root)?;

        let filter_root = root.to_path_buf();
        let skipped = Arc::new(AtomicUsize::new(0));
        let filter_skipped = Arc::clone(&skipped);

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .threads(self.threads)
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let Some(relative) = relative_path(&filter_root, entry.path()) else {
                    tracing::warn!(
                        target: "scanner",
                        "skipping {}: path is not valid UTF-8",
                        entry.path().display()
                    );
                    filter_skipped.fetch_add(1, Ordering::Relaxed);
                    return false;
                };
                let name = entry.file_name().to_string_lossy();
                !(exclude(&relative) || exclude(&name))
            })
            .build_parallel();

        let (sender, receiver) = crossbeam_channel::unbounded();
        let degraded = AtomicUsize::new(0);

        walker.run(|| {
            let sender = sender.clone();
            let degraded = &degraded;
            let skipped = Arc::clone(&skipped);

            Box::new(move |result| {
                let entry = match result {
                    Ok(entry) => entry,
                    Err(err) => {
                        tracing::warn!(target: "scanner", "skipping unreadable entry: {err}");
                        skipped.fetch_add(1, Ordering::Relaxed);
                        return WalkState::Continue;
                    }
                };
                if entry.depth() == 0 {
                    return WalkState::Continue;
                }

                match self.record_for(root, project, &entry) {
                    Some((record, ok)) => {
                        if !ok {
                            degraded.fetch_add(1, Ordering::Relaxed);
                        }
                        if sender.send(record).is_err() {
                            return WalkState::Quit;
                        }
                    }
                    None => {
                        skipped.fetch_add(1, Ordering::Relaxed);
                    }
                }
                WalkState::Continue
            })
        });
        drop(sender);

        let records: Vec<FileRecord> = receiver.iter().collect();
        let directories = records.iter().filter(|r| r.is_directory).count();
        let stats = ScanStats {
            files: records.len() - directories,
            directories,
            degraded: degraded.into_inner(),
            skipped: skipped.load(Ordering::Relaxed),
        };

        tracing::info!(
            target: "scanner",
            "scanned {}: {} files, {} directories ({} degraded, {} skipped)",
            root.display(),
            stats.files,
            stats.directories,
            stats.degraded,
            stats.skipped
        );

        Ok(ScanOutput { records, stats })
    }

    /// Build the record for one entry. The flag is false when the record is degraded.
    fn record_for(
        &self,
        root: &Path,
        project: &ProjectId,
        entry: &DirEntry,
    ) -> Option<(FileRecord, bool)> {
        let relative = relative_path(root, entry.path())?;

        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            return Some((FileRecord::directory(project.clone(), relative), true));
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(err) => {
                tracing::warn!(target: "scanner", "cannot stat {relative}: {err}");
                return Some((FileRecord::file(project.clone(), relative, 0, None), false));
            }
        };

        // Pipes, sockets and devices would block or never end on read
        let regular = entry.file_type().is_some_and(|ft| ft.is_file());
        if !regular || entry.path_is_symlink() || size >= self.fingerprint_max_bytes {
            tracing::debug!(target: "scanner", "not fingerprinting {relative} ({size} bytes)");
            return Some((FileRecord::file(project.clone(), relative, size, None), true));
        }

        match fingerprint_file(entry.path()) {
            Ok(hash) => Some((FileRecord::file(project.clone(), relative, size, Some(hash)), true)),
            Err(err) => {
                tracing::warn!(target: "scanner", "cannot read {relative}: {err}");
                Some((FileRecord::file(project.clone(), relative, size, None), false))
            }
        }
    }
}

/// Fail fast when the root itself cannot be listed.
fn check_root(root: &Path) -> IndexResult<()> {
    let meta = fs::metadata(root).map_err(|source| IndexError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(IndexError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }
    fs::read_dir(root).map_err(|source| IndexError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// `/`-joined path of `path` relative to `root`.
///
/// `None` outside `root` or when a component is not valid UTF-8.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?
        .join("/");
    (!joined.is_empty()).then_some(joined)
}
