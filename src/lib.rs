//! Project file-tree indexer.
//!
//! Scans a directory tree into file records, extracts structural relations
//! between files (imports, inheritance, asset references) with lexical
//! per-language extractors, and assembles a `{nodes, links}` graph for
//! visualization.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod logging;
pub mod parsing;
pub mod storage;
pub mod types;

pub use config::Settings;
pub use error::{IndexError, IndexResult};
pub use graph::{AssemblyStats, GraphAssembler, GraphDataset, GraphLink, GraphNode};
pub use indexing::{
    ContentSource, DirectoryScanner, ExclusionMatcher, FsContentSource, GraphBuilder,
    IndexFacade, TargetIndex,
};
pub use parsing::{ExtractorRegistry, ImportPathResolver, RawRelation, RelationExtractor};
pub use storage::{FileGraph, IndexMetadata, IndexStore, JsonIndexStore, MemoryIndexStore};
pub use types::{FileRecord, ProjectId, RelationKind, RelationRecord};
