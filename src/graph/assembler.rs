//! Graph assembly: endpoint validation and deduplication.
//!
//! Extraction runs optimistically and may emit targets that match no file
//! (external packages, unbound type names). Those are dropped here instead of
//! being checked during extraction.

use super::{GraphDataset, GraphLink, GraphNode};
use crate::types::{FileRecord, RelationKind, RelationRecord};
use std::collections::HashSet;

/// Counters describing what assembly discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub nodes: usize,
    pub links: usize,
    /// Relations with an unknown source or target.
    pub dangling: usize,
    /// Relations collapsed into an earlier `(source, target, type)` link.
    pub duplicates: usize,
}

#[derive(Debug, Default)]
pub struct GraphAssembler;

impl GraphAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(
        &self,
        files: &[FileRecord],
        relations: &[RelationRecord],
    ) -> (GraphDataset, AssemblyStats) {
        // Directories are valid endpoints: a bare import can resolve to a package dir.
        let known: HashSet<&str> = files.iter().map(|f| f.file_path.as_str()).collect();
        let mut seen: HashSet<(&str, &str, RelationKind)> = HashSet::new();
        let mut stats = AssemblyStats::default();
        let mut links = Vec::new();

        for relation in relations {
            if !known.contains(relation.source.as_str()) || !known.contains(relation.target.as_str())
            {
                tracing::debug!(
                    target: "assembler",
                    "dropping {} -> {} ({}): endpoint not indexed",
                    relation.source,
                    relation.target,
                    relation.relation_type
                );
                stats.dangling += 1;
                continue;
            }

            let key = (
                relation.source.as_str(),
                relation.target.as_str(),
                relation.relation_type,
            );
            if !seen.insert(key) {
                stats.duplicates += 1;
                continue;
            }
            links.push(GraphLink::from(relation));
        }

        let nodes: Vec<GraphNode> = files.iter().map(GraphNode::from).collect();
        stats.nodes = nodes.len();
        stats.links = links.len();

        tracing::debug!(
            target: "assembler",
            "assembled {} nodes, {} links ({} dangling, {} duplicates)",
            stats.nodes,
            stats.links,
            stats.dangling,
            stats.duplicates
        );

        (GraphDataset { nodes, links }, stats)
    }
}
