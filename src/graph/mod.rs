//! File graph assembly for visualization.
//!
//! ```text
//! FileRecord[] ─┐
//!               ├─> GraphAssembler ─> GraphDataset { nodes, links }
//! Relation[]  ──┘     ├─ drop links with unknown endpoints
//!                     └─ dedupe by (source, target, relation_type)
//! ```

mod assembler;
mod dataset;

pub use assembler::{AssemblyStats, GraphAssembler};
pub use dataset::{GraphDataset, GraphLink, GraphNode, LinkStyle};
