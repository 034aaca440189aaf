use crate::graph::GraphDataset;
use crate::types::RelationKind;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// Query view over an assembled dataset.
///
/// Node weights are file paths, edge weights relation kinds.
pub struct FileGraph {
    graph: DiGraph<String, RelationKind>,
    node_map: HashMap<String, NodeIndex>,
}

impl FileGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    pub fn from_dataset(dataset: &GraphDataset) -> Self {
        let mut graph = Self::new();
        for node in &dataset.nodes {
            graph.add_file(&node.id);
        }
        for link in &dataset.links {
            graph.add_relation(&link.from, &link.to, link.relation_type);
        }
        graph
    }

    pub fn add_file(&mut self, path: &str) -> NodeIndex {
        if let Some(&node_idx) = self.node_map.get(path) {
            node_idx
        } else {
            let node_idx = self.graph.add_node(path.to_string());
            self.node_map.insert(path.to_string(), node_idx);
            node_idx
        }
    }

    pub fn add_relation(&mut self, from: &str, to: &str, kind: RelationKind) {
        let from_idx = self.add_file(from);
        let to_idx = self.add_file(to);
        self.graph.add_edge(from_idx, to_idx, kind);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.node_map.contains_key(path)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Files that `path` points at, optionally restricted to one relation kind.
    pub fn dependencies(
        &self,
        path: &str,
        kind: Option<RelationKind>,
    ) -> Vec<(String, RelationKind)> {
        self.neighbors(path, kind, Direction::Outgoing)
    }

    /// Files that point at `path`.
    pub fn dependents(&self, path: &str, kind: Option<RelationKind>) -> Vec<(String, RelationKind)> {
        self.neighbors(path, kind, Direction::Incoming)
    }

    fn neighbors(
        &self,
        path: &str,
        kind: Option<RelationKind>,
        direction: Direction,
    ) -> Vec<(String, RelationKind)> {
        let Some(&node_idx) = self.node_map.get(path) else {
            return Vec::new();
        };

        let mut result: Vec<(String, RelationKind)> = self
            .graph
            .edges_directed(node_idx, direction)
            .filter(|edge| kind.is_none_or(|k| *edge.weight() == k))
            .filter_map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                self.graph
                    .node_weight(other)
                    .map(|p| (p.clone(), *edge.weight()))
            })
            .collect();
        result.sort();
        result
    }

    /// Files affected by a change to `start`, grouped by distance.
    ///
    /// Walks incoming edges breadth-first; level 0 is `start` itself.
    pub fn impact(&self, start: &str, max_depth: Option<usize>) -> Vec<Vec<String>> {
        let mut levels = Vec::new();

        let Some(&start_idx) = self.node_map.get(start) else {
            return levels;
        };

        let mut current_level = vec![start_idx];
        let mut visited = HashSet::new();
        visited.insert(start_idx);

        while !current_level.is_empty() {
            if let Some(max_d) = max_depth
                && levels.len() > max_d
            {
                break;
            }

            let mut level_paths = Vec::new();
            let mut next_level = Vec::new();

            for node_idx in current_level {
                if let Some(path) = self.graph.node_weight(node_idx) {
                    level_paths.push(path.clone());

                    for edge in self.graph.edges_directed(node_idx, Direction::Incoming) {
                        let source = edge.source();
                        if visited.insert(source) {
                            next_level.push(source);
                        }
                    }
                }
            }

            if !level_paths.is_empty() {
                level_paths.sort();
                levels.push(level_paths);
            }

            current_level = next_level;
        }

        levels
    }
}

impl Default for FileGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_is_idempotent() {
        let mut graph = FileGraph::new();
        let a = graph.add_file("a.ts");
        let b = graph.add_file("a.ts");
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_dependencies_and_dependents() {
        let mut graph = FileGraph::new();
        graph.add_relation("app.ts", "util.ts", RelationKind::Imports);
        graph.add_relation("app.ts", "base.ts", RelationKind::Extends);
        graph.add_relation("page.ts", "util.ts", RelationKind::Imports);

        let deps = graph.dependencies("app.ts", None);
        assert_eq!(deps.len(), 2);

        let imports = graph.dependencies("app.ts", Some(RelationKind::Imports));
        assert_eq!(imports, vec![("util.ts".to_string(), RelationKind::Imports)]);

        let users = graph.dependents("util.ts", None);
        let names: Vec<&str> = users.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(names, vec!["app.ts", "page.ts"]);

        assert!(graph.dependents("missing.ts", None).is_empty());
    }

    #[test]
    fn test_impact_levels() {
        // base <- mid <- top, base <- other
        let mut graph = FileGraph::new();
        graph.add_relation("mid.ts", "base.ts", RelationKind::Imports);
        graph.add_relation("other.ts", "base.ts", RelationKind::Imports);
        graph.add_relation("top.ts", "mid.ts", RelationKind::Imports);

        let levels = graph.impact("base.ts", None);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0], vec!["base.ts"]);
        assert_eq!(levels[1], vec!["mid.ts", "other.ts"]);
        assert_eq!(levels[2], vec!["top.ts"]);

        let shallow = graph.impact("base.ts", Some(1));
        assert_eq!(shallow.len(), 2);
    }

    #[test]
    fn test_impact_handles_cycles() {
        let mut graph = FileGraph::new();
        graph.add_relation("a.ts", "b.ts", RelationKind::Imports);
        graph.add_relation("b.ts", "a.ts", RelationKind::Imports);

        let levels = graph.impact("a.ts", None);
        assert_eq!(levels, vec![vec!["a.ts".to_string()], vec!["b.ts".to_string()]]);
    }
}
