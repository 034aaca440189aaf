//! Visualization dataset: the `{nodes, links}` shape handed to renderers.

use crate::types::{FileRecord, RelationKind, RelationRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub file_path: String,
    pub is_directory: bool,
    pub file_type: String,
}

impl From<&FileRecord> for GraphNode {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.file_path.clone(),
            label: record.file_name.clone(),
            file_path: record.file_path.clone(),
            is_directory: record.is_directory,
            file_type: record.file_type.clone(),
        }
    }
}

/// Rendering hints derived from the relation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStyle {
    pub color: String,
    pub dashes: bool,
}

impl LinkStyle {
    pub fn for_kind(kind: RelationKind) -> Self {
        let (color, dashes) = match kind {
            RelationKind::Imports => ("#4f83cc", false),
            RelationKind::Requires => ("#4f83cc", true),
            RelationKind::Includes => ("#6d6875", false),
            RelationKind::References => ("#6d6875", true),
            RelationKind::Extends => ("#d1495b", false),
            RelationKind::Implements => ("#d1495b", true),
            RelationKind::ImportsCss => ("#2a9d8f", false),
            RelationKind::ImportsImage => ("#e9c46a", true),
            RelationKind::ImportsFont => ("#8d99ae", true),
            RelationKind::ImportsData => ("#f4a261", true),
            RelationKind::ImportsAsset => ("#adb5bd", true),
        };
        Self {
            color: color.to_string(),
            dashes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    /// `source|target|TYPE`, stable across builds.
    pub id: String,
    pub from: String,
    pub to: String,
    pub relation_type: RelationKind,
    pub line_number: u32,
    pub label: String,
    pub style: LinkStyle,
}

impl From<&RelationRecord> for GraphLink {
    fn from(relation: &RelationRecord) -> Self {
        Self {
            id: relation.key(),
            from: relation.source.clone(),
            to: relation.target.clone(),
            relation_type: relation.relation_type,
            line_number: relation.line_number,
            label: relation.relation_type.as_str().to_ascii_lowercase(),
            style: LinkStyle::for_kind(relation.relation_type),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDataset {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphDataset {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn links_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphLink> + 'a {
        self.links.iter().filter(move |link| link.from == id)
    }
}
