use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an indexed project.
///
/// Restricted to ASCII alphanumerics, `-` and `_` so it can be used as a
/// storage key and file name without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let valid = !value.is_empty()
            && value.len() <= 128
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProjectId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value.clone()).ok_or_else(|| format!("invalid project id '{value}'"))
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

/// One discovered file or directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub project_id: ProjectId,
    /// Project-relative, `/`-separated path. Unique per project.
    pub file_path: String,
    pub file_name: String,
    pub is_directory: bool,
    /// `file_path` of the parent directory, empty for root-level entries.
    pub parent_path: String,
    /// Lowercased extension, or `"directory"`.
    pub file_type: String,
    pub file_size: u64,
    pub content_fingerprint: Option<String>,
}

impl FileRecord {
    pub const DIRECTORY_TYPE: &'static str = "directory";

    pub fn directory(project_id: ProjectId, file_path: impl Into<String>) -> Self {
        let file_path = file_path.into();
        Self {
            project_id,
            file_name: file_name_of(&file_path).to_string(),
            parent_path: parent_of(&file_path).to_string(),
            file_path,
            is_directory: true,
            file_type: Self::DIRECTORY_TYPE.to_string(),
            file_size: 0,
            content_fingerprint: None,
        }
    }

    pub fn file(
        project_id: ProjectId,
        file_path: impl Into<String>,
        file_size: u64,
        content_fingerprint: Option<String>,
    ) -> Self {
        let file_path = file_path.into();
        Self {
            project_id,
            file_name: file_name_of(&file_path).to_string(),
            parent_path: parent_of(&file_path).to_string(),
            file_type: extension_of(&file_path),
            file_path,
            is_directory: false,
            file_size,
            content_fingerprint,
        }
    }
}

fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn parent_of(path: &str) -> &str {
    path.rfind('/').map(|idx| &path[..idx]).unwrap_or("")
}

/// Lowercased extension of the last path segment, empty when there is none.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn extension_of(path: &str) -> String {
    let name = file_name_of(path);
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => name[idx + 1..].to_ascii_lowercase(),
    }
}

/// Kind of a file-to-file relation.
///
/// Consumers must treat this as a closed set that may grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    Imports,
    Extends,
    Implements,
    Requires,
    Includes,
    References,
    ImportsCss,
    ImportsImage,
    ImportsFont,
    ImportsData,
    ImportsAsset,
}

impl RelationKind {
    pub const ALL: [RelationKind; 11] = [
        RelationKind::Imports,
        RelationKind::Extends,
        RelationKind::Implements,
        RelationKind::Requires,
        RelationKind::Includes,
        RelationKind::References,
        RelationKind::ImportsCss,
        RelationKind::ImportsImage,
        RelationKind::ImportsFont,
        RelationKind::ImportsData,
        RelationKind::ImportsAsset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Imports => "IMPORTS",
            RelationKind::Extends => "EXTENDS",
            RelationKind::Implements => "IMPLEMENTS",
            RelationKind::Requires => "REQUIRES",
            RelationKind::Includes => "INCLUDES",
            RelationKind::References => "REFERENCES",
            RelationKind::ImportsCss => "IMPORTS_CSS",
            RelationKind::ImportsImage => "IMPORTS_IMAGE",
            RelationKind::ImportsFont => "IMPORTS_FONT",
            RelationKind::ImportsData => "IMPORTS_DATA",
            RelationKind::ImportsAsset => "IMPORTS_ASSET",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        RelationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown relation type '{s}'"))
    }
}

/// A resolved relation between two files of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub source: String,
    pub target: String,
    pub relation_type: RelationKind,
    pub line_number: u32,
}

impl RelationRecord {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relation_type: RelationKind,
        line_number: u32,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation_type,
            line_number,
        }
    }

    /// Composite identity used for deduplication and link ids.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.source, self.target, self.relation_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectId {
        ProjectId::new("demo").unwrap()
    }

    #[test]
    fn test_project_id_validation() {
        assert!(ProjectId::new("my-project_2").is_some());
        assert!(ProjectId::new("").is_none());
        assert!(ProjectId::new("../escape").is_none());
        assert!(ProjectId::new("with space").is_none());
    }

    #[test]
    fn test_file_record_derived_fields() {
        let record = FileRecord::file(project(), "src/components/App.TSX", 42, None);
        assert_eq!(record.file_name, "App.TSX");
        assert_eq!(record.parent_path, "src/components");
        assert_eq!(record.file_type, "tsx");
        assert!(!record.is_directory);

        let root_level = FileRecord::directory(project(), "src");
        assert_eq!(root_level.parent_path, "");
        assert_eq!(root_level.file_type, "directory");
    }

    #[test]
    fn test_extension_of_edge_cases() {
        assert_eq!(extension_of(".gitignore"), "");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of("a/b.tar.gz"), "gz");
        assert_eq!(extension_of("dir.d/file"), "");
    }

    #[test]
    fn test_relation_kind_serde_names() {
        let json = serde_json::to_string(&RelationKind::ImportsCss).unwrap();
        assert_eq!(json, "\"IMPORTS_CSS\"");
        let kind: RelationKind = serde_json::from_str("\"IMPLEMENTS\"").unwrap();
        assert_eq!(kind, RelationKind::Implements);
    }

    #[test]
    fn test_relation_kind_from_str() {
        assert_eq!("imports".parse::<RelationKind>(), Ok(RelationKind::Imports));
        assert_eq!(
            "imports-image".parse::<RelationKind>(),
            Ok(RelationKind::ImportsImage)
        );
        assert!("CALLS".parse::<RelationKind>().is_err());
        for kind in RelationKind::ALL {
            assert_eq!(kind.as_str().parse::<RelationKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_project_id_deserialize_rejects_invalid() {
        let ok: Result<ProjectId, _> = serde_json::from_str("\"web-app\"");
        assert!(ok.is_ok());
        let bad: Result<ProjectId, _> = serde_json::from_str("\"a/b\"");
        assert!(bad.is_err());
    }
}
