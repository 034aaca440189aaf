//! JVM extractor for Java, Kotlin, Scala and Groovy sources.

use super::extractor::{LineRelations, RawRelation, RelationExtractor, TargetForm, split_type_list};
use crate::types::{RelationKind, extension_of};
use regex::Regex;
use std::sync::LazyLock;

const EXTENSIONS: &[&str] = &["java", "kt", "kts", "scala", "groovy"];

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*import\s+(?:static\s+)?([A-Za-z_]\w*(?:\.\w+)*(?:\.\*|\.\{[^}]*\})?)")
        .expect("valid regex")
});
static MODULE_REQUIRES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*requires\s+(?:(?:transitive|static)\s+)*([A-Za-z_][\w.]*)\s*;")
        .expect("valid regex")
});
static CLASS_EXTENDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:class|object)\s+\w+(?:\s*<[^{]*?>)?(?:\s*\([^)]*\))?\s+extends\s+([A-Za-z_][\w.]*)")
        .expect("valid regex")
});
static CLASS_IMPLEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:class|enum|record)\s+\w+.*?\bimplements\s+([^{]+)").expect("valid regex")
});
static INTERFACE_EXTENDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\binterface\s+\w+(?:\s*<[^{]*?>)?\s+extends\s+([^{]+)").expect("valid regex")
});

#[derive(Debug, Default)]
pub struct JvmExtractor;

impl JvmExtractor {
    pub fn new() -> Self {
        Self
    }

    fn scan_line(line: &str, relations: &mut LineRelations<'_>) {
        let trimmed = line.trim_start();
        if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*') {
            return;
        }

        if let Some(caps) = IMPORT.captures(line) {
            for module in expand_import(&caps[1]) {
                relations.push(&module, RelationKind::Imports, TargetForm::Module);
            }
            return;
        }

        if let Some(caps) = MODULE_REQUIRES.captures(line) {
            relations.push(&caps[1], RelationKind::Requires, TargetForm::Module);
            return;
        }

        if let Some(caps) = INTERFACE_EXTENDS.captures(line) {
            for base in split_type_list(&caps[1]) {
                relations.push(&base, RelationKind::Extends, TargetForm::TypeName);
            }
            return;
        }

        if let Some(caps) = CLASS_EXTENDS.captures(line) {
            relations.push(&caps[1], RelationKind::Extends, TargetForm::TypeName);
        }
        if let Some(caps) = CLASS_IMPLEMENTS.captures(line) {
            for interface in split_type_list(&caps[1]) {
                relations.push(&interface, RelationKind::Implements, TargetForm::TypeName);
            }
        }
    }
}

/// Expand Scala selector imports and normalize wildcards.
///
/// `a.b.{C, D => E}` gives `a.b.C` and `a.b.D`; `a.b._` gives `a.b.*`.
fn expand_import(import: &str) -> Vec<String> {
    if let Some((base, selectors)) = import.split_once(".{") {
        return selectors
            .trim_end_matches('}')
            .split(',')
            .filter_map(|selector| {
                let name = selector.split("=>").next().unwrap_or_default().trim();
                match name {
                    "" => None,
                    "_" => Some(format!("{base}.*")),
                    name => Some(format!("{base}.{name}")),
                }
            })
            .collect();
    }

    match import.strip_suffix("._") {
        Some(base) => vec![format!("{base}.*")],
        None => vec![import.trim_end_matches('.').to_string()],
    }
}

impl RelationExtractor for JvmExtractor {
    fn name(&self) -> &'static str {
        "jvm"
    }

    fn can_parse(&self, path: &str) -> bool {
        EXTENSIONS.contains(&extension_of(path).as_str())
    }

    fn parse(&self, _path: &str, content: &str) -> Vec<RawRelation> {
        let mut out = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let mut relations = LineRelations::new(&mut out, idx as u32 + 1);
            Self::scan_line(line, &mut relations);
        }
        out
    }
}
