//! Python extractor.

use super::extractor::{LineRelations, RawRelation, RelationExtractor, TargetForm, split_type_list};
use crate::types::{RelationKind, extension_of};
use regex::Regex;
use std::sync::LazyLock;

const EXTENSIONS: &[&str] = &["py", "pyi"];

static IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+([^#;]+)").expect("valid regex"));
static FROM_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*from\s+(\.*)([A-Za-z_][\w.]*)?\s+import\b").expect("valid regex")
});
static CLASS_BASES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*class\s+\w+\s*(?:\[[^\]]*\])?\s*\((.*)\)\s*:").expect("valid regex")
});

#[derive(Debug, Default)]
pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> Self {
        Self
    }

    fn scan_line(line: &str, relations: &mut LineRelations<'_>) {
        if line.trim_start().starts_with('#') {
            return;
        }

        if let Some(caps) = IMPORT.captures(line) {
            for module in caps[1].split(',') {
                // `import a.b as c` binds `c` but depends on `a.b`
                let module = module.split_whitespace().next().unwrap_or_default();
                relations.push(module, RelationKind::Imports, TargetForm::Module);
            }
            return;
        }

        if let Some(caps) = FROM_IMPORT.captures(line) {
            let dots = caps[1].len();
            let module = caps.get(2).map_or("", |m| m.as_str());
            if dots == 0 {
                relations.push(module, RelationKind::Imports, TargetForm::Module);
            } else {
                relations.push(&relative_module(dots, module), RelationKind::Imports, TargetForm::Path);
            }
            return;
        }

        if let Some(caps) = CLASS_BASES.captures(line) {
            for base in split_type_list(&caps[1]) {
                if base.contains('=') || base == "object" || base.starts_with('*') {
                    continue;
                }
                relations.push(&base, RelationKind::Extends, TargetForm::TypeName);
            }
        }
    }
}

/// Path form of a relative import: `.a.b` is `./a/b`, `..a` is `../a`.
fn relative_module(dots: usize, module: &str) -> String {
    let mut path = if dots == 1 {
        ".".to_string()
    } else {
        vec![".."; dots - 1].join("/")
    };
    if !module.is_empty() {
        path.push('/');
        path.push_str(&module.replace('.', "/"));
    }
    path
}

impl RelationExtractor for PythonExtractor {
    fn name(&self) -> &'static str {
        "python"
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
