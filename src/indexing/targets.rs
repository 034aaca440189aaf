//! Binding of resolved targets to scanned files.
//!
//! The resolver produces canonical ids that rarely name a file exactly:
//! `src/util` for `src/util.ts`, `com.acme.Widget` for
//! `src/main/java/com/acme/Widget.java`, or just `Base` for a superclass. The
//! index built here maps those ids onto the paths the scanner recorded. Targets
//! that cannot be bound are left as they are and fall out at assembly.

use crate::parsing::assets::BINDING_EXTENSIONS;
use crate::parsing::paths::{parent_dir, strip_extension};
use crate::parsing::{ImportPathResolver, RawRelation, TargetForm};
use crate::types::{FileRecord, RelationKind};
use std::collections::{HashMap, HashSet};

/// Roots that JVM and Python module names are commonly relative to.
const SOURCE_ROOTS: &[&str] = &[
    "src/main/java",
    "src/main/kotlin",
    "src/main/scala",
    "src/test/java",
    "src",
    "lib",
    "app",
];

const PYTHON_PACKAGE_INIT: &str = "__init__.py";

#[derive(Debug, Default)]
pub struct TargetIndex {
    files: HashSet<String>,
    directories: HashSet<String>,
    /// `dir/lowercased-stem` to the highest priority code file with that stem
    stems: HashMap<String, String>,
    resolver: ImportPathResolver,
}

impl TargetIndex {
    pub fn new(records: &[FileRecord]) -> Self {
        let mut index = Self::default();
        let mut stem_priority: HashMap<String, usize> = HashMap::new();

        for record in records {
            if record.is_directory {
                index.directories.insert(record.file_path.clone());
                continue;
            }
            index.files.insert(record.file_path.clone());

            let Some(priority) = BINDING_EXTENSIONS
                .iter()
                .position(|ext| record.file_path.ends_with(&format!(".{ext}")))
            else {
                continue;
            };
            let stem = strip_extension(&record.file_path, BINDING_EXTENSIONS).to_lowercase();
            let better = stem_priority.get(&stem).is_none_or(|&p| priority < p);
            if better {
                stem_priority.insert(stem.clone(), priority);
                index.stems.insert(stem, record.file_path.clone());
            }
        }

        index
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path) || self.directories.contains(path)
    }

    /// Bind a canonical path-like id.
    ///
    /// Tried in order: the exact file, the id plus a code extension, the
    /// directory's index file, the directory itself.
    pub fn bind(&self, canonical: &str) -> Option<String> {
        let target = canonical.trim_start_matches('/');
        if target.is_empty() {
            return None;
        }
        if let Some(file) = self.bind_file(target) {
            return Some(file);
        }
        if !self.directories.contains(target) {
            return None;
        }

        BINDING_EXTENSIONS
            .iter()
            .map(|ext| format!("{target}/index.{ext}"))
            .chain(std::iter::once(format!("{target}/{PYTHON_PACKAGE_INIT}")))
            .find(|candidate| self.files.contains(candidate))
            .or_else(|| Some(target.to_string()))
    }

    /// Exact file or file plus a code extension, never a directory.
    fn bind_file(&self, target: &str) -> Option<String> {
        if self.files.contains(target) {
            return Some(target.to_string());
        }
        BINDING_EXTENSIONS
            .iter()
            .map(|ext| format!("{target}.{ext}"))
            .find(|candidate| self.files.contains(candidate))
    }

    /// Bind a dotted module name (`com.acme.Widget`, `pkg.sub`, `a.b.*`).
    ///
    /// Looked up at the project root, under source roots found in `source`'s
    /// own path and under the common source roots. Member imports such as
    /// `org.junit.Assert.assertEquals` fall back to their enclosing module.
    pub fn bind_module(&self, dotted: &str, source: &str) -> Option<String> {
        let roots = source_roots_for(source);

        if let Some(package) = dotted.strip_suffix(".*") {
            let package = package.replace('.', "/");
            return roots
                .iter()
                .map(|root| join(root, &package))
                .find(|candidate| self.directories.contains(candidate));
        }

        let path = dotted.replace('.', "/");
        if let Some(bound) = roots.iter().find_map(|root| self.bind(&join(root, &path))) {
            return Some(bound);
        }

        let (enclosing, _) = path.rsplit_once('/')?;
        roots
            .iter()
            .find_map(|root| self.bind_file(&join(root, enclosing)))
    }

    /// Bind a type name from a class header using the imports of the same file.
    ///
    /// Tried in order: an import whose last segment names the type, members
    /// of wildcard imports, a fully qualified name, a sibling file in the
    /// same directory.
    pub fn bind_type(&self, name: &str, source: &str, imports: &[&RawRelation]) -> Option<String> {
        let head = name.split('.').next().unwrap_or(name);

        for import in imports {
            let target = import.target.as_str();
            let last = target
                .rsplit(['/', '.'])
                .find(|segment| !segment.is_empty())
                .unwrap_or(target);
            if last.eq_ignore_ascii_case(head)
                && let Some(bound) = self.bind_import(import, source)
            {
                return Some(bound);
            }
        }

        for import in imports.iter().filter(|i| i.form == TargetForm::Module) {
            if let Some(package) = import.target.strip_suffix(".*")
                && let Some(bound) = self.bind_module(&format!("{package}.{head}"), source)
            {
                return Some(bound);
            }
        }

        if name.contains('.')
            && let Some(bound) = self.bind_module(name, source)
        {
            return Some(bound);
        }

        let dir = parent_dir(source);
        let key = join(dir, &head.to_lowercase());
        self.stems.get(&key).filter(|path| *path != source).cloned()
    }

    fn bind_import(&self, import: &RawRelation, source: &str) -> Option<String> {
        match import.form {
            TargetForm::Path => self.bind(&self.resolver.resolve(&import.target, source)),
            TargetForm::Module => self.bind_module(&import.target, source),
            TargetForm::TypeName => None,
        }
    }

    /// Final target for `raw` found in `source`: the bound path, or the
    /// canonical id when nothing matches.
    pub fn bind_relation(&self, raw: &RawRelation, source: &str, imports: &[&RawRelation]) -> String {
        match raw.form {
            TargetForm::Path => {
                let canonical = self.resolver.resolve(&raw.target, source);
                self.bind(&canonical).unwrap_or(canonical)
            }
            TargetForm::Module => self
                .bind_module(&raw.target, source)
                .unwrap_or_else(|| raw.target.clone()),
            TargetForm::TypeName => self
                .bind_type(&raw.target, source, imports)
                .unwrap_or_else(|| raw.target.clone()),
        }
    }
}

/// Imports of one file, the context for [`TargetIndex::bind_type`].
pub fn imports_of(relations: &[RawRelation]) -> Vec<&RawRelation> {
    relations
        .iter()
        .filter(|r| r.kind == RelationKind::Imports && r.form != TargetForm::TypeName)
        .collect()
}

/// Source roots to try for module names used in `source`, most specific first.
fn source_roots_for(source: &str) -> Vec<String> {
    let mut roots = Vec::new();

    // A module inside `backend/src/main/java/...` is relative to that root
    for root in SOURCE_ROOTS {
        let marker = format!("{root}/");
        let found = if source.starts_with(&marker) {
            Some(0)
        } else {
            source.find(&format!("/{marker}")).map(|idx| idx + 1)
        };
        if let Some(start) = found {
            let prefix = &source[..start + root.len()];
            if !roots.iter().any(|r| r == prefix) {
                roots.push(prefix.to_string());
            }
        }
    }

    roots.push(String::new());
    for root in SOURCE_ROOTS {
        if !roots.iter().any(|r| r == root) {
            roots.push(root.to_string());
        }
    }
    roots
}

fn join(dir: &str, path: &str) -> String {
    if dir.is_empty() {
        path.to_string()
    } else {
        format!("{dir}/{path}")
    }
}
