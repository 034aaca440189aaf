//! Relation extractor trait
//!
//! Every supported language family implements [`RelationExtractor`]. Extraction
//! is lexical and line-oriented: each line is matched against a fixed set of
//! patterns and lines matching nothing contribute nothing. Multi-line
//! declarations are missed, and matches inside string literals or comments are
//! reported like real ones.

use crate::types::RelationKind;

/// How a raw target should be turned into a file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetForm {
    /// Path-like specifier (`./util`, `../img/a.png`, `react`)
    Path,
    /// Dotted module name (`com.acme.Widget`, `pkg.sub`, `java.util.*`)
    Module,
    /// Bare type name from a class header (`Base`, `Outer.Inner`)
    TypeName,
}

/// A relation candidate as it appears in the source, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRelation {
    pub target: String,
    pub kind: RelationKind,
    pub form: TargetForm,
    /// 1-based
    pub line: u32,
}

impl RawRelation {
    pub fn new(target: impl Into<String>, kind: RelationKind, form: TargetForm, line: u32) -> Self {
        Self {
            target: target.into(),
            kind,
            form,
            line,
        }
    }
}

/// Common interface for all relation extractors
pub trait RelationExtractor: Send + Sync {
    /// Short identifier, also the `languages.<name>` settings key
    fn name(&self) -> &'static str;

    /// Whether this extractor handles `path`, decided by extension
    fn can_parse(&self, path: &str) -> bool;

    /// Extract relation candidates from `content`
    fn parse(&self, path: &str, content: &str) -> Vec<RawRelation>;
}

/// Collects relations for one line, dropping repeats of the same
/// `(target, kind)` pair on that line.
pub(crate) struct LineRelations<'a> {
    out: &'a mut Vec<RawRelation>,
    start: usize,
    line: u32,
}

impl<'a> LineRelations<'a> {
    pub(crate) fn new(out: &'a mut Vec<RawRelation>, line: u32) -> Self {
        let start = out.len();
        Self { out, start, line }
    }

    pub(crate) fn push(&mut self, target: &str, kind: RelationKind, form: TargetForm) {
        let target = target.trim();
        if target.is_empty() {
            return;
        }
        let seen = self.out[self.start..]
            .iter()
            .any(|r| r.kind == kind && r.target == target);
        if !seen {
            self.out
                .push(RawRelation::new(target, kind, form, self.line));
        }
    }
}

/// Split a comma separated type list, dropping generic arguments.
///
/// `"Comparable<T>, Map<K, V> "` gives `["Comparable", "Map"]`.
pub(crate) fn split_type_list(list: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in list.chars() {
        match ch {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                names.push(std::mem::take(&mut current));
            }
            _ if depth == 0 => current.push(ch),
            _ => {}
        }
    }
    names.push(current);

    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
