//! C-style extractor: JavaScript, TypeScript, component files, HTML, stylesheets
//! and C/C++ headers.
//!
//! Covers ES modules (`import … from`, side-effect imports, re-exports,
//! dynamic `import()`), CommonJS `require()`, class headers, HTML `src`
//! attributes, CSS `url()` and `@import`, TypeScript triple-slash references
//! and quoted C includes.

use super::assets::{classify, is_external};
use super::extractor::{LineRelations, RawRelation, RelationExtractor, TargetForm, split_type_list};
use crate::types::{RelationKind, extension_of};
use regex::Regex;
use std::sync::LazyLock;

const EXTENSIONS: &[&str] = &[
    "js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts", "vue", "svelte", "html", "htm", "css",
    "scss", "sass", "less", "c", "h", "cc", "cpp", "cxx", "hpp", "hh",
];

static IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:import|export)\b[^'"]*?\bfrom\s*['"]([^'"]+)['"]"#).expect("valid regex")
});
static CONTINUATION_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\}[^'"]*?\bfrom\s*['"]([^'"]+)['"]"#).expect("valid regex")
});
static SIDE_EFFECT_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*import\s*['"]([^'"]+)['"]"#).expect("valid regex"));
static DYNAMIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid regex")
});
static REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\brequire\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid regex")
});
static CLASS_EXTENDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+[A-Za-z_$][\w$]*(?:\s*<[^{]*?>)?\s+extends\s+([A-Za-z_$][\w$.]*)")
        .expect("valid regex")
});
static CLASS_IMPLEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+[A-Za-z_$][\w$]*.*?\bimplements\s+([^{]+)").expect("valid regex")
});
static SRC_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bsrc\s*=\s*["']([^"']+)["']"#).expect("valid regex"));
static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\burl\(\s*['"]?([^'")\s]+)['"]?\s*\)"#).expect("valid regex")
});
static CSS_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import\s+(?:url\(\s*)?['"]([^'"]+)['"]"#).expect("valid regex")
});
static REFERENCE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*///\s*<reference\s+path\s*=\s*["']([^"']+)["']"#).expect("valid regex")
});
static QUOTED_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*#\s*include\s*"([^"]+)""#).expect("valid regex"));

#[derive(Debug, Default)]
pub struct JavaScriptExtractor;

impl JavaScriptExtractor {
    pub fn new() -> Self {
        Self
    }

    fn scan_line(line: &str, relations: &mut LineRelations<'_>) {
        let trimmed = line.trim_start();

        if let Some(caps) = REFERENCE_PATH.captures(line) {
            relations.push(&caps[1], RelationKind::References, TargetForm::Path);
            return;
        }
        if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*') {
            return;
        }

        if let Some(caps) = QUOTED_INCLUDE.captures(line) {
            let header = &caps[1];
            let target = if header.starts_with('.') || header.starts_with('/') {
                header.to_string()
            } else {
                format!("./{header}")
            };
            relations.push(&target, RelationKind::Includes, TargetForm::Path);
            return;
        }

        let module_specifiers = IMPORT_FROM
            .captures(line)
            .or_else(|| CONTINUATION_FROM.captures(line))
            .or_else(|| SIDE_EFFECT_IMPORT.captures(line))
            .into_iter()
            .chain(DYNAMIC_IMPORT.captures_iter(line))
            .chain(REQUIRE.captures_iter(line))
            .chain(SRC_ATTRIBUTE.captures_iter(line))
            .chain(CSS_IMPORT.captures_iter(line))
            .chain(CSS_URL.captures_iter(line));

        for caps in module_specifiers {
            let specifier = &caps[1];
            if is_external(specifier) {
                continue;
            }
            relations.push(specifier, classify(specifier), TargetForm::Path);
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

impl RelationExtractor for JavaScriptExtractor {
    fn name(&self) -> &'static str {
        "javascript"
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

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<(String, RelationKind, u32)> {
        JavaScriptExtractor::new()
            .parse("src/file.ts", content)
            .into_iter()
            .map(|r| (r.target, r.kind, r.line))
            .collect()
    }

    fn rel(target: &str, kind: RelationKind, line: u32) -> (String, RelationKind, u32) {
        (target.to_string(), kind, line)
    }

    #[test]
    fn test_can_parse() {
        let extractor = JavaScriptExtractor::new();
        for path in ["a.js", "b/c.TSX", "x.d.ts", "App.vue", "index.html", "s.scss", "m.h"] {
            assert!(extractor.can_parse(path), "{path}");
        }
        for path in ["a.py", "B.java", "Makefile", "notes.md"] {
            assert!(!extractor.can_parse(path), "{path}");
        }
    }

    #[test]
    fn test_es_module_forms() {
        let content = r#"import React from 'react';
import { a, b } from "./util";
import './side-effect';
export * from '../shared/types';
import {
  x,
} from './multi';
const lazy = () => import('./lazy');
const legacy = require('./legacy.js');
"#;
        assert_eq!(
            parse(content),
            vec![
                rel("react", RelationKind::Imports, 1),
                rel("./util", RelationKind::Imports, 2),
                rel("./side-effect", RelationKind::Imports, 3),
                rel("../shared/types", RelationKind::Imports, 4),
                rel("./multi", RelationKind::Imports, 7),
                rel("./lazy", RelationKind::Imports, 8),
                rel("./legacy.js", RelationKind::Imports, 9),
            ]
        );
    }

    #[test]
    fn test_asset_imports_are_classified() {
        let content = r#"import './App.css';
import logo from './logo.svg';
import data from '../data/items.json';
const font = require('./Inter.woff2');
"#;
        assert_eq!(
            parse(content),
            vec![
                rel("./App.css", RelationKind::ImportsCss, 1),
                rel("./logo.svg", RelationKind::ImportsImage, 2),
                rel("../data/items.json", RelationKind::ImportsData, 3),
                rel("./Inter.woff2", RelationKind::ImportsFont, 4),
            ]
        );
    }

    #[test]
    fn test_class_header_on_one_line() {
        let relations = parse("export class Foo extends Bar implements A, B {\n}\n");
        assert_eq!(
            relations,
            vec![
                rel("Bar", RelationKind::Extends, 1),
                rel("A", RelationKind::Implements, 1),
                rel("B", RelationKind::Implements, 1),
            ]
        );
    }

    #[test]
    fn test_generic_class_header() {
        let relations =
            parse("class Repo<T extends Entity> extends Base<T> implements Store<T>, Iterable<T> {");
        assert_eq!(
            relations,
            vec![
                rel("Base", RelationKind::Extends, 1),
                rel("Store", RelationKind::Implements, 1),
                rel("Iterable", RelationKind::Implements, 1),
            ]
        );
    }

    #[test]
    fn test_html_and_css_references() {
        let content = r#"<link rel="stylesheet" href="style.css">
<script src="./js/app.js"></script>
<img src="https://cdn.example.com/x.png"><img src="img/hero.webp">
.hero { background-image: url("../img/bg.jpg"); }
@import url('theme.css');
@font-face { src: url(fonts/a.woff2?v=2) format("woff2"); }
"#;
        assert_eq!(
            parse(content),
            vec![
                rel("./js/app.js", RelationKind::Imports, 2),
                rel("img/hero.webp", RelationKind::ImportsImage, 3),
                rel("../img/bg.jpg", RelationKind::ImportsImage, 4),
                rel("theme.css", RelationKind::ImportsCss, 5),
                rel("fonts/a.woff2?v=2", RelationKind::ImportsFont, 6),
            ]
        );
    }

    #[test]
    fn test_triple_slash_reference_and_includes() {
        let content = r#"/// <reference path="./globals.d.ts" />
#include <stdio.h>
#include "config.h"
#include "../common/log.h"
"#;
        assert_eq!(
            parse(content),
            vec![
                rel("./globals.d.ts", RelationKind::References, 1),
                rel("./config.h", RelationKind::Includes, 3),
                rel("../common/log.h", RelationKind::Includes, 4),
            ]
        );
    }

    #[test]
    fn test_comments_and_plain_lines_yield_nothing() {
        let content = "// import x from './commented';\nconst a = 1;\n\n * require('./doc')\n";
        assert!(parse(content).is_empty());
    }

    #[test]
    fn test_same_line_duplicates_reported_once() {
        let relations = parse("const a = require('./x'), b = require('./x');");
        assert_eq!(relations, vec![rel("./x", RelationKind::Imports, 1)]);
    }
}
