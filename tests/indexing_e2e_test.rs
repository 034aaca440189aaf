//! End-to-end scan, build and assembly against real directory trees.

use filegraph::indexing::DirectoryScanner;
use filegraph::parsing::{JvmExtractor, RelationExtractor};
use filegraph::{
    ExclusionMatcher, GraphAssembler, IndexFacade, JsonIndexStore, ProjectId, RelationKind,
    RelationRecord, Settings,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn project() -> ProjectId {
    ProjectId::new("e2e").unwrap()
}

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

fn facade(index_dir: &Path) -> IndexFacade {
    let mut settings = Settings::default();
    settings.indexing.parallel_threads = 2;
    IndexFacade::with_store(
        Arc::new(settings),
        Arc::new(JsonIndexStore::new(index_dir)),
    )
}

#[test]
fn test_typescript_import_yields_single_link() {
    let workspace = TempDir::new().unwrap();
    let index_dir = TempDir::new().unwrap();
    let root = workspace.path();
    write(root, "src/index.ts", "import { util } from './util';\n\nutil();\n");
    write(root, "src/util.ts", "export function util() {}\n");

    let facade = facade(index_dir.path());
    let scan = facade.scan(root, &project()).unwrap();
    assert_eq!(scan.stats.files + scan.stats.directories, 3);

    facade.build(&project()).unwrap();
    let (dataset, _) = facade.view(&project()).unwrap();

    assert_eq!(dataset.nodes.len(), 3);
    assert_eq!(dataset.links.len(), 1);
    let link = &dataset.links[0];
    assert_eq!(link.from, "src/index.ts");
    assert_eq!(link.to, "src/util.ts");
    assert_eq!(link.relation_type, RelationKind::Imports);
    assert_eq!(link.line_number, 1);
    assert_eq!(link.id, "src/index.ts|src/util.ts|IMPORTS");
}

#[test]
fn test_java_class_header_relations_share_a_line() {
    let relations = JvmExtractor::new().parse(
        "src/Foo.java",
        "package demo;\n\nclass Foo extends Bar implements A, B {\n}\n",
    );

    let summary: Vec<_> = relations
        .iter()
        .map(|r| (r.target.as_str(), r.kind, r.line))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Bar", RelationKind::Extends, 3),
            ("A", RelationKind::Implements, 3),
            ("B", RelationKind::Implements, 3),
        ]
    );
}

#[test]
fn test_dependency_directories_produce_no_records() {
    let workspace = TempDir::new().unwrap();
    let root = workspace.path();
    write(root, "node_modules/lodash/index.js", "module.exports = {};\n");
    write(root, "node_modules/.bin/tool", "#!/bin/sh\n");
    write(root, "app.js", "const _ = require('lodash');\n");

    let scanner = DirectoryScanner::new(ExclusionMatcher::with_defaults()).with_threads(2);
    let output = scanner.scan(root, &project()).unwrap();

    let paths: Vec<_> = output.records.iter().map(|r| r.file_path.as_str()).collect();
    assert_eq!(paths, vec!["app.js"]);
    assert!(!paths.iter().any(|p| p.starts_with("node_modules")));
}

#[test]
fn test_rescan_of_unchanged_tree_is_stable() {
    let workspace = TempDir::new().unwrap();
    let index_dir = TempDir::new().unwrap();
    let root = workspace.path();
    write(root, "pkg/__init__.py", "");
    write(root, "pkg/core.py", "import os\n");
    write(root, "README.md", "# demo\n");

    let facade = facade(index_dir.path());
    facade.scan(root, &project()).unwrap();
    let first = facade.store().load_files(&project()).unwrap().unwrap();
    facade.scan(root, &project()).unwrap();
    let second = facade.store().load_files(&project()).unwrap().unwrap();

    assert_eq!(first, second);
    assert!(first.iter().filter(|r| !r.is_directory).all(|r| r.content_fingerprint.is_some()));
}

#[test]
fn test_duplicate_relations_collapse_to_first_line() {
    let workspace = TempDir::new().unwrap();
    let index_dir = TempDir::new().unwrap();
    let root = workspace.path();
    write(
        root,
        "src/a.js",
        "import { x } from './b';\nconst later = require('./b');\n",
    );
    write(root, "src/b.js", "export const x = 1;\n");

    let facade = facade(index_dir.path());
    facade.scan(root, &project()).unwrap();
    let build = facade.build(&project()).unwrap();
    assert_eq!(build.stats.relations, 2);

    let (dataset, stats) = facade.view(&project()).unwrap();
    assert_eq!(dataset.links.len(), 1);
    assert_eq!(dataset.links[0].line_number, 1);
    assert_eq!(stats.duplicates, 1);
}

#[test]
fn test_web_project_assets_and_externals() {
    let workspace = TempDir::new().unwrap();
    let index_dir = TempDir::new().unwrap();
    let root = workspace.path();
    write(
        root,
        "index.html",
        "<script src=\"js/app.js\"></script>\n<script src=\"https://cdn.example.com/x.js\"></script>\n",
    );
    write(root, "js/app.js", "import '../css/site.css';\nimport React from 'react';\n");
    write(root, "css/site.css", ".hero { background: url(../img/hero.png); }\n");
    write(root, "img/hero.png", "not really a png");

    let facade = facade(index_dir.path());
    facade.scan(root, &project()).unwrap();
    facade.build(&project()).unwrap();
    let (dataset, stats) = facade.view(&project()).unwrap();

    let mut links: Vec<_> = dataset
        .links
        .iter()
        .map(|l| (l.from.as_str(), l.to.as_str(), l.relation_type))
        .collect();
    links.sort();
    assert_eq!(
        links,
        vec![
            ("css/site.css", "img/hero.png", RelationKind::ImportsImage),
            ("index.html", "js/app.js", RelationKind::Imports),
            ("js/app.js", "css/site.css", RelationKind::ImportsCss),
        ]
    );
    // `react` is stored but has no node
    assert_eq!(stats.dangling, 1);
}

#[test]
fn test_assembler_drops_unknown_endpoints() {
    let workspace = TempDir::new().unwrap();
    let root = workspace.path();
    write(root, "a.py", "");

    let output = DirectoryScanner::new(ExclusionMatcher::with_defaults())
        .scan(root, &project())
        .unwrap();
    let relations = vec![
        RelationRecord::new("a.py", "missing.py", RelationKind::Imports, 1),
        RelationRecord::new("ghost.py", "a.py", RelationKind::Imports, 1),
    ];

    let (dataset, stats) = GraphAssembler::new().assemble(&output.records, &relations);
    assert!(dataset.links.is_empty());
    assert_eq!(stats.dangling, 2);
}

#[test]
fn test_graph_json_shape() {
    let workspace = TempDir::new().unwrap();
    let index_dir = TempDir::new().unwrap();
    let root = workspace.path();
    write(root, "src/main/java/shop/Cart.java", "package shop;\n\nimport shop.model.Item;\n\npublic class Cart extends Base {}\n");
    write(root, "src/main/java/shop/Base.java", "package shop;\n\npublic abstract class Base {}\n");
    write(root, "src/main/java/shop/model/Item.java", "package shop.model;\n\npublic class Item {}\n");

    let facade = facade(index_dir.path());
    facade.scan(root, &project()).unwrap();
    facade.build(&project()).unwrap();
    let (dataset, _) = facade.view(&project()).unwrap();

    let json: serde_json::Value = serde_json::to_value(&dataset).unwrap();
    let links = json["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);

    let extends = links
        .iter()
        .find(|l| l["relation_type"] == "EXTENDS")
        .unwrap();
    assert_eq!(extends["from"], "src/main/java/shop/Cart.java");
    assert_eq!(extends["to"], "src/main/java/shop/Base.java");
    assert_eq!(extends["label"], "extends");
    assert_eq!(extends["style"]["dashes"], false);

    let imports = links
        .iter()
        .find(|l| l["relation_type"] == "IMPORTS")
        .unwrap();
    assert_eq!(imports["to"], "src/main/java/shop/model/Item.java");

    let node = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "src/main/java/shop/model")
        .unwrap();
    assert_eq!(node["is_directory"], true);
    assert_eq!(node["label"], "model");
}
