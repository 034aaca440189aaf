//! Retrieve command - query the file graph.

use anyhow::{Context, Result, bail};
use console::style;
use serde_json::json;

use crate::cli::RetrieveQuery;
use crate::indexing::IndexFacade;
use crate::storage::FileGraph;
use crate::types::{ProjectId, RelationKind};

const DEFAULT_IMPACT_DEPTH: usize = 5;

/// Run the retrieve command.
pub fn run(query: RetrieveQuery, facade: &IndexFacade, project: &ProjectId) -> Result<()> {
    let graph = facade
        .file_graph(project)
        .with_context(|| format!("Cannot load graph for project '{project}'"))?;

    match query {
        RetrieveQuery::Dependencies { path, kind, json } => {
            let kind = parse_kind(kind.as_deref())?;
            require_file(&graph, &path)?;
            print_edges(&path, "depends on", &graph.dependencies(&path, kind), json);
        }
        RetrieveQuery::Dependents { path, kind, json } => {
            let kind = parse_kind(kind.as_deref())?;
            require_file(&graph, &path)?;
            print_edges(&path, "is used by", &graph.dependents(&path, kind), json);
        }
        RetrieveQuery::Impact { path, depth, json } => {
            require_file(&graph, &path)?;
            let levels = graph.impact(&path, Some(depth.unwrap_or(DEFAULT_IMPACT_DEPTH)));
            print_impact(&path, &levels, json);
        }
    }
    Ok(())
}

fn parse_kind(kind: Option<&str>) -> Result<Option<RelationKind>> {
    kind.map(|k| k.parse::<RelationKind>().map_err(|e| anyhow::anyhow!("{e}")))
        .transpose()
}

fn require_file(graph: &FileGraph, path: &str) -> Result<()> {
    if !graph.contains(path) {
        bail!("'{path}' is not in the index");
    }
    Ok(())
}

fn print_edges(path: &str, verb: &str, edges: &[(String, RelationKind)], as_json: bool) {
    if as_json {
        let items: Vec<_> = edges
            .iter()
            .map(|(file, kind)| json!({ "file": file, "relation_type": kind }))
            .collect();
        println!("{}", json!({ "file": path, "relations": items }));
        return;
    }

    if edges.is_empty() {
        println!("{path} {verb} nothing");
        return;
    }
    println!("{} {verb}:", style(path).bold());
    for (file, kind) in edges {
        println!("  {} {file}", style(format!("[{kind}]")).cyan());
    }
}

fn print_impact(path: &str, levels: &[Vec<String>], as_json: bool) {
    if as_json {
        println!("{}", json!({ "file": path, "levels": levels }));
        return;
    }

    let affected: usize = levels.iter().skip(1).map(Vec::len).sum();
    println!("{} affects {affected} file(s)", style(path).bold());
    for (depth, files) in levels.iter().enumerate().skip(1) {
        println!("  depth {depth}:");
        for file in files {
            println!("    {file}");
        }
    }
}
