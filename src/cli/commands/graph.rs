//! Graph command - export `{nodes, links}` JSON.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::indexing::IndexFacade;
use crate::types::ProjectId;

pub fn run(facade: &IndexFacade, project: &ProjectId, output: Option<&Path>, pretty: bool) -> Result<()> {
    let (dataset, stats) = facade
        .view(project)
        .with_context(|| format!("Cannot assemble graph for project '{project}'"))?;

    let json = if pretty {
        serde_json::to_string_pretty(&dataset)
    } else {
        serde_json::to_string(&dataset)
    }
    .context("Cannot serialize graph")?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))?;
            eprintln!(
                "Wrote {} nodes and {} links to {} ({} dangling, {} duplicate relations dropped)",
                stats.nodes,
                stats.links,
                path.display(),
                stats.dangling,
                stats.duplicates
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
