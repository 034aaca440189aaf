//! Scan and Build commands.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::indexing::{BuildSummary, IndexFacade, ScanSummary};
use crate::types::ProjectId;

/// Run scan command, optionally followed by a build.
pub fn run_scan(facade: &IndexFacade, project: &ProjectId, root: &Path, build: bool) -> Result<()> {
    let summary = facade
        .scan(root, project)
        .with_context(|| format!("Scan of {} failed", root.display()))?;
    print_scan(&summary);

    if build {
        run_build(facade, project)?;
    }
    Ok(())
}

/// Run build command.
pub fn run_build(facade: &IndexFacade, project: &ProjectId) -> Result<()> {
    let summary = facade
        .build(project)
        .with_context(|| format!("Build of project '{project}' failed"))?;
    print_build(&summary);
    Ok(())
}

fn print_scan(summary: &ScanSummary) {
    let stats = &summary.stats;
    println!(
        "{} {} ({})",
        style("Scanned").green().bold(),
        summary.root.display(),
        summary.project_id
    );
    println!("  files:       {}", stats.files);
    println!("  directories: {}", stats.directories);
    if stats.degraded > 0 || stats.skipped > 0 {
        println!(
            "  {}",
            style(format!(
                "{} degraded, {} skipped (see warnings)",
                stats.degraded, stats.skipped
            ))
            .yellow()
        );
    }
}

fn print_build(summary: &BuildSummary) {
    let stats = &summary.stats;
    println!(
        "{} relations for {}",
        style("Built").green().bold(),
        summary.project_id
    );
    println!("  files parsed: {}", stats.files_parsed);
    println!("  relations:    {}", stats.relations);
    println!("  unbound:      {}", stats.unbound);
    if stats.files_unreadable > 0 {
        println!(
            "  {}",
            style(format!("{} files without readable content", stats.files_unreadable)).yellow()
        );
    }
}
