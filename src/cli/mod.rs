//! CLI module for filegraph.
//!
//! Provides command-line interface parsing and command dispatch.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, RetrieveQuery};

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::IndexError;
use crate::indexing::IndexFacade;
use crate::logging;
use crate::types::ProjectId;

/// Load settings, initialize logging and dispatch `cli` to its command.
pub fn run(cli: Cli) -> Result<()> {
    let mut settings = load_settings(cli.config.as_deref())?;
    logging::init_with_config(&settings.logging, cli.verbose);

    let Cli {
        project, command, ..
    } = cli;

    match command {
        Commands::Init { force } => {
            let cwd = std::env::current_dir().context("Cannot determine current directory")?;
            commands::init::run_init(&cwd, force)
        }
        Commands::Config => commands::init::run_config(&settings),
        Commands::Scan {
            path,
            threads,
            build,
        } => {
            apply_threads(&mut settings, threads);
            let (facade, project) = open(settings, &project)?;
            commands::index::run_scan(&facade, &project, &path, build)
        }
        Commands::Build { threads } => {
            apply_threads(&mut settings, threads);
            let (facade, project) = open(settings, &project)?;
            commands::index::run_build(&facade, &project)
        }
        Commands::Graph { output, pretty } => {
            let (facade, project) = open(settings, &project)?;
            commands::graph::run(&facade, &project, output.as_deref(), pretty)
        }
        Commands::Retrieve { query } => {
            let (facade, project) = open(settings, &project)?;
            commands::retrieve::run(query, &facade, &project)
        }
        Commands::Status { json } => {
            let (facade, project) = open(settings, &project)?;
            commands::status::run(&facade, &project, json)
        }
    }
}

fn load_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => {
            let mut settings = Settings::load_from(path)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            if settings.workspace_root.is_none() {
                // `<root>/.filegraph/settings.toml`
                settings.workspace_root = path
                    .canonicalize()
                    .ok()
                    .and_then(|p| p.parent()?.parent().map(Path::to_path_buf));
            }
            Ok(settings)
        }
        None => Settings::load().context("Invalid configuration"),
    }
}

fn apply_threads(settings: &mut Settings, threads: Option<usize>) {
    if let Some(threads) = threads {
        settings.indexing.parallel_threads = threads;
    }
}

fn open(settings: Settings, project: &str) -> Result<(IndexFacade, ProjectId)> {
    let project =
        ProjectId::new(project).ok_or_else(|| IndexError::InvalidProjectId(project.to_string()))?;
    tracing::debug!(
        target: "cli",
        "using index at {} for project '{project}'",
        settings.resolved_index_path().display()
    );
    Ok((IndexFacade::new(Arc::new(settings)), project))
}
