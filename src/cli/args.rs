//! CLI argument parsing using clap.
//!
//! Contains the Cli struct, Commands enum, and all subcommand enums.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Project file graph indexer
#[derive(Parser, Debug)]
#[command(
    name = "filegraph",
    version = env!("CARGO_PKG_VERSION"),
    about = "Index a project's files and the relations between them",
    long_about = "Scan a project tree, extract imports, inheritance and asset references, \
                  and export the resulting file graph for visualization.",
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Project id the index is stored under
    #[arg(
        short,
        long,
        global = true,
        env = "FILEGRAPH_PROJECT",
        default_value = "default"
    )]
    pub project: String,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up .filegraph directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,

    /// Scan a directory tree and record its files
    Scan {
        /// Root directory of the project
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Number of threads to use (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Build relations right after the scan
        #[arg(short, long)]
        build: bool,
    },

    /// Extract relations from the last scan
    Build {
        /// Number of threads to use (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Export the assembled graph as JSON
    Graph {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Query file relations
    Retrieve {
        #[command(subcommand)]
        query: RetrieveQuery,
    },

    /// Show index state for the project
    Status {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RetrieveQuery {
    /// Files that a file depends on
    Dependencies {
        /// Project-relative file path
        path: String,

        /// Only this relation type, e.g. IMPORTS or extends
        #[arg(short, long)]
        kind: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Files that depend on a file
    Dependents {
        /// Project-relative file path
        path: String,

        /// Only this relation type, e.g. IMPORTS or extends
        #[arg(short, long)]
        kind: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Files affected by a change to a file, grouped by distance
    Impact {
        /// Project-relative file path
        path: String,

        /// Maximum depth to search
        #[arg(short, long)]
        depth: Option<usize>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_with_globals() {
        let cli = Cli::parse_from(["filegraph", "scan", "web", "--threads", "3", "--project", "site", "-b"]);
        assert_eq!(cli.project, "site");
        match cli.command {
            Commands::Scan { path, threads, build } => {
                assert_eq!(path, PathBuf::from("web"));
                assert_eq!(threads, Some(3));
                assert!(build);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_retrieve_impact() {
        let cli = Cli::parse_from(["filegraph", "retrieve", "impact", "src/util.ts", "--depth", "2"]);
        match cli.command {
            Commands::Retrieve {
                query: RetrieveQuery::Impact { path, depth, json },
            } => {
                assert_eq!(path, "src/util.ts");
                assert_eq!(depth, Some(2));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
