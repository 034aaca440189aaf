//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module and returns
//! `anyhow::Result`; `main` turns an error into a single message and exit code.

pub mod graph;
pub mod index;
pub mod init;
pub mod retrieve;
pub mod status;
