//! Status command - show persisted index metadata.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use console::style;

use crate::indexing::IndexFacade;
use crate::types::ProjectId;

pub fn run(facade: &IndexFacade, project: &ProjectId, json: bool) -> Result<()> {
    let metadata = facade
        .metadata(project)
        .with_context(|| format!("Cannot read index state for project '{project}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    let Some(metadata) = metadata else {
        println!("Project '{project}' has not been scanned yet.");
        println!("Run 'filegraph scan <PATH>' to create the index.");
        return Ok(());
    };

    println!("{} {}", style("Project").cyan().bold(), metadata.project_id);
    if let Some(root) = &metadata.root {
        println!("  root:        {}", root.display());
    }
    println!("  files:       {}", metadata.file_count);
    println!("  directories: {}", metadata.directory_count);
    println!("  relations:   {}", metadata.relation_count);
    println!("  last scan:   {}", format_timestamp(metadata.last_scan));
    println!("  last build:  {}", format_timestamp(metadata.last_build));
    Ok(())
}

fn format_timestamp(timestamp: Option<u64>) -> String {
    timestamp
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "never".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "never");
        assert_eq!(format_timestamp(Some(0)).len(), "1970-01-01 00:00:00".len());
    }
}
