//! List command implementation

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::load_config;

/// Migration information for display
#[derive(Debug, Serialize)]
struct MigrationInfo {
    sequence: u32,
    name: String,
    file: String,
    exists: bool,
    size_bytes: Option<u64>,
}

/// Execute the ls command
pub async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let project_dir = Path::new(&global.project_dir);
    let config = load_config(global)?;

    let infos: Vec<MigrationInfo> = config
        .migration_specs(project_dir)
        .into_iter()
        .map(|spec| {
            let size_bytes = std::fs::metadata(spec.path()).ok().map(|m| m.len());
            MigrationInfo {
                sequence: spec.sequence,
                name: spec.name.to_string(),
                file: spec.path().display().to_string(),
                exists: size_bytes.is_some(),
                size_bytes,
            }
        })
        .collect();

    match args.output {
        LsOutput::Table => print_table(&infos),
        LsOutput::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
    }

    Ok(())
}

/// Print migrations in table format
fn print_table(infos: &[MigrationInfo]) {
    let name_width = infos
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    println!("{:>3}  {:<name_width$}  {:>9}  FILE", "SEQ", "NAME", "SIZE");
    println!("{:->3}  {:-<name_width$}  {:->9}  {}", "", "", "", "-".repeat(40));

    for info in infos {
        let size = match info.size_bytes {
            Some(bytes) => format!("{} B", bytes),
            None => "missing".to_string(),
        };
        println!(
            "{:>3}  {:<name_width$}  {:>9}  {}",
            info.sequence, info.name, size, info.file
        );
    }

    let missing = infos.iter().filter(|m| !m.exists).count();
    println!();
    if missing > 0 {
        println!("{} migrations ({} missing)", infos.len(), missing);
    } else {
        println!("{} migrations", infos.len());
    }
}
