//! Run command implementation

use anyhow::{Context, Result};
use mr_core::{select_migrations, RunSummary};
use mr_runner::{MigrationRunner, RunOptions};
use std::path::Path;

use crate::cli::{GlobalArgs, RunArgs, RunOutput};
use crate::commands::common::{create_backend, load_config, resolve_credentials, ExitCode};

/// Execute the run command
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let project_dir = Path::new(&global.project_dir);
    let config = load_config(global)?;

    let configured = config.migration_specs(project_dir);
    let migrations = select_migrations(&configured, args.select.as_deref())
        .context("Invalid --select")?;

    let backend_kind = args.backend.map(Into::into).unwrap_or(config.backend);
    let split = args.split.map(Into::into).unwrap_or(config.split);
    let options = RunOptions {
        fail_on_missing: args.fail_on_missing || config.fail_on_missing,
        quiet: args.output == RunOutput::Json,
    };

    if global.verbose {
        eprintln!(
            "[verbose] Project '{}': {} of {} migrations selected",
            config.name,
            migrations.len(),
            configured.len()
        );
    }

    let credentials = resolve_credentials(global);
    let backend = create_backend(backend_kind, split, &config.rest, &credentials, global)?;

    if args.output == RunOutput::Text {
        println!(
            "Running {} migrations via {}...\n",
            migrations.len(),
            backend_kind
        );
    }

    let summary = MigrationRunner::new(backend.as_ref())
        .with_options(options)
        .run(&migrations)
        .await;

    match args.output {
        RunOutput::Text => print_summary(&summary),
        RunOutput::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    if !summary.all_succeeded() {
        return Err(ExitCode(summary.exit_code()).into());
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    print!(
        "Succeeded: {}/{} migrations in {:.2}s",
        summary.succeeded, summary.attempted, summary.elapsed_secs
    );
    if summary.skipped > 0 {
        print!(" ({} skipped, file not found)", summary.skipped);
    }
    println!();

    let failures: Vec<_> = summary
        .results
        .iter()
        .filter(|r| r.attempted() && !r.succeeded())
        .collect();
    if !failures.is_empty() {
        println!("\nFailed:");
        for result in failures {
            match result.failure {
                Some(kind) => println!("  {} ({})", result.migration, kind),
                None => println!("  {}", result.migration),
            }
        }
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
