//! Migration execution

use mr_core::{ExecutionResult, FailureKind, MigrationSpec, RunSummary};
use mr_db::ExecutionBackend;
use std::time::Instant;

/// Runner behaviour switches
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Count a missing file as an attempted failure instead of skipping it
    pub fail_on_missing: bool,

    /// Suppress per-migration progress lines
    pub quiet: bool,
}

/// Applies migrations strictly in list order, one at a time
///
/// A failed migration never stops the run: every migration in the list is
/// attempted and the operator reads the summary afterwards. Nothing is retried.
pub struct MigrationRunner<'a> {
    backend: &'a dyn ExecutionBackend,
    options: RunOptions,
}

impl<'a> MigrationRunner<'a> {
    /// Create a new runner
    pub fn new(backend: &'a dyn ExecutionBackend) -> Self {
        Self {
            backend,
            options: RunOptions::default(),
        }
    }

    /// Set runner options
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Apply a single migration
    pub async fn run_one(&self, migration: &MigrationSpec) -> ExecutionResult {
        let path = migration.path();

        if !path.exists() {
            let detail = format!("file not found: {}", path.display());
            let result = if self.options.fail_on_missing {
                ExecutionResult::failure(
                    migration,
                    FailureKind::FileNotFound,
                    detail,
                    Default::default(),
                )
            } else {
                ExecutionResult::skipped(migration, detail)
            };
            self.report(&result);
            return result;
        }

        let start = Instant::now();
        let sql = match std::fs::read_to_string(path) {
            Ok(sql) => sql,
            Err(e) => {
                let result = ExecutionResult::failure(
                    migration,
                    FailureKind::ReadError,
                    format!("failed to read {}: {}", path.display(), e),
                    start.elapsed(),
                );
                self.report(&result);
                return result;
            }
        };

        log::debug!(
            "Executing {} via {} ({} characters)",
            migration,
            self.backend.backend_type(),
            sql.chars().count()
        );

        let result = self.backend.execute(migration, &sql).await;
        self.report(&result);
        result
    }

    /// Apply all migrations in order, then close the backend
    pub async fn run(&self, migrations: &[MigrationSpec]) -> RunSummary {
        let start = Instant::now();
        let mut results = Vec::with_capacity(migrations.len());

        for migration in migrations {
            results.push(self.run_one(migration).await);
        }

        if let Err(e) = self.backend.close().await {
            log::warn!("Failed to close {} backend: {}", self.backend.backend_type(), e);
        }

        RunSummary::from_results(results, start.elapsed())
    }

    fn report(&self, result: &ExecutionResult) {
        if self.options.quiet {
            return;
        }

        let millis = (result.duration_secs * 1000.0) as u64;
        match (result.succeeded(), result.attempted()) {
            (true, _) => println!("  \u{2713} {} [{}ms]", result.migration, millis),
            (false, true) => println!(
                "  \u{2717} {} - {} [{}ms]",
                result.migration, result.detail, millis
            ),
            (false, false) => println!("  - {} (skipped: {})", result.migration, result.detail),
        }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
