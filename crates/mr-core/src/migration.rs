//! Migration specs, per-migration results, and run summaries

use crate::error::{CoreError, CoreResult};
use crate::migration_name::MigrationName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A single SQL file to apply, in its required position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationSpec {
    /// 1-based position in the run
    pub sequence: u32,

    /// Path to the SQL file
    pub path: PathBuf,

    /// Human-readable name
    pub name: MigrationName,
}

impl MigrationSpec {
    /// Create a new migration spec
    pub fn new(sequence: u32, path: impl Into<PathBuf>, name: MigrationName) -> Self {
        Self {
            sequence,
            path: path.into(),
            name,
        }
    }

    /// Path to the SQL file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for MigrationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.sequence, self.name)
    }
}

/// Outcome of a single migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationStatus {
    Success,
    Failed,
    Skipped,
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationStatus::Success => write!(f, "success"),
            MigrationStatus::Failed => write!(f, "failed"),
            MigrationStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Why a migration did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The SQL file does not exist
    FileNotFound,
    /// The SQL file exists but could not be read as UTF-8 text
    ReadError,
    /// The database could not be reached
    ConnectionError,
    /// The remote side rejected the SQL
    ExecutionError,
    /// HTTP or network failure
    TransportError,
    /// Some, but not all, statements of the file were applied
    PartialSuccess,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::FileNotFound => "file not found",
            FailureKind::ReadError => "read error",
            FailureKind::ConnectionError => "connection error",
            FailureKind::ExecutionError => "execution error",
            FailureKind::TransportError => "transport error",
            FailureKind::PartialSuccess => "partial success",
        };
        f.write_str(s)
    }
}

/// Result of one migration attempt
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    /// The migration this result belongs to
    pub migration: MigrationSpec,

    /// Outcome
    pub status: MigrationStatus,

    /// Failure classification, present only when `status` is `Failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,

    /// Error message or response body
    pub detail: String,

    /// Wall time spent on this migration
    pub duration_secs: f64,
}

impl ExecutionResult {
    /// Create a successful result
    pub fn success(migration: &MigrationSpec, detail: impl Into<String>, duration: Duration) -> Self {
        Self {
            migration: migration.clone(),
            status: MigrationStatus::Success,
            failure: None,
            detail: detail.into(),
            duration_secs: duration.as_secs_f64(),
        }
    }

    /// Create a failed result
    pub fn failure(
        migration: &MigrationSpec,
        kind: FailureKind,
        detail: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            migration: migration.clone(),
            status: MigrationStatus::Failed,
            failure: Some(kind),
            detail: detail.into(),
            duration_secs: duration.as_secs_f64(),
        }
    }

    /// Create a result for a migration that was not attempted
    pub fn skipped(migration: &MigrationSpec, detail: impl Into<String>) -> Self {
        Self {
            migration: migration.clone(),
            status: MigrationStatus::Skipped,
            failure: None,
            detail: detail.into(),
            duration_secs: 0.0,
        }
    }

    /// Whether the migration was applied
    pub fn succeeded(&self) -> bool {
        self.status == MigrationStatus::Success
    }

    /// Whether the migration counts toward `attempted`
    pub fn attempted(&self) -> bool {
        self.status != MigrationStatus::Skipped
    }
}

/// Summary of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// When the run finished
    pub timestamp: DateTime<Utc>,

    /// Total wall time
    pub elapsed_secs: f64,

    /// Migrations handed to a backend (or counted as failed)
    pub attempted: usize,

    /// Migrations applied successfully
    pub succeeded: usize,

    /// Migrations skipped because their file was missing
    pub skipped: usize,

    /// Per-migration results, in execution order
    pub results: Vec<ExecutionResult>,
}

impl RunSummary {
    /// Create a summary from results in execution order
    pub fn from_results(results: Vec<ExecutionResult>, elapsed: Duration) -> Self {
        let attempted = results.iter().filter(|r| r.attempted()).count();
        let succeeded = results.iter().filter(|r| r.succeeded()).count();
        let skipped = results.len() - attempted;

        Self {
            timestamp: Utc::now(),
            elapsed_secs: elapsed.as_secs_f64(),
            attempted,
            succeeded,
            skipped,
            results,
        }
    }

    /// Number of attempted migrations that failed
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    /// Check if every attempted migration succeeded
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.attempted
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() {
            0
        } else {
            1
        }
    }
}

/// Restrict `migrations` to the sequence numbers listed in `selector`.
///
/// `selector` is a comma-separated list such as `"1,3"`. The result keeps the
/// configured execution order regardless of the order in the selector.
/// `None` selects everything.
pub fn select_migrations(
    migrations: &[MigrationSpec],
    selector: Option<&str>,
) -> CoreResult<Vec<MigrationSpec>> {
    let Some(selector) = selector else {
        return Ok(migrations.to_vec());
    };

    let mut wanted = BTreeSet::new();
    for token in selector.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let sequence = token
            .parse::<u32>()
            .map_err(|_| CoreError::InvalidSelector {
                selector: selector.to_string(),
                reason: format!("'{}' is not a migration number", token),
            })?;
        if !migrations.iter().any(|m| m.sequence == sequence) {
            return Err(CoreError::MigrationNotFound {
                sequence,
                available: migrations
                    .iter()
                    .map(|m| m.sequence.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        wanted.insert(sequence);
    }

    if wanted.is_empty() {
        return Err(CoreError::InvalidSelector {
            selector: selector.to_string(),
            reason: "no migration numbers given".to_string(),
        });
    }

    Ok(migrations
        .iter()
        .filter(|m| wanted.contains(&m.sequence))
        .cloned()
        .collect())
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
