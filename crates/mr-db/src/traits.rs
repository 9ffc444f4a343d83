//! Execution backend trait definition

use crate::error::DbResult;
use async_trait::async_trait;
use mr_core::{ExecutionResult, MigrationSpec};
use std::time::Instant;

/// Transport that delivers a migration's SQL text to the target database
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Send SQL text, returning a detail string (row count or response body)
    async fn submit(&self, sql: &str) -> DbResult<String>;

    /// Release transport resources. Called once at the end of every run.
    async fn close(&self) -> DbResult<()> {
        Ok(())
    }

    /// Backend type identifier for logging
    fn backend_type(&self) -> &'static str;

    /// Execute one migration. Never fails: errors become a failed result.
    async fn execute(&self, migration: &MigrationSpec, sql: &str) -> ExecutionResult {
        let start = Instant::now();
        match self.submit(sql).await {
            Ok(detail) => ExecutionResult::success(migration, detail, start.elapsed()),
            Err(e) => {
                log::debug!("{} failed on {}: {}", self.backend_type(), migration, e);
                ExecutionResult::failure(migration, e.failure_kind(), e.to_string(), start.elapsed())
            }
        }
    }
}
