//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use mr_core::{BackendKind, Config, Credentials, RestConfig, SplitStrategy};
use mr_db::{BulkRestBackend, ExecutionBackend, PostgresBackend, RpcClient, StatementRestBackend};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs exits with the code and prints nothing.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the config named by `--config`, or look in the project directory
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => {
            log::debug!("Loading config from {}", path);
            Config::load(Path::new(path))
                .with_context(|| format!("Failed to load config from {}", path))
        }
        None => Config::load_from_dir(Path::new(&global.project_dir))
            .context("Failed to load project config"),
    }
}

/// Credentials from the environment, overridden by command-line flags
pub(crate) fn resolve_credentials(global: &GlobalArgs) -> Credentials {
    Credentials::from_env().with_overrides(
        global.database_url.as_deref(),
        global.api_url.as_deref(),
        global.service_key.as_deref(),
    )
}

/// Build the execution backend for `kind`.
///
/// Only the credentials for the chosen backend are required; a missing one
/// is a setup error.
pub(crate) fn create_backend(
    kind: BackendKind,
    split: SplitStrategy,
    rest: &RestConfig,
    credentials: &Credentials,
    global: &GlobalArgs,
) -> Result<Box<dyn ExecutionBackend>> {
    let backend: Box<dyn ExecutionBackend> = match kind {
        BackendKind::Direct => {
            let url = credentials.require_database_url()?;
            let db = PostgresBackend::new(url.clone());
            if global.verbose {
                eprintln!("[verbose] Direct connection: {}", db.redacted_url());
            }
            Box::new(db)
        }
        BackendKind::BulkRest => {
            let client = rest_client(rest, credentials)?;
            if global.verbose {
                eprintln!("[verbose] Whole-file RPC: {}", client.rpc_url(&rest.endpoint));
            }
            Box::new(BulkRestBackend::new(
                client,
                rest.endpoint.clone(),
                rest.payload_field,
                rest.prefer_minimal,
            ))
        }
        BackendKind::PerStatementRest => {
            let client = rest_client(rest, credentials)?;
            if global.verbose {
                eprintln!(
                    "[verbose] Per-statement RPC: {} ({} splitter)",
                    client.rpc_url(&rest.statement_endpoint),
                    split
                );
            }
            Box::new(StatementRestBackend::new(
                client,
                rest.statement_endpoint.clone(),
                rest.payload_field,
                split,
            ))
        }
    };
    Ok(backend)
}

fn rest_client(rest: &RestConfig, credentials: &Credentials) -> Result<RpcClient> {
    let (api_url, service_key) = credentials.require_rest()?;
    RpcClient::new(api_url, service_key, Duration::from_secs(rest.timeout_secs))
        .context("Failed to create HTTP client")
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
