//! mr-core - Core library for migrun
//!
//! This crate provides the migration data model, run results, configuration
//! parsing, and credential handling shared by all migrun components.

pub mod config;
pub mod credentials;
pub mod error;
pub mod migration;
pub mod migration_name;
mod newtype_string;

pub use config::{BackendKind, Config, MigrationEntry, PayloadField, RestConfig, SplitStrategy};
pub use credentials::{redact_connection_string, Credentials, Secret};
pub use error::{CoreError, CoreResult};
pub use migration::{
    select_migrations, ExecutionResult, FailureKind, MigrationSpec, MigrationStatus, RunSummary,
};
pub use migration_name::{EndpointName, MigrationName};
