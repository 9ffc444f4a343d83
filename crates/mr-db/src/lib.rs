//! mr-db - Execution backends for migrun
//!
//! This crate provides the `ExecutionBackend` trait and its three transports:
//! a direct Postgres connection, one RPC call per file, and one RPC call per
//! statement.

pub mod bulk_rest;
pub mod error;
pub mod postgres;
pub mod rest;
pub mod statement_rest;
pub mod traits;

pub use bulk_rest::BulkRestBackend;
pub use error::{DbError, DbResult};
pub use postgres::PostgresBackend;
pub use rest::{RpcClient, RpcResponse};
pub use statement_rest::StatementRestBackend;
pub use traits::ExecutionBackend;
