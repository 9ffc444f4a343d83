//! mr-runner - Migration runner for migrun
//!
//! This crate applies an ordered list of migration files through an
//! execution backend, one at a time, and summarizes the outcome.

pub mod runner;

pub use runner::{MigrationRunner, RunOptions};
