//! mr-sql - SQL layer for migrun
//!
//! This crate splits migration files into individual statements, either
//! naively on every `;` or with the sqlparser-rs tokenizer so that semicolons
//! inside literals, comments and dollar-quoted bodies are left alone.

pub mod error;
pub mod splitter;

pub use error::{SqlError, SqlResult};
pub use splitter::{split_naive, StatementSplitter};
