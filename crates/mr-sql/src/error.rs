//! Error types for mr-sql

use thiserror::Error;

/// SQL splitting errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// Tokenizer error (S001)
    #[error("[S001] SQL tokenize error at line {line}, column {column}: {message}")]
    Tokenize {
        message: String,
        line: u64,
        column: u64,
    },

    /// Token location outside the source text (S002)
    #[error("[S002] Token location line {line}, column {column} is outside the SQL text")]
    LocationOutOfRange { line: u64, column: u64 },
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
