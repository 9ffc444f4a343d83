//! Error types for mr-db

use mr_core::FailureKind;
use thiserror::Error;

/// Backend operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Non-success HTTP status (D003)
    #[error("[D003] HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Network error or timeout (D004)
    #[error("[D004] Request failed: {0}")]
    TransportError(String),

    /// Some statements of a file failed (D005)
    #[error("[D005] {succeeded}/{total} statements executed; first failure: {first_error}")]
    StatementsFailed {
        succeeded: usize,
        total: usize,
        first_error: Box<DbError>,
    },

    /// SQL could not be split into statements (D006)
    #[error("[D006] Statement split failed: {0}")]
    Split(#[from] mr_sql::SqlError),

    /// Backend could not be constructed (D007)
    #[error("[D007] Invalid backend configuration: {0}")]
    Config(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// Classify this error for the run summary
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            DbError::ConnectionError(_) => FailureKind::ConnectionError,
            DbError::ExecutionError(_) | DbError::HttpStatus { .. } | DbError::Split(_) => {
                FailureKind::ExecutionError
            }
            DbError::TransportError(_) | DbError::Config(_) => FailureKind::TransportError,
            DbError::StatementsFailed {
                succeeded,
                first_error,
                ..
            } => {
                if *succeeded > 0 {
                    FailureKind::PartialSuccess
                } else {
                    first_error.failure_kind()
                }
            }
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        // Errors reported by the server are execution errors; everything that
        // prevents talking to the server is a connection error.
        match err {
            sqlx::Error::Database(db_err) => DbError::ExecutionError(db_err.to_string()),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => DbError::ConnectionError(err.to_string()),
            other => DbError::ExecutionError(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for DbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DbError::TransportError(format!("request timed out: {}", err))
        } else {
            DbError::TransportError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_is_execution_error() {
        let err = DbError::HttpStatus {
            status: 400,
            body: "syntax error at or near \"POLICY\"".to_string(),
        };
        assert_eq!(err.failure_kind(), FailureKind::ExecutionError);
        assert!(err.to_string().starts_with("[D003] HTTP 400"));
    }

    #[test]
    fn test_statements_failed_kind() {
        let partial = DbError::StatementsFailed {
            succeeded: 2,
            total: 3,
            first_error: Box::new(DbError::HttpStatus {
                status: 404,
                body: String::new(),
            }),
        };
        assert_eq!(partial.failure_kind(), FailureKind::PartialSuccess);
        assert!(partial.to_string().contains("2/3 statements executed"));

        let none = DbError::StatementsFailed {
            succeeded: 0,
            total: 3,
            first_error: Box::new(DbError::TransportError("connection refused".into())),
        };
        assert_eq!(none.failure_kind(), FailureKind::TransportError);
    }

    #[test]
    fn test_sqlx_error_classification() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::ConnectionError(_)));

        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::ExecutionError(_)));
    }
}
