//! Direct Postgres backend

use crate::error::{DbError, DbResult};
use crate::traits::ExecutionBackend;
use async_trait::async_trait;
use mr_core::{redact_connection_string, Secret};
use sqlx::{Connection, Executor, PgConnection};
use tokio::sync::Mutex;

/// Connection lifecycle for one run
enum ConnState {
    /// Not dialed yet
    Idle,
    Open(PgConnection),
    /// The single connect attempt failed; the message is replayed
    Failed(String),
    Closed,
}

/// Runs each migration file as one batch over a single Postgres connection
///
/// Files are sent through the simple query protocol, so a file may contain
/// any number of statements, including DDL and dollar-quoted function bodies.
/// No explicit transaction is opened around a file.
///
/// The connection is dialed once, on the first submitted migration. If that
/// attempt fails, every migration of the run fails with the same connection
/// error without dialing again.
pub struct PostgresBackend {
    url: Secret,
    state: Mutex<ConnState>,
}

impl PostgresBackend {
    /// Create a backend; the connection is opened on first use
    pub fn new(url: Secret) -> Self {
        Self {
            url,
            state: Mutex::new(ConnState::Idle),
        }
    }

    /// Connection string with the password masked
    pub fn redacted_url(&self) -> String {
        redact_connection_string(self.url.expose())
    }

    /// Whether a connection is currently held
    pub async fn is_connected(&self) -> bool {
        matches!(*self.state.lock().await, ConnState::Open(_))
    }
}

async fn open(url: &Secret) -> Result<PgConnection, sqlx::Error> {
    log::debug!("Connecting to {}", redact_connection_string(url.expose()));
    PgConnection::connect(url.expose()).await
}

#[async_trait]
impl ExecutionBackend for PostgresBackend {
    async fn submit(&self, sql: &str) -> DbResult<String> {
        let mut state = self.state.lock().await;
        if matches!(*state, ConnState::Idle) {
            match open(&self.url).await {
                Ok(conn) => *state = ConnState::Open(conn),
                Err(e) => {
                    log::warn!("Connection to {} failed: {}", self.redacted_url(), e);
                    *state = ConnState::Failed(e.to_string());
                    return Err(DbError::ConnectionError(e.to_string()));
                }
            }
        }

        let conn = match &mut *state {
            ConnState::Open(conn) => conn,
            ConnState::Failed(message) => {
                return Err(DbError::ConnectionError(format!(
                    "not retried after earlier failure: {}",
                    message
                )))
            }
            ConnState::Closed => {
                return Err(DbError::ConnectionError("connection already closed".to_string()))
            }
            ConnState::Idle => {
                return Err(DbError::ConnectionError("connection unavailable".to_string()))
            }
        };

        let result = Executor::execute(&mut *conn, sqlx::raw_sql(sql)).await?;
        Ok(format!("{} rows affected", result.rows_affected()))
    }

    async fn close(&self) -> DbResult<()> {
        let previous = std::mem::replace(&mut *self.state.lock().await, ConnState::Closed);
        match previous {
            ConnState::Open(conn) => conn
                .close()
                .await
                .map_err(|e| DbError::ConnectionError(e.to_string())),
            _ => Ok(()),
        }
    }

    fn backend_type(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
