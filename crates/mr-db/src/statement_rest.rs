//! Per-statement REST backend

use crate::error::{DbError, DbResult};
use crate::rest::{RpcClient, OBJECT_CONTENT_TYPE};
use crate::traits::ExecutionBackend;
use async_trait::async_trait;
use mr_core::{EndpointName, PayloadField, SplitStrategy};
use mr_sql::{split_naive, StatementSplitter};
use serde_json::json;

/// Status codes accepted for a single statement
const STATEMENT_SUCCESS: [u16; 3] = [200, 201, 204];

/// Splits each file into statements and sends them one RPC call at a time
///
/// Statements run in textual order and a failed statement does not stop the
/// ones after it. The file succeeds only when every statement does.
pub struct StatementRestBackend {
    client: RpcClient,
    endpoint: EndpointName,
    field: PayloadField,
    strategy: SplitStrategy,
    splitter: StatementSplitter,
}

impl StatementRestBackend {
    pub fn new(
        client: RpcClient,
        endpoint: EndpointName,
        field: PayloadField,
        strategy: SplitStrategy,
    ) -> Self {
        Self {
            client,
            endpoint,
            field,
            strategy,
            splitter: StatementSplitter::postgres(),
        }
    }

    /// Statements that `submit` would send, without the trailing `;`
    pub fn statements(&self, sql: &str) -> DbResult<Vec<String>> {
        match self.strategy {
            SplitStrategy::Naive => Ok(split_naive(sql)),
            SplitStrategy::Tokenizer => Ok(self.splitter.split(sql)?),
        }
    }

    async fn submit_statement(&self, statement: &str) -> DbResult<()> {
        let mut payload = serde_json::Map::new();
        payload.insert(
            self.field.as_str().to_string(),
            json!(format!("{};", statement)),
        );

        let response = self
            .client
            .post(
                &self.endpoint,
                OBJECT_CONTENT_TYPE,
                None,
                &serde_json::Value::Object(payload),
            )
            .await?;

        if STATEMENT_SUCCESS.contains(&response.status) {
            Ok(())
        } else {
            Err(DbError::HttpStatus {
                status: response.status,
                body: response.body,
            })
        }
    }
}

#[async_trait]
impl ExecutionBackend for StatementRestBackend {
    async fn submit(&self, sql: &str) -> DbResult<String> {
        let statements = self.statements(sql)?;
        let total = statements.len();
        if total == 0 {
            log::warn!("No statements found; nothing sent");
        }

        let mut succeeded = 0;
        let mut first_error = None;

        for (i, statement) in statements.iter().enumerate() {
            match self.submit_statement(statement).await {
                Ok(()) => {
                    succeeded += 1;
                    log::debug!("statement {}/{} ok", i + 1, total);
                }
                Err(e) => {
                    log::warn!("statement {}/{} failed: {}", i + 1, total, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            None => Ok(format!("{}/{} statements executed", succeeded, total)),
            Some(first_error) => Err(DbError::StatementsFailed {
                succeeded,
                total,
                first_error: Box::new(first_error),
            }),
        }
    }

    fn backend_type(&self) -> &'static str {
        "per_statement_rest"
    }
}

#[cfg(test)]
#[path = "statement_rest_test.rs"]
mod tests;
