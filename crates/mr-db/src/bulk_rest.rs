//! Whole-file REST backend

use crate::error::{DbError, DbResult};
use crate::rest::{RpcClient, JSON_CONTENT_TYPE};
use crate::traits::ExecutionBackend;
use async_trait::async_trait;
use mr_core::{EndpointName, PayloadField};
use serde_json::json;

/// Sends each migration file in a single RPC call; only HTTP 200 is success
pub struct BulkRestBackend {
    client: RpcClient,
    endpoint: EndpointName,
    field: PayloadField,
    prefer_minimal: bool,
}

impl BulkRestBackend {
    pub fn new(
        client: RpcClient,
        endpoint: EndpointName,
        field: PayloadField,
        prefer_minimal: bool,
    ) -> Self {
        Self {
            client,
            endpoint,
            field,
            prefer_minimal,
        }
    }
}

#[async_trait]
impl ExecutionBackend for BulkRestBackend {
    async fn submit(&self, sql: &str) -> DbResult<String> {
        let mut payload = serde_json::Map::new();
        payload.insert(self.field.as_str().to_string(), json!(sql));
        let prefer = self.prefer_minimal.then_some("return=minimal");

        let response = self
            .client
            .post(
                &self.endpoint,
                JSON_CONTENT_TYPE,
                prefer,
                &serde_json::Value::Object(payload),
            )
            .await?;

        if response.status == 200 {
            Ok(response.body)
        } else {
            Err(DbError::HttpStatus {
                status: response.status,
                body: response.body,
            })
        }
    }

    fn backend_type(&self) -> &'static str {
        "bulk_rest"
    }
}

#[cfg(test)]
#[path = "bulk_rest_test.rs"]
mod tests;
