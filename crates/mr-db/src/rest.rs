//! Authenticated client for the REST service's RPC endpoints

use crate::error::{DbError, DbResult};
use mr_core::{EndpointName, Secret};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// Content type for whole-file RPC calls
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type for single-statement RPC calls
pub const OBJECT_CONTENT_TYPE: &str = "application/vnd.pgrst.object+json";

/// Status code and body of an RPC response
#[derive(Debug, Clone)]
pub struct RpcResponse {
    pub status: u16,
    pub body: String,
}

/// Posts JSON payloads to `{base_url}/rest/v1/rpc/{endpoint}`
///
/// Every request carries the service key as both the `apikey` header and a
/// bearer token, and is bounded by a fixed timeout.
pub struct RpcClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RpcClient {
    /// Build a client for `base_url` authenticated with `service_key`
    pub fn new(base_url: &str, service_key: &Secret, timeout: Duration) -> DbResult<Self> {
        let mut headers = HeaderMap::new();
        let mut apikey = HeaderValue::from_str(service_key.expose())
            .map_err(|_| DbError::Config("service key is not a valid header value".to_string()))?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", service_key.expose()))
            .map_err(|_| DbError::Config("service key is not a valid header value".to_string()))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| DbError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Full URL of an RPC endpoint
    pub fn rpc_url(&self, endpoint: &EndpointName) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, endpoint)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST a JSON payload. Any HTTP status is returned as a response;
    /// only network failures and timeouts are errors.
    pub async fn post(
        &self,
        endpoint: &EndpointName,
        content_type: &'static str,
        prefer: Option<&'static str>,
        payload: &serde_json::Value,
    ) -> DbResult<RpcResponse> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| DbError::Config(format!("failed to encode payload: {}", e)))?;

        let mut request = self
            .client
            .post(self.rpc_url(endpoint))
            .header(CONTENT_TYPE, content_type)
            .body(body);
        if let Some(prefer) = prefer {
            request = request.header("Prefer", prefer);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("POST rpc/{} -> {}", endpoint, status);

        Ok(RpcResponse { status, body })
    }
}
