use super::*;
use mr_core::{FailureKind, MigrationName, MigrationSpec, MigrationStatus, Secret};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer, field: PayloadField, timeout: Duration) -> BulkRestBackend {
    let client = RpcClient::new(&server.uri(), &Secret::new("service-key"), timeout).unwrap();
    BulkRestBackend::new(client, EndpointName::new("exec_sql"), field, true)
}

fn migration() -> MigrationSpec {
    MigrationSpec::new(1, "001.sql", MigrationName::new("Funções RLS Hierárquicas"))
}

#[tokio::test]
async fn test_posts_whole_file_with_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/exec_sql"))
        .and(header("apikey", "service-key"))
        .and(header("authorization", "Bearer service-key"))
        .and(header("content-type", "application/json"))
        .and(header("prefer", "return=minimal"))
        .and(body_json(serde_json::json!({ "sql": "SELECT 1; SELECT 2;" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let db = backend(&server, PayloadField::Sql, Duration::from_secs(30));
    let result = db.execute(&migration(), "SELECT 1; SELECT 2;").await;
    assert_eq!(result.status, MigrationStatus::Success);
}

#[tokio::test]
async fn test_query_payload_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/exec_sql"))
        .and(body_json(serde_json::json!({ "query": "SELECT 1" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let db = backend(&server, PayloadField::Query, Duration::from_secs(30));
    let detail = db.submit("SELECT 1").await.unwrap();
    assert_eq!(detail, "ok");
}

#[tokio::test]
async fn test_non_200_is_failure_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/exec_sql"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"message":"Could not find the function public.exec_sql"}"#),
        )
        .mount(&server)
        .await;

    let db = backend(&server, PayloadField::Sql, Duration::from_secs(30));
    let result = db.execute(&migration(), "SELECT 1").await;
    assert_eq!(result.status, MigrationStatus::Failed);
    assert_eq!(result.failure, Some(FailureKind::ExecutionError));
    assert!(result.detail.contains("HTTP 404"));
    assert!(result.detail.contains("Could not find the function"));
}

#[tokio::test]
async fn test_204_is_not_success_for_whole_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let db = backend(&server, PayloadField::Sql, Duration::from_secs(30));
    assert!(matches!(
        db.submit("SELECT 1").await,
        Err(DbError::HttpStatus { status: 204, .. })
    ));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let db = backend(&server, PayloadField::Sql, Duration::from_millis(50));
    let result = db.execute(&migration(), "SELECT 1").await;
    assert_eq!(result.failure, Some(FailureKind::TransportError));
    assert!(result.detail.contains("timed out"));
}
