use super::*;
use crate::cli::BackendArg;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("migrun.yml"),
        "name: rls\nmigrations:\n  - file: a.sql\n    name: Enable RLS\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("a.sql"),
        "ALTER TABLE t ENABLE ROW LEVEL SECURITY;\n",
    )
    .unwrap();
    dir
}

fn global(dir: &TempDir, server: &MockServer) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: dir.path().display().to_string(),
        config: None,
        database_url: None,
        api_url: Some(server.uri()),
        service_key: Some("service-key".to_string()),
    }
}

fn bulk_args(select: Option<&str>) -> RunArgs {
    RunArgs {
        backend: Some(BackendArg::BulkRest),
        select: select.map(str::to_string),
        fail_on_missing: false,
        split: None,
        output: RunOutput::Json,
    }
}

async fn server_returning(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/exec_sql"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_failed_migration_exits_with_code_one() {
    let dir = project();
    let server = server_returning(500).await;

    let err = execute(&bulk_args(None), &global(&dir, &server))
        .await
        .unwrap_err();
    assert_eq!(err.downcast_ref::<ExitCode>().map(|code| code.0), Some(1));
}

#[tokio::test]
async fn test_successful_run_returns_ok() {
    let dir = project();
    let server = server_returning(200).await;

    execute(&bulk_args(None), &global(&dir, &server))
        .await
        .unwrap();
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_selection_is_a_setup_error() {
    let dir = project();
    let server = server_returning(200).await;

    let err = execute(&bulk_args(Some("9")), &global(&dir, &server))
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ExitCode>().is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}
