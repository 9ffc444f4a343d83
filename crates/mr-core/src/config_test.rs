use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let config = Config::from_yaml("name: rls").unwrap();
    assert_eq!(config.name, "rls");
    assert_eq!(config.backend, BackendKind::PerStatementRest);
    assert_eq!(config.split, SplitStrategy::Tokenizer);
    assert!(!config.fail_on_missing);
    assert_eq!(config.migrations.len(), 5);
    assert_eq!(config.rest.endpoint, "exec_sql");
    assert_eq!(config.rest.statement_endpoint, "exec");
    assert_eq!(config.rest.timeout_secs, 30);
    assert!(config.rest.prefer_minimal);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: rls_policies
backend: bulk_rest
split: naive
fail_on_missing: true
migrations:
  - file: sql/001_functions.sql
    name: Functions
  - file: sql/002_policies.sql
    name: Policies
rest:
  endpoint: query
  payload_field: query
  timeout_secs: 10
  prefer_minimal: false
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.backend, BackendKind::BulkRest);
    assert_eq!(config.split, SplitStrategy::Naive);
    assert!(config.fail_on_missing);
    assert_eq!(config.migrations.len(), 2);
    assert_eq!(config.rest.endpoint, "query");
    assert_eq!(config.rest.payload_field, PayloadField::Query);
    assert_eq!(config.rest.payload_field.as_str(), "query");
    assert_eq!(config.rest.timeout_secs, 10);
    assert!(!config.rest.prefer_minimal);
}

#[test]
fn test_unknown_field_rejected() {
    let err = Config::from_yaml("name: x\nconnection_string: postgres://a:b@c/d").unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}

#[test]
fn test_empty_migrations_rejected() {
    let err = Config::from_yaml("name: x\nmigrations: []").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_zero_timeout_rejected() {
    let err = Config::from_yaml("name: x\nrest:\n  timeout_secs: 0").unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));
}

#[test]
fn test_duplicate_sequence_rejected() {
    let yaml = r#"
name: x
migrations:
  - file: a.sql
    name: A
    sequence: 2
  - file: b.sql
    name: B
"#;
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("Duplicate migration sequence number 2"));
}

#[test]
fn test_blank_migration_name_rejected() {
    let yaml = r#"
name: x
migrations:
  - file: a.sql
    name: "  "
"#;
    assert!(Config::from_yaml(yaml).is_err());
}

#[test]
fn test_migration_specs_resolve_paths_and_sequences() {
    let yaml = r#"
name: x
migrations:
  - file: a.sql
    name: A
  - file: b.sql
    name: B
    sequence: 10
"#;
    let config = Config::from_yaml(yaml).unwrap();
    let root = PathBuf::from("/project");
    let specs = config.migration_specs(&root);

    assert_eq!(specs[0].sequence, 1);
    assert_eq!(specs[0].path, root.join("a.sql"));
    assert_eq!(specs[1].sequence, 10);
    assert_eq!(specs[1].name, "B");
}

#[test]
fn test_default_migration_list_order() {
    let specs = Config::default().migration_specs(Path::new("."));
    let files: Vec<String> = specs
        .iter()
        .map(|m| m.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        files,
        vec![
            "1757700000_create_rls_hierarchy_functions.sql",
            "1757700001_fix_investments_rls_policies.sql",
            "1757700002_fix_commissions_rls_policies.sql",
            "1757700003_fix_remuneracoes_rls_policies.sql",
            "1757700004_fix_debentures_series_rls_policies.sql",
        ]
    );
    assert_eq!(specs[4].to_string(), "5. Políticas RLS - Debêntures/Séries");
}

#[test]
fn test_load_from_dir_without_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "migrun");
    assert_eq!(config.migrations.len(), 5);
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("migrun.yml"), "name: from_yml").unwrap();
    std::fs::write(dir.path().join("migrun.yaml"), "name: from_yaml").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "from_yml");
}

#[test]
fn test_load_missing_file() {
    let err = Config::load(Path::new("/nonexistent/migrun.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_backend_display() {
    assert_eq!(BackendKind::Direct.to_string(), "direct");
    assert_eq!(BackendKind::BulkRest.to_string(), "bulk_rest");
    assert_eq!(SplitStrategy::Naive.to_string(), "naive");
}

#[test]
fn test_endpoint_must_be_identifier() {
    for bad in ["exec/../x", "exec sql", "1exec", "exec?x=1"] {
        let yaml = format!("name: rls\nrest:\n  endpoint: '{}'\n", bad);
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(
            matches!(err, CoreError::ConfigInvalid { ref message } if message.contains("rest.endpoint")),
            "accepted {:?}",
            bad
        );
    }

    let err = Config::from_yaml("name: rls\nrest:\n  statement_endpoint: a/b\n").unwrap_err();
    assert!(err.to_string().contains("rest.statement_endpoint"));

    let config = Config::from_yaml("name: rls\nrest:\n  endpoint: _exec_sql2\n").unwrap();
    assert_eq!(config.rest.endpoint, "_exec_sql2");
}
