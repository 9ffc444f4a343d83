//! Configuration types and parsing for migrun.yml

use crate::error::{CoreError, CoreResult};
use crate::migration::MigrationSpec;
use crate::migration_name::{EndpointName, MigrationName};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Main project configuration from migrun.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    #[serde(default = "default_name")]
    pub name: String,

    /// Transport used to deliver SQL to the database
    #[serde(default)]
    pub backend: BackendKind,

    /// Statement splitter for the per-statement backend
    #[serde(default)]
    pub split: SplitStrategy,

    /// Count missing migration files as failures instead of skipping them
    #[serde(default)]
    pub fail_on_missing: bool,

    /// Migrations in execution order
    #[serde(default = "default_migrations")]
    pub migrations: Vec<MigrationEntry>,

    /// REST/RPC settings for the REST backends
    #[serde(default)]
    pub rest: RestConfig,
}

/// A migration entry in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationEntry {
    /// SQL file path, relative to the project directory
    pub file: String,

    /// Human-readable name
    pub name: MigrationName,

    /// Explicit sequence number (defaults to the 1-based list position)
    #[serde(default)]
    pub sequence: Option<u32>,
}

impl MigrationEntry {
    fn new(file: &str, name: &str) -> Self {
        Self {
            file: file.to_string(),
            name: MigrationName::new(name),
            sequence: None,
        }
    }
}

/// Execution backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Direct Postgres connection, whole file per call
    Direct,
    /// One RPC call per file
    BulkRest,
    /// One RPC call per statement
    #[default]
    PerStatementRest,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Direct => write!(f, "direct"),
            BackendKind::BulkRest => write!(f, "bulk_rest"),
            BackendKind::PerStatementRest => write!(f, "per_statement_rest"),
        }
    }
}

/// Statement splitter used by the per-statement backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Postgres tokenizer: respects literals, comments and dollar quoting
    #[default]
    Tokenizer,
    /// Split on every `;`
    Naive,
}

impl std::fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitStrategy::Tokenizer => write!(f, "tokenizer"),
            SplitStrategy::Naive => write!(f, "naive"),
        }
    }
}

/// JSON field carrying the SQL text in RPC payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayloadField {
    /// `{ "sql": ... }`
    #[default]
    Sql,
    /// `{ "query": ... }`
    Query,
}

impl PayloadField {
    /// JSON key name
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadField::Sql => "sql",
            PayloadField::Query => "query",
        }
    }
}

/// REST/RPC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestConfig {
    /// RPC function receiving whole files
    #[serde(default = "default_endpoint")]
    pub endpoint: EndpointName,

    /// RPC function receiving single statements
    #[serde(default = "default_statement_endpoint")]
    pub statement_endpoint: EndpointName,

    /// JSON field carrying the SQL
    #[serde(default)]
    pub payload_field: PayloadField,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Send `Prefer: return=minimal` on whole-file calls
    #[serde(default = "default_true")]
    pub prefer_minimal: bool,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            statement_endpoint: default_statement_endpoint(),
            payload_field: PayloadField::default(),
            timeout_secs: default_timeout_secs(),
            prefer_minimal: true,
        }
    }
}

fn default_name() -> String {
    "migrun".to_string()
}

fn default_endpoint() -> EndpointName {
    EndpointName::new("exec_sql")
}

fn default_statement_endpoint() -> EndpointName {
    EndpointName::new("exec")
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

/// The RLS hierarchy migrations applied when no manifest is configured
fn default_migrations() -> Vec<MigrationEntry> {
    vec![
        MigrationEntry::new(
            "supabase/migrations/1757700000_create_rls_hierarchy_functions.sql",
            "Funções RLS Hierárquicas",
        ),
        MigrationEntry::new(
            "supabase/migrations/1757700001_fix_investments_rls_policies.sql",
            "Políticas RLS - Investimentos",
        ),
        MigrationEntry::new(
            "supabase/migrations/1757700002_fix_commissions_rls_policies.sql",
            "Políticas RLS - Comissões",
        ),
        MigrationEntry::new(
            "supabase/migrations/1757700003_fix_remuneracoes_rls_policies.sql",
            "Políticas RLS - Remunerações",
        ),
        MigrationEntry::new(
            "supabase/migrations/1757700004_fix_debentures_series_rls_policies.sql",
            "Políticas RLS - Debêntures/Séries",
        ),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            backend: BackendKind::default(),
            split: SplitStrategy::default(),
            fail_on_missing: false,
            migrations: default_migrations(),
            rest: RestConfig::default(),
        }
    }
}

const CONFIG_FILE_NAMES: [&str; 2] = ["migrun.yml", "migrun.yaml"];

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    ///
    /// Looks for migrun.yml or migrun.yaml and falls back to the built-in
    /// defaults when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
        {
            Some(path) => Self::load(&path),
            None => {
                log::debug!(
                    "No config file in {}, using built-in migration list",
                    dir.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.migrations.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one migration must be listed under 'migrations'".to_string(),
            });
        }

        if self.rest.timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "rest.timeout_secs must be greater than zero".to_string(),
            });
        }

        for (key, endpoint) in [
            ("rest.endpoint", &self.rest.endpoint),
            ("rest.statement_endpoint", &self.rest.statement_endpoint),
        ] {
            if !is_identifier(endpoint) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "{} '{}' must be a function name (letters, digits, '_')",
                        key, endpoint
                    ),
                });
            }
        }

        let mut seen = HashSet::new();
        for (index, entry) in self.migrations.iter().enumerate() {
            if entry.file.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("Migration '{}' has an empty file path", entry.name),
                });
            }
            let sequence = entry_sequence(index, entry);
            if sequence == 0 {
                return Err(CoreError::ConfigInvalid {
                    message: format!("Migration '{}' has sequence 0; numbers start at 1", entry.name),
                });
            }
            if !seen.insert(sequence) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("Duplicate migration sequence number {}", sequence),
                });
            }
        }

        Ok(())
    }

    /// Build migration specs with file paths resolved against `root`
    pub fn migration_specs(&self, root: &Path) -> Vec<MigrationSpec> {
        self.migrations
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                MigrationSpec::new(
                    entry_sequence(index, entry),
                    root.join(&entry.file),
                    entry.name.clone(),
                )
            })
            .collect()
    }
}

/// RPC names are spliced into the URL path, so only plain identifiers pass
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn entry_sequence(index: usize, entry: &MigrationEntry) -> u32 {
    entry.sequence.unwrap_or(index as u32 + 1)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
