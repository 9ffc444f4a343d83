//! Strongly-typed names used in migration manifests and REST configuration

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Human-readable migration name shown in progress output
    pub struct MigrationName;
}

define_newtype_string! {
    /// Name of an RPC function exposed under `/rest/v1/rpc/`
    pub struct EndpointName;
}

#[cfg(test)]
#[path = "migration_name_test.rs"]
mod tests;
