use crate::config::types::*;
use crate::connector::DbFlavor;
use crate::db::connection::ConnectionSettings;
use crate::extract::ExtractOptions;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "db-descriptor.yaml";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_USER: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_DATABASE: &str = "test";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_OUTPUT: &str = "output.json";

/// Checked in order when no password is configured.
pub const PASSWORD_ENV_VARS: [&str; 2] = ["DB_DESCRIPTOR_PASSWORD", "PGPASSWORD"];

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Database::default(),
            schemas: vec![DEFAULT_SCHEMA.to_string()],
            output: Output::default(),
            extraction: ExtractOptions::default(),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        let flavor = DbFlavor::default();
        Self {
            flavor,
            connection: ConnectionSettings {
                host: DEFAULT_HOST.to_string(),
                port: flavor.default_port(),
                user: DEFAULT_USER.to_string(),
                password: DEFAULT_PASSWORD.to_string(),
                database: DEFAULT_DATABASE.to_string(),
            },
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            sort: false,
        }
    }
}
