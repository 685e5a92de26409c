use crate::config::defaults::PASSWORD_ENV_VARS;
use crate::config::{merge::Merge, types::*};
use crate::connector::DbFlavor;
use crate::db::connection::ConnectionSettings;
use crate::extract::ExtractOptions;
use anyhow::{Result, bail};
use std::path::PathBuf;

pub struct ConfigBuilder {
    config_input: ConfigInput,
    env: fn(&str) -> Option<String>,
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
            env: process_env,
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    /// Replace the environment lookup used for password fallbacks.
    pub fn with_env(mut self, env: fn(&str) -> Option<String>) -> Self {
        self.env = env;
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();

        Ok(Config {
            database: self.resolve_database(&defaults.database)?,
            schemas: self.resolve_schemas(&defaults.schemas)?,
            output: self.resolve_output(&defaults.output),
            extraction: self.resolve_extraction(&defaults.extraction),
        })
    }

    fn resolve_database(&self, defaults: &Database) -> Result<Database> {
        let db_input = self.config_input.database.as_ref();

        let flavor = match db_input.and_then(|d| d.flavor.as_deref()) {
            Some(raw) => raw.parse::<DbFlavor>()?,
            None => defaults.flavor,
        };

        let host = db_input
            .and_then(|d| d.host.as_ref())
            .cloned()
            .unwrap_or_else(|| defaults.connection.host.clone());
        if host.trim().is_empty() {
            bail!("Database host must not be empty");
        }

        let database = db_input
            .and_then(|d| d.name.as_ref())
            .cloned()
            .unwrap_or_else(|| defaults.connection.database.clone());
        if database.trim().is_empty() {
            bail!("Database name must not be empty");
        }

        let password = db_input
            .and_then(|d| d.password.as_ref())
            .cloned()
            .or_else(|| PASSWORD_ENV_VARS.iter().find_map(|key| (self.env)(key)))
            .unwrap_or_else(|| defaults.connection.password.clone());

        Ok(Database {
            flavor,
            connection: ConnectionSettings {
                host,
                port: db_input
                    .and_then(|d| d.port)
                    .unwrap_or_else(|| flavor.default_port()),
                user: db_input
                    .and_then(|d| d.user.as_ref())
                    .cloned()
                    .unwrap_or_else(|| defaults.connection.user.clone()),
                password,
                database,
            },
        })
    }

    fn resolve_schemas(&self, defaults: &[String]) -> Result<Vec<String>> {
        let schemas: Vec<String> = match &self.config_input.schemas {
            Some(schemas) => schemas
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.to_vec(),
        };

        if schemas.is_empty() {
            bail!("At least one schema must be given");
        }

        let mut unique = Vec::with_capacity(schemas.len());
        for schema in schemas {
            if !unique.contains(&schema) {
                unique.push(schema);
            }
        }
        Ok(unique)
    }

    fn resolve_output(&self, defaults: &Output) -> Output {
        let output_input = self.config_input.output.as_ref();

        Output {
            path: output_input
                .and_then(|o| o.path.as_ref())
                .map(PathBuf::from)
                .unwrap_or_else(|| defaults.path.clone()),
            sort: output_input
                .and_then(|o| o.sort)
                .unwrap_or(defaults.sort),
        }
    }

    fn resolve_extraction(&self, defaults: &ExtractOptions) -> ExtractOptions {
        let extraction_input = self.config_input.extraction.as_ref();

        ExtractOptions {
            relations: extraction_input
                .and_then(|e| e.relations)
                .unwrap_or(defaults.relations),
            strict: extraction_input
                .and_then(|e| e.strict)
                .unwrap_or(defaults.strict),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
