//! Catalog query providers, one per database flavor.
//!
//! A [`DbConnector`] supplies the three catalog queries for its flavor; a
//! [`CatalogSession`] runs them over a live connection. Supporting another
//! database means adding a [`DbFlavor`] variant and a module implementing
//! both traits. The extraction pipeline does not change.
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::extract::rows::{ColumnRow, EntityRow, RelationRow};

pub mod mysql;
pub mod postgres;

pub use mysql::{MySqlCatalogSession, MySqlConnector};
pub use postgres::{PgCatalogSession, PostgresConnector};

/// Query texts for one database flavor.
///
/// Each query receives the requested schema names as bind parameters and
/// must alias its output columns to the field names of the matching row
/// type in [`crate::extract::rows`]:
///
/// - entities: `schema, entity_name, entity_type, comment`
/// - columns: `schema, entity_name, column_name, data_type, comment,
///   is_primary_key, is_foreign_key`
/// - relations: `schema, constraint_name, entity_name, column_name,
///   foreign_schema, foreign_entity_name, foreign_column_name`
///
/// The `schemas` slice only sizes the placeholder list for flavors without
/// array parameters. Its values never appear in the returned SQL.
pub trait DbConnector {
    /// Human readable flavor name, used in log output.
    fn database_type_name(&self) -> &'static str;

    fn entities_query(&self, schemas: &[String]) -> String;

    fn columns_query(&self, schemas: &[String]) -> String;

    fn relations_query(&self, schemas: &[String]) -> String;
}

/// A live connection able to run the catalog queries for a fixed set of
/// schemas.
#[allow(async_fn_in_trait)]
pub trait CatalogSession {
    fn database_type_name(&self) -> &str;

    async fn fetch_entities(&mut self) -> Result<Vec<EntityRow>>;

    async fn fetch_columns(&mut self) -> Result<Vec<ColumnRow>>;

    async fn fetch_relations(&mut self) -> Result<Vec<RelationRow>>;

    /// Release the connection. Errors while closing are logged, not returned.
    async fn close(self)
    where
        Self: Sized;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbFlavor {
    #[default]
    Postgres,
    MySql,
}

impl DbFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbFlavor::Postgres => "postgres",
            DbFlavor::MySql => "mysql",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            DbFlavor::Postgres => 5432,
            DbFlavor::MySql => 3306,
        }
    }
}

impl fmt::Display for DbFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbFlavor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbFlavor::Postgres),
            "mysql" | "mariadb" => Ok(DbFlavor::MySql),
            _ => Err(anyhow!("Database type [{}] not supported.", s)),
        }
    }
}
