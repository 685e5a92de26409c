//! MySQL catalog queries, read from `information_schema`.
use anyhow::{Context, Result};
use sqlx::Connection;
use sqlx::mysql::{MySqlArguments, MySqlConnection};
use sqlx::query::QueryAs;
use tracing::{debug, warn};

use super::{CatalogSession, DbConnector};
use crate::db::connection::{ConnectionSettings, connect_mysql};
use crate::extract::rows::{ColumnRow, EntityRow, RelationRow};

/// `?, ?, ?` for an `IN (...)` list of `count` bound values.
fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// MySQL has no array parameters, so the `IN` list grows with the number of
/// schemas. Values are still bound, never spliced.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

impl DbConnector for MySqlConnector {
    fn database_type_name(&self) -> &'static str {
        "MySQL"
    }

    fn entities_query(&self, schemas: &[String]) -> String {
        format!(
            r#"
SELECT
    CAST(t.TABLE_SCHEMA AS CHAR) AS `schema`,
    CAST(t.TABLE_NAME AS CHAR) AS entity_name,
    CAST(t.TABLE_TYPE AS CHAR) AS entity_type,
    CAST(CASE WHEN t.TABLE_TYPE = 'VIEW' THEN '' ELSE t.TABLE_COMMENT END AS CHAR) AS comment
FROM information_schema.TABLES t
WHERE t.TABLE_SCHEMA IN ({})
ORDER BY t.TABLE_SCHEMA, t.TABLE_NAME
"#,
            placeholders(schemas.len())
        )
    }

    fn columns_query(&self, schemas: &[String]) -> String {
        format!(
            r#"
SELECT
    CAST(c.TABLE_SCHEMA AS CHAR) AS `schema`,
    CAST(c.TABLE_NAME AS CHAR) AS entity_name,
    CAST(c.COLUMN_NAME AS CHAR) AS column_name,
    CAST(c.COLUMN_TYPE AS CHAR) AS data_type,
    CAST(NULLIF(c.COLUMN_COMMENT, '') AS CHAR) AS comment,
    CAST(EXISTS (
        SELECT 1 FROM information_schema.KEY_COLUMN_USAGE k
        WHERE k.TABLE_SCHEMA = c.TABLE_SCHEMA
          AND k.TABLE_NAME = c.TABLE_NAME
          AND k.COLUMN_NAME = c.COLUMN_NAME
          AND k.CONSTRAINT_NAME = 'PRIMARY'
    ) AS SIGNED) AS is_primary_key,
    CAST(EXISTS (
        SELECT 1 FROM information_schema.KEY_COLUMN_USAGE k
        WHERE k.TABLE_SCHEMA = c.TABLE_SCHEMA
          AND k.TABLE_NAME = c.TABLE_NAME
          AND k.COLUMN_NAME = c.COLUMN_NAME
          AND k.REFERENCED_TABLE_NAME IS NOT NULL
    ) AS SIGNED) AS is_foreign_key
FROM information_schema.COLUMNS c
WHERE c.TABLE_SCHEMA IN ({})
ORDER BY c.TABLE_SCHEMA, c.TABLE_NAME, c.ORDINAL_POSITION
"#,
            placeholders(schemas.len())
        )
    }

    fn relations_query(&self, schemas: &[String]) -> String {
        format!(
            r#"
SELECT
    CAST(k.TABLE_SCHEMA AS CHAR) AS `schema`,
    CAST(k.CONSTRAINT_NAME AS CHAR) AS constraint_name,
    CAST(k.TABLE_NAME AS CHAR) AS entity_name,
    CAST(k.COLUMN_NAME AS CHAR) AS column_name,
    CAST(k.REFERENCED_TABLE_SCHEMA AS CHAR) AS foreign_schema,
    CAST(k.REFERENCED_TABLE_NAME AS CHAR) AS foreign_entity_name,
    CAST(k.REFERENCED_COLUMN_NAME AS CHAR) AS foreign_column_name
FROM information_schema.KEY_COLUMN_USAGE k
WHERE k.REFERENCED_TABLE_NAME IS NOT NULL
  AND k.TABLE_SCHEMA IN ({})
ORDER BY k.TABLE_SCHEMA, k.TABLE_NAME, k.CONSTRAINT_NAME, k.ORDINAL_POSITION
"#,
            placeholders(schemas.len())
        )
    }
}

/// MySQL reports key flags as integers.
#[derive(sqlx::FromRow)]
struct RawColumnRow {
    schema: String,
    entity_name: String,
    column_name: String,
    data_type: String,
    comment: Option<String>,
    is_primary_key: Option<i64>,
    is_foreign_key: Option<i64>,
}

impl From<RawColumnRow> for ColumnRow {
    fn from(raw: RawColumnRow) -> Self {
        ColumnRow {
            schema: raw.schema,
            entity_name: raw.entity_name,
            column_name: raw.column_name,
            data_type: raw.data_type,
            comment: raw.comment,
            is_primary_key: raw.is_primary_key.map(|v| v != 0),
            is_foreign_key: raw.is_foreign_key.map(|v| v != 0),
        }
    }
}

fn bind_schemas<'q, O>(
    mut query: QueryAs<'q, sqlx::MySql, O, MySqlArguments>,
    schemas: &[String],
) -> QueryAs<'q, sqlx::MySql, O, MySqlArguments> {
    for schema in schemas {
        query = query.bind(schema.clone());
    }
    query
}

pub struct MySqlCatalogSession {
    conn: MySqlConnection,
    connector: MySqlConnector,
    schemas: Vec<String>,
}

impl MySqlCatalogSession {
    pub async fn connect(settings: &ConnectionSettings, schemas: &[String]) -> Result<Self> {
        let conn = connect_mysql(settings).await?;
        Ok(Self {
            conn,
            connector: MySqlConnector,
            schemas: schemas.to_vec(),
        })
    }
}

impl CatalogSession for MySqlCatalogSession {
    fn database_type_name(&self) -> &str {
        self.connector.database_type_name()
    }

    async fn fetch_entities(&mut self) -> Result<Vec<EntityRow>> {
        debug!("Fetching entities for schemas {:?}", self.schemas);
        let sql = self.connector.entities_query(&self.schemas);
        bind_schemas(sqlx::query_as::<_, EntityRow>(&sql), &self.schemas)
            .fetch_all(&mut self.conn)
            .await
            .context("Failed to run entities query")
    }

    async fn fetch_columns(&mut self) -> Result<Vec<ColumnRow>> {
        debug!("Fetching columns for schemas {:?}", self.schemas);
        let sql = self.connector.columns_query(&self.schemas);
        let rows = bind_schemas(sqlx::query_as::<_, RawColumnRow>(&sql), &self.schemas)
            .fetch_all(&mut self.conn)
            .await
            .context("Failed to run columns query")?;

        Ok(rows.into_iter().map(ColumnRow::from).collect())
    }

    async fn fetch_relations(&mut self) -> Result<Vec<RelationRow>> {
        debug!("Fetching relations for schemas {:?}", self.schemas);
        let sql = self.connector.relations_query(&self.schemas);
        bind_schemas(sqlx::query_as::<_, RelationRow>(&sql), &self.schemas)
            .fetch_all(&mut self.conn)
            .await
            .context("Failed to run relations query")
    }

    async fn close(self) {
        if let Err(e) = self.conn.close().await {
            warn!("Failed to close database connection cleanly: {}", e);
        }
    }
}
