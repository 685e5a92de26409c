//! PostgreSQL catalog queries, read from `information_schema` and `pg_catalog`.
use anyhow::{Context, Result};
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use tracing::{debug, warn};

use super::{CatalogSession, DbConnector};
use crate::db::connection::{ConnectionSettings, connect_postgres};
use crate::extract::rows::{ColumnRow, EntityRow, RelationRow};

const ENTITIES_QUERY: &str = r#"
SELECT
    t.table_schema::text AS schema,
    t.table_name::text AS entity_name,
    t.table_type::text AS entity_type,
    obj_description(
        to_regclass(format('%I.%I', t.table_schema, t.table_name)),
        'pg_class'
    ) AS comment
FROM information_schema.tables t
WHERE t.table_schema = ANY($1)
ORDER BY t.table_schema, t.table_name
"#;

const COLUMNS_QUERY: &str = r#"
SELECT
    ns.nspname::text AS schema,
    tbl.relname::text AS entity_name,
    col.attname::text AS column_name,
    pg_catalog.format_type(col.atttypid, col.atttypmod) AS data_type,
    col_description(tbl.oid, col.attnum) AS comment,
    EXISTS (
        SELECT 1 FROM pg_constraint con
        WHERE con.contype = 'p'
          AND con.conrelid = tbl.oid
          AND col.attnum = ANY(con.conkey)
    ) AS is_primary_key,
    EXISTS (
        SELECT 1 FROM pg_constraint con
        WHERE con.contype = 'f'
          AND con.conrelid = tbl.oid
          AND col.attnum = ANY(con.conkey)
    ) AS is_foreign_key
FROM pg_namespace ns
JOIN pg_class tbl ON tbl.relnamespace = ns.oid
JOIN pg_attribute col ON col.attrelid = tbl.oid
WHERE ns.nspname = ANY($1)
  AND tbl.relkind IN ('r', 'p', 'v', 'f')
  AND col.attnum > 0
  AND NOT col.attisdropped
ORDER BY ns.nspname, tbl.relname, col.attnum
"#;

// unnest(conkey, confkey) pairs each local column with the column it
// references; pos keeps composite keys in declaration order.
const RELATIONS_QUERY: &str = r#"
SELECT
    ns.nspname::text AS schema,
    con.conname::text AS constraint_name,
    tbl.relname::text AS entity_name,
    col.attname::text AS column_name,
    fns.nspname::text AS foreign_schema,
    ftbl.relname::text AS foreign_entity_name,
    fcol.attname::text AS foreign_column_name
FROM pg_constraint con
JOIN pg_class tbl ON tbl.oid = con.conrelid
JOIN pg_namespace ns ON ns.oid = tbl.relnamespace
JOIN pg_class ftbl ON ftbl.oid = con.confrelid
JOIN pg_namespace fns ON fns.oid = ftbl.relnamespace
CROSS JOIN LATERAL unnest(con.conkey, con.confkey) WITH ORDINALITY AS k(attnum, fattnum, pos)
JOIN pg_attribute col ON col.attrelid = con.conrelid AND col.attnum = k.attnum
JOIN pg_attribute fcol ON fcol.attrelid = con.confrelid AND fcol.attnum = k.fattnum
WHERE con.contype = 'f'
  AND ns.nspname = ANY($1)
ORDER BY ns.nspname, tbl.relname, con.conname, k.pos
"#;

/// Schema names are bound as a single `text[]` parameter, so the query text
/// does not depend on them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresConnector;

impl DbConnector for PostgresConnector {
    fn database_type_name(&self) -> &'static str {
        "Postgres"
    }

    fn entities_query(&self, _schemas: &[String]) -> String {
        ENTITIES_QUERY.to_string()
    }

    fn columns_query(&self, _schemas: &[String]) -> String {
        COLUMNS_QUERY.to_string()
    }

    fn relations_query(&self, _schemas: &[String]) -> String {
        RELATIONS_QUERY.to_string()
    }
}

pub struct PgCatalogSession {
    conn: PgConnection,
    connector: PostgresConnector,
    schemas: Vec<String>,
}

impl PgCatalogSession {
    pub async fn connect(settings: &ConnectionSettings, schemas: &[String]) -> Result<Self> {
        let conn = connect_postgres(settings).await?;
        Ok(Self::from_connection(conn, schemas))
    }

    pub fn from_connection(conn: PgConnection, schemas: &[String]) -> Self {
        Self {
            conn,
            connector: PostgresConnector,
            schemas: schemas.to_vec(),
        }
    }
}

impl CatalogSession for PgCatalogSession {
    fn database_type_name(&self) -> &str {
        self.connector.database_type_name()
    }

    async fn fetch_entities(&mut self) -> Result<Vec<EntityRow>> {
        debug!("Fetching entities for schemas {:?}", self.schemas);
        let sql = self.connector.entities_query(&self.schemas);
        sqlx::query_as::<_, EntityRow>(&sql)
            .bind(self.schemas.clone())
            .fetch_all(&mut self.conn)
            .await
            .context("Failed to run entities query")
    }

    async fn fetch_columns(&mut self) -> Result<Vec<ColumnRow>> {
        debug!("Fetching columns for schemas {:?}", self.schemas);
        let sql = self.connector.columns_query(&self.schemas);
        sqlx::query_as::<_, ColumnRow>(&sql)
            .bind(self.schemas.clone())
            .fetch_all(&mut self.conn)
            .await
            .context("Failed to run columns query")
    }

    async fn fetch_relations(&mut self) -> Result<Vec<RelationRow>> {
        debug!("Fetching relations for schemas {:?}", self.schemas);
        let sql = self.connector.relations_query(&self.schemas);
        sqlx::query_as::<_, RelationRow>(&sql)
            .bind(self.schemas.clone())
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
