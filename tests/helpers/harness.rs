use db_descriptor::connector::PgCatalogSession;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::time::Duration;
use uuid::Uuid;

/// Throwaway database on the server named by `DATABASE_URL`.
pub struct TestDatabase {
    pool: PgPool,
    name: String,
    url: String,
    server_url: String,
}

impl TestDatabase {
    async fn create(server_url: &str) -> Self {
        let name = format!("describe_{}", Uuid::new_v4().simple());

        let admin = PgPool::connect(server_url)
            .await
            .expect("Failed to connect to DATABASE_URL");
        admin
            .execute(format!("CREATE DATABASE \"{}\"", name).as_str())
            .await
            .expect("Failed to create test database");
        admin.close().await;

        let url = match server_url.rfind('/') {
            Some(slash) => format!("{}/{}", &server_url[..slash], name),
            None => format!("{}/{}", server_url, name),
        };
        let pool = PgPool::connect(&url)
            .await
            .expect("Failed to connect to test database");

        Self {
            pool,
            name,
            url,
            server_url: server_url.to_string(),
        }
    }

    pub async fn execute(&self, sql: &str) {
        self.pool
            .execute(sql)
            .await
            .unwrap_or_else(|e| panic!("Failed to execute SQL: {}\nError: {}", sql, e));
    }

    /// Catalog session on a dedicated connection, restricted to `schemas`.
    pub async fn session(&self, schemas: &[&str]) -> PgCatalogSession {
        let conn = PgConnection::connect(&self.url)
            .await
            .expect("Failed to open session connection");
        let schemas: Vec<String> = schemas.iter().map(|s| s.to_string()).collect();
        PgCatalogSession::from_connection(conn, &schemas)
    }

    async fn drop_database(self) {
        self.pool.close().await;

        let drop = async {
            if let Ok(admin) = PgPool::connect(&self.server_url).await {
                let sql = format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", self.name);
                let _ = admin.execute(sql.as_str()).await;
                admin.close().await;
            }
        };
        let _ = tokio::time::timeout(Duration::from_secs(5), drop).await;
    }
}

/// Run `test_fn` against a fresh database that is dropped afterwards.
/// Skipped when `DATABASE_URL` is unset.
pub async fn with_test_db<F>(test_fn: F)
where
    F: std::ops::AsyncFnOnce(&TestDatabase),
{
    dotenv::dotenv().ok();
    let Ok(server_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping live PostgreSQL test");
        return;
    };

    let db = TestDatabase::create(&server_url).await;
    test_fn(&db).await;
    db.drop_database().await;
}
