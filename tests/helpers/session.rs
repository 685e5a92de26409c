use anyhow::{Result, anyhow};
use db_descriptor::connector::CatalogSession;
use db_descriptor::extract::rows::{ColumnRow, EntityRow, RelationRow};
use std::sync::{Arc, Mutex};

/// In-memory catalog session that replays canned rows and records every
/// call, so tests can check query order and that the session was closed.
pub struct FakeSession {
    entities: Result<Vec<EntityRow>, String>,
    columns: Result<Vec<ColumnRow>, String>,
    relations: Result<Vec<RelationRow>, String>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self {
            entities: Ok(vec![]),
            columns: Ok(vec![]),
            relations: Ok(vec![]),
            calls: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn with_entities(mut self, rows: Vec<EntityRow>) -> Self {
        self.entities = Ok(rows);
        self
    }

    pub fn with_columns(mut self, rows: Vec<ColumnRow>) -> Self {
        self.columns = Ok(rows);
        self
    }

    pub fn with_relations(mut self, rows: Vec<RelationRow>) -> Self {
        self.relations = Ok(rows);
        self
    }

    pub fn failing_entities(mut self, message: &str) -> Self {
        self.entities = Err(message.to_string());
        self
    }

    pub fn failing_columns(mut self, message: &str) -> Self {
        self.columns = Err(message.to_string());
        self
    }

    pub fn failing_relations(mut self, message: &str) -> Self {
        self.relations = Err(message.to_string());
        self
    }

    /// Shared handle to the call log; stays readable after the session is consumed.
    pub fn calls(&self) -> Arc<Mutex<Vec<&'static str>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CatalogSession for FakeSession {
    fn database_type_name(&self) -> &str {
        "Fake"
    }

    async fn fetch_entities(&mut self) -> Result<Vec<EntityRow>> {
        self.record("entities");
        self.entities.clone().map_err(|e| anyhow!(e))
    }

    async fn fetch_columns(&mut self) -> Result<Vec<ColumnRow>> {
        self.record("columns");
        self.columns.clone().map_err(|e| anyhow!(e))
    }

    async fn fetch_relations(&mut self) -> Result<Vec<RelationRow>> {
        self.record("relations");
        self.relations.clone().map_err(|e| anyhow!(e))
    }

    async fn close(self) {
        self.record("close");
    }
}
