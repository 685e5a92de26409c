//! Turns raw catalog rows into model records.
//!
//! Identifiers are lower-cased here so every later key comparison is plain
//! equality. Nothing in this module performs I/O.
use super::rows::{ColumnRow, EntityRow, RelationRow};
use crate::catalog::{Column, Entity, EntityType, Relation};

/// Classify a raw catalog type string (`BASE TABLE`, `VIEW`, `FOREIGN TABLE`, ...).
///
/// `view` wins over `table` when a string contains both.
pub fn classify_entity_type(raw: &str) -> EntityType {
    let lowered = raw.to_lowercase();
    if lowered.contains("view") {
        EntityType::View
    } else if lowered.contains("table") {
        EntityType::Table
    } else {
        EntityType::Other(lowered)
    }
}

pub fn normalize_entity(row: &EntityRow) -> Entity {
    Entity {
        schema_name: row.schema.to_lowercase(),
        name: row.entity_name.to_lowercase(),
        entity_type: classify_entity_type(&row.entity_type),
        comment: row.comment.clone().unwrap_or_default(),
        columns: Vec::new(),
    }
}

pub fn normalize_column(row: &ColumnRow) -> Column {
    Column {
        schema_name: row.schema.to_lowercase(),
        entity_name: row.entity_name.to_lowercase(),
        name: row.column_name.to_lowercase(),
        data_type: row.data_type.clone(),
        comment: row.comment.clone().unwrap_or_default(),
        is_primary_key: row.is_primary_key.unwrap_or(false),
        is_foreign_key: row.is_foreign_key.unwrap_or(false),
    }
}

pub fn normalize_relation(row: &RelationRow) -> Relation {
    Relation {
        schema_name: row.schema.to_lowercase(),
        entity_name: row.entity_name.to_lowercase(),
        relation_name: row.constraint_name.to_lowercase(),
        column_name: row.column_name.to_lowercase(),
        foreign_entity_schema: row.foreign_schema.to_lowercase(),
        foreign_entity_name: row.foreign_entity_name.to_lowercase(),
        foreign_column_name: row.foreign_column_name.to_lowercase(),
    }
}
