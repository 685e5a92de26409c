//! Raw rows as returned by the catalog queries, before normalization.
//!
//! Field order follows the column order each query must select. Catalog
//! queries alias their output columns to these field names.

/// `(schema, entity_name, entity_type_raw, comment)`
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EntityRow {
    pub schema: String,
    pub entity_name: String,
    pub entity_type: String,
    pub comment: Option<String>,
}

/// `(schema, entity_name, column_name, data_type, comment, is_primary_key, is_foreign_key)`
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ColumnRow {
    pub schema: String,
    pub entity_name: String,
    pub column_name: String,
    pub data_type: String,
    pub comment: Option<String>,
    pub is_primary_key: Option<bool>,
    pub is_foreign_key: Option<bool>,
}

/// `(schema, constraint_name, entity_name, column_name, foreign_schema, foreign_entity_name, foreign_column_name)`
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RelationRow {
    pub schema: String,
    pub constraint_name: String,
    pub entity_name: String,
    pub column_name: String,
    pub foreign_schema: String,
    pub foreign_entity_name: String,
    pub foreign_column_name: String,
}

impl EntityRow {
    pub fn new(schema: &str, entity_name: &str, entity_type: &str, comment: Option<&str>) -> Self {
        Self {
            schema: schema.to_string(),
            entity_name: entity_name.to_string(),
            entity_type: entity_type.to_string(),
            comment: comment.map(str::to_string),
        }
    }
}

impl ColumnRow {
    pub fn new(
        schema: &str,
        entity_name: &str,
        column_name: &str,
        data_type: &str,
        comment: Option<&str>,
        is_primary_key: Option<bool>,
        is_foreign_key: Option<bool>,
    ) -> Self {
        Self {
            schema: schema.to_string(),
            entity_name: entity_name.to_string(),
            column_name: column_name.to_string(),
            data_type: data_type.to_string(),
            comment: comment.map(str::to_string),
            is_primary_key,
            is_foreign_key,
        }
    }
}

impl RelationRow {
    pub fn new(
        schema: &str,
        constraint_name: &str,
        entity_name: &str,
        column_name: &str,
        foreign_schema: &str,
        foreign_entity_name: &str,
        foreign_column_name: &str,
    ) -> Self {
        Self {
            schema: schema.to_string(),
            constraint_name: constraint_name.to_string(),
            entity_name: entity_name.to_string(),
            column_name: column_name.to_string(),
            foreign_schema: foreign_schema.to_string(),
            foreign_entity_name: foreign_entity_name.to_string(),
            foreign_column_name: foreign_column_name.to_string(),
        }
    }
}
