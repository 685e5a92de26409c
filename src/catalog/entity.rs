use serde::{Deserialize, Serialize};
use std::fmt;

use super::column::Column;

/// Kind of catalog entity.
///
/// Anything that is neither a table nor a view keeps the source's own
/// (lower-cased) type string, e.g. `sequence`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EntityType {
    Table,
    View,
    Other(String),
}

impl EntityType {
    pub fn as_str(&self) -> &str {
        match self {
            EntityType::Table => "table",
            EntityType::View => "view",
            EntityType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EntityType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "table" => EntityType::Table,
            "view" => EntityType::View,
            _ => EntityType::Other(value),
        }
    }
}

impl From<EntityType> for String {
    fn from(value: EntityType) -> Self {
        match value {
            EntityType::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

/// A table, view or other relation-like object, with its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(skip)]
    pub(crate) schema_name: String,
    pub(crate) name: String,
    pub(crate) entity_type: EntityType,
    pub(crate) comment: String,
    pub(crate) columns: Vec<Column>,
}

impl Entity {
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Columns in the order the column query returned them.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    pub fn key(&self) -> (&str, &str) {
        (&self.schema_name, &self.name)
    }
}
