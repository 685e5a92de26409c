use serde::{Deserialize, Serialize};

/// A foreign key column pair.
///
/// Both ends are referenced by name only; a relation never owns or points at
/// an [`Entity`](super::entity::Entity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub(crate) schema_name: String,
    pub(crate) entity_name: String,
    pub(crate) relation_name: String,
    pub(crate) column_name: String,
    pub(crate) foreign_entity_schema: String,
    pub(crate) foreign_entity_name: String,
    pub(crate) foreign_column_name: String,
}

impl Relation {
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Constraint name.
    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn foreign_entity_schema(&self) -> &str {
        &self.foreign_entity_schema
    }

    pub fn foreign_entity_name(&self) -> &str {
        &self.foreign_entity_name
    }

    pub fn foreign_column_name(&self) -> &str {
        &self.foreign_column_name
    }

    pub fn entity_key(&self) -> (&str, &str) {
        (&self.schema_name, &self.entity_name)
    }

    pub fn foreign_entity_key(&self) -> (&str, &str) {
        (&self.foreign_entity_schema, &self.foreign_entity_name)
    }
}
