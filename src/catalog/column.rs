use serde::{Deserialize, Serialize};

/// A column of a table or view.
///
/// `schema_name` and `entity_name` identify the owning entity while the
/// description is being assembled. They are not serialized: once attached, a
/// column is reached through its entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(skip)]
    pub(crate) schema_name: String,
    #[serde(skip)]
    pub(crate) entity_name: String,
    pub(crate) name: String,
    pub(crate) data_type: String,
    pub(crate) comment: String,
    pub(crate) is_primary_key: bool,
    pub(crate) is_foreign_key: bool,
}

impl Column {
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type as reported by the source database, e.g. `character varying(255)`.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    pub fn is_foreign_key(&self) -> bool {
        self.is_foreign_key
    }

    /// Key of the entity this column belongs to.
    pub fn entity_key(&self) -> (&str, &str) {
        (&self.schema_name, &self.entity_name)
    }
}
