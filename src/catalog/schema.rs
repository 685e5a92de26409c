use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityType};
use super::relation::Relation;

/// A namespace and the entities described in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub(crate) name: String,
    pub(crate) entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) relations: Vec<Relation>,
}

impl Schema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Foreign keys owned by entities of this schema. Empty unless relation
    /// extraction was enabled.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn find_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Entities of the given kind, compared case-insensitively.
    pub fn entities_by_type(&self, entity_type: &EntityType) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| {
                e.entity_type
                    .as_str()
                    .eq_ignore_ascii_case(entity_type.as_str())
            })
            .collect()
    }

    /// Relations whose owning column lives in `entity_name`.
    pub fn relations_of<'a>(&'a self, entity_name: &'a str) -> impl Iterator<Item = &'a Relation> {
        self.relations
            .iter()
            .filter(move |r| r.entity_name == entity_name)
    }
}
