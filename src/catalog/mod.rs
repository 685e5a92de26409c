//! Immutable description of a database catalog: schemas, entities, columns
//! and (optionally) foreign key relations.
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod column;
pub mod entity;
pub mod relation;
pub mod schema;

pub use column::Column;
pub use entity::{Entity, EntityType};
pub use relation::Relation;
pub use schema::Schema;

/// Root of an extracted catalog snapshot.
///
/// Built once by the assembler and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DescriptionWire")]
pub struct DatabaseDescription {
    pub(crate) schemas: Vec<Schema>,
}

/// Report layout as written to disk. Entities and columns carry no owner
/// names there, so they are filled in from the enclosing nodes.
#[derive(Deserialize)]
struct DescriptionWire {
    schemas: Vec<Schema>,
}

impl From<DescriptionWire> for DatabaseDescription {
    fn from(wire: DescriptionWire) -> Self {
        let mut schemas = wire.schemas;
        for schema in &mut schemas {
            for entity in &mut schema.entities {
                entity.schema_name.clone_from(&schema.name);
                for column in &mut entity.columns {
                    column.schema_name.clone_from(&schema.name);
                    column.entity_name.clone_from(&entity.name);
                }
            }
        }
        Self { schemas }
    }
}

impl DatabaseDescription {
    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn find_schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    pub fn find_entity(&self, schema: &str, name: &str) -> Option<&Entity> {
        self.find_schema(schema).and_then(|s| s.find_entity(name))
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.schemas.iter().flat_map(|s| s.entities.iter())
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.entities().flat_map(|e| e.columns.iter())
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.schemas.iter().flat_map(|s| s.relations.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Copy with schemas and entities ordered by name. Column order is left
    /// as extracted.
    pub fn sorted(&self) -> Self {
        let schemas = self
            .schemas
            .iter()
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .map(|schema| Schema {
                name: schema.name.clone(),
                entities: schema
                    .entities
                    .iter()
                    .sorted_by(|a, b| a.name.cmp(&b.name))
                    .cloned()
                    .collect(),
                relations: schema
                    .relations
                    .iter()
                    .sorted_by(|a, b| {
                        (&a.entity_name, &a.relation_name, &a.column_name).cmp(&(
                            &b.entity_name,
                            &b.relation_name,
                            &b.column_name,
                        ))
                    })
                    .cloned()
                    .collect(),
            })
            .collect();

        Self { schemas }
    }
}

/// Outline view: schema names, then entities indented by one tab and
/// columns by two.
impl fmt::Display for DatabaseDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for schema in &self.schemas {
            writeln!(f, "{}", schema.name)?;
            for entity in &schema.entities {
                writeln!(f, "\t{}", entity.name)?;
                for column in &entity.columns {
                    writeln!(f, "\t\t{}", column.name)?;
                }
            }
        }
        Ok(())
    }
}
