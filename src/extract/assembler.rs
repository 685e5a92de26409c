//! Folds normalized entities, columns and relations into a
//! [`DatabaseDescription`].
//!
//! Entities live in an arena indexed by `schema -> name -> slot`, so columns
//! and relations are matched to their owner by key only. Feed entities
//! first: a column or relation whose entity is not known yet is dropped.
use std::collections::HashMap;

use crate::catalog::{Column, DatabaseDescription, Entity, Relation, Schema};

/// Outcome of offering a column or relation to the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Attached,
    /// No entity with the referenced key has been added.
    Dropped,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyStats {
    pub entities: usize,
    pub replaced_entities: usize,
    pub columns: usize,
    pub dropped_columns: usize,
    pub relations: usize,
    pub dropped_relations: usize,
}

#[derive(Debug)]
struct SchemaSlot {
    name: String,
    entity_slots: Vec<usize>,
}

/// Single-use accumulator. [`finish`](Self::finish) consumes it.
#[derive(Debug, Default)]
pub struct DescriptionAssembler {
    arena: Vec<Entity>,
    index: HashMap<String, HashMap<String, usize>>,
    schemas: Vec<SchemaSlot>,
    schema_index: HashMap<String, usize>,
    relations: Vec<Relation>,
    stats: AssemblyStats,
}

impl DescriptionAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, replacing any earlier entity with the same key.
    pub fn add_entity(&mut self, entity: Entity) {
        let existing = self
            .index
            .get(&entity.schema_name)
            .and_then(|entities| entities.get(&entity.name))
            .copied();

        if let Some(slot) = existing {
            self.arena[slot] = entity;
            self.stats.replaced_entities += 1;
            return;
        }

        let slot = self.arena.len();
        let schema_pos = match self.schema_index.get(&entity.schema_name) {
            Some(&pos) => pos,
            None => {
                let pos = self.schemas.len();
                self.schemas.push(SchemaSlot {
                    name: entity.schema_name.clone(),
                    entity_slots: Vec::new(),
                });
                self.schema_index.insert(entity.schema_name.clone(), pos);
                pos
            }
        };
        self.schemas[schema_pos].entity_slots.push(slot);
        self.index
            .entry(entity.schema_name.clone())
            .or_default()
            .insert(entity.name.clone(), slot);
        self.arena.push(entity);
        self.stats.entities += 1;
    }

    /// Append a column to its owning entity, or drop it if the entity is unknown.
    pub fn add_column(&mut self, column: Column) -> Attachment {
        match self.slot_of(&column.schema_name, &column.entity_name) {
            Some(slot) => {
                self.arena[slot].columns.push(column);
                self.stats.columns += 1;
                Attachment::Attached
            }
            None => {
                self.stats.dropped_columns += 1;
                Attachment::Dropped
            }
        }
    }

    /// Keep a relation when both its owning and referenced entities are known.
    pub fn add_relation(&mut self, relation: Relation) -> Attachment {
        let owner = self.slot_of(&relation.schema_name, &relation.entity_name);
        let target = self.slot_of(
            &relation.foreign_entity_schema,
            &relation.foreign_entity_name,
        );

        if owner.is_some() && target.is_some() {
            self.relations.push(relation);
            self.stats.relations += 1;
            Attachment::Attached
        } else {
            self.stats.dropped_relations += 1;
            Attachment::Dropped
        }
    }

    pub fn stats(&self) -> AssemblyStats {
        self.stats
    }

    pub fn finish(self) -> DatabaseDescription {
        let mut arena: Vec<Option<Entity>> = self.arena.into_iter().map(Some).collect();
        let mut schemas: Vec<Schema> = self
            .schemas
            .into_iter()
            .map(|slot| Schema {
                name: slot.name,
                entities: slot
                    .entity_slots
                    .iter()
                    .filter_map(|&i| arena[i].take())
                    .collect(),
                relations: Vec::new(),
            })
            .collect();

        for relation in self.relations {
            if let Some(&pos) = self.schema_index.get(&relation.schema_name) {
                schemas[pos].relations.push(relation);
            }
        }

        DatabaseDescription { schemas }
    }

    fn slot_of(&self, schema: &str, name: &str) -> Option<usize> {
        self.index
            .get(schema)
            .and_then(|entities| entities.get(name))
            .copied()
    }
}
