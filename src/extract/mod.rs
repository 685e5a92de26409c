//! Extraction pipeline: run the catalog queries, normalize rows and
//! assemble the description.
use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::catalog::DatabaseDescription;
use crate::connector::CatalogSession;

pub mod assembler;
pub mod normalize;
pub mod rows;

use assembler::{Attachment, DescriptionAssembler};
use normalize::{normalize_column, normalize_entity, normalize_relation};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Also run the relations (foreign key) query.
    pub relations: bool,
    /// Fail on columns or relations that reference an unknown entity instead
    /// of dropping them.
    pub strict: bool,
}

/// Runs the three catalog queries over one session, in order, and folds the
/// results into a [`DatabaseDescription`].
///
/// A failing query is logged and its rows are skipped, so the result may be
/// partial. The session is closed before `extract` returns, whatever the
/// outcome.
pub struct Extractor<S: CatalogSession> {
    session: S,
    options: ExtractOptions,
}

impl<S: CatalogSession> Extractor<S> {
    pub fn new(session: S, options: ExtractOptions) -> Self {
        Self { session, options }
    }

    pub async fn extract(self) -> Result<DatabaseDescription> {
        let Self {
            mut session,
            options,
        } = self;

        info!(
            "Init database description extraction. Database type: {}",
            session.database_type_name()
        );

        let result = assemble(&mut session, options).await;
        session.close().await;
        result
    }
}

async fn assemble<S: CatalogSession>(
    session: &mut S,
    options: ExtractOptions,
) -> Result<DatabaseDescription> {
    let mut assembler = DescriptionAssembler::new();

    match session.fetch_entities().await {
        Ok(rows) => {
            info!("Fetched {} entities", rows.len());
            for row in &rows {
                assembler.add_entity(normalize_entity(row));
            }
        }
        Err(e) => warn!("Skipping entities: {:#}", e),
    }

    match session.fetch_columns().await {
        Ok(rows) => {
            info!("Fetched {} columns", rows.len());
            for row in &rows {
                let column = normalize_column(row);
                let label = format!(
                    "{}.{}.{}",
                    column.schema_name(),
                    column.entity_name(),
                    column.name()
                );
                if assembler.add_column(column) == Attachment::Dropped {
                    if options.strict {
                        bail!("Column {} references an entity that was not found", label);
                    }
                    debug!("Dropping column {}: entity not found", label);
                }
            }
        }
        Err(e) => warn!("Skipping columns: {:#}", e),
    }

    if options.relations {
        match session.fetch_relations().await {
            Ok(rows) => {
                info!("Fetched {} relation columns", rows.len());
                for row in &rows {
                    let relation = normalize_relation(row);
                    let label = format!(
                        "{}.{} ({}.{} -> {}.{})",
                        relation.schema_name(),
                        relation.relation_name(),
                        relation.entity_name(),
                        relation.column_name(),
                        relation.foreign_entity_schema(),
                        relation.foreign_entity_name()
                    );
                    if assembler.add_relation(relation) == Attachment::Dropped {
                        if options.strict {
                            bail!("Relation {} references an entity that was not found", label);
                        }
                        debug!("Dropping relation {}: entity not found", label);
                    }
                }
            }
            Err(e) => warn!("Skipping relations: {:#}", e),
        }
    }

    let stats = assembler.stats();
    if stats.replaced_entities > 0 {
        warn!(
            "{} entity rows repeated an existing key and replaced it",
            stats.replaced_entities
        );
    }
    if stats.dropped_columns > 0 {
        warn!(
            "Dropped {} columns whose entity was not found",
            stats.dropped_columns
        );
    }
    if stats.dropped_relations > 0 {
        warn!(
            "Dropped {} relation columns whose entities were not found",
            stats.dropped_relations
        );
    }
    info!(
        "Assembled {} entities, {} columns, {} relation columns",
        stats.entities, stats.columns, stats.relations
    );

    Ok(assembler.finish())
}
