//! Entry point tying configuration, connection and extraction together.
use anyhow::Result;
use tracing::info;

use crate::catalog::DatabaseDescription;
use crate::config::Config;
use crate::connector::{DbFlavor, MySqlCatalogSession, PgCatalogSession};
use crate::extract::Extractor;
use crate::report;

/// Connect to the configured database and extract its description.
///
/// Failing to connect is fatal and returns an error before any query runs.
/// Failing queries only make the description partial.
pub async fn describe_database(config: &Config) -> Result<DatabaseDescription> {
    let settings = &config.database.connection;
    info!(
        "Describing schemas {:?} of {} database {}",
        config.schemas,
        config.database.flavor,
        settings.masked_target()
    );

    match config.database.flavor {
        DbFlavor::Postgres => {
            let session = PgCatalogSession::connect(settings, &config.schemas).await?;
            Extractor::new(session, config.extraction).extract().await
        }
        DbFlavor::MySql => {
            let session = MySqlCatalogSession::connect(settings, &config.schemas).await?;
            Extractor::new(session, config.extraction).extract().await
        }
    }
}

/// Describe the database and write the JSON report to the configured path.
pub async fn run(config: &Config) -> Result<DatabaseDescription> {
    let description = describe_database(config).await?;
    report::write_description_as_json(&description, &config.output.path, config.output.sort)?;
    Ok(description)
}
