//! Writes a [`DatabaseDescription`] as an indented JSON document.
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::catalog::DatabaseDescription;

/// Render with four-space indentation.
pub fn to_json(description: &DatabaseDescription) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    description
        .serialize(&mut serializer)
        .context("Failed to serialize database description")?;
    String::from_utf8(buf).context("Serialized description is not valid UTF-8")
}

/// Serialize `description` and write it to `path`, replacing any existing
/// file. With `sort`, schemas and entities are written in name order.
pub fn write_description_as_json(
    description: &DatabaseDescription,
    path: &Path,
    sort: bool,
) -> Result<()> {
    let json = if sort {
        to_json(&description.sorted())?
    } else {
        to_json(description)?
    };

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file {}", path.display()))?;

    info!("Wrote database description to {}", path.display());
    Ok(())
}
