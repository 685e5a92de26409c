use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::connector::DbFlavor;
use crate::db::connection::ConnectionSettings;
use crate::extract::ExtractOptions;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub database: Option<DatabaseInput>,
    pub schemas: Option<Vec<String>>,
    pub output: Option<OutputInput>,
    pub extraction: Option<ExtractionInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone)]
pub struct Config {
    pub database: Database,
    pub schemas: Vec<String>,
    pub output: Output,
    pub extraction: ExtractOptions,
}

// Database configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseInput {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    /// Flavor identifier, e.g. `postgres` or `mysql`
    pub flavor: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub flavor: DbFlavor,
    pub connection: ConnectionSettings,
}

// Output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputInput {
    pub path: Option<String>,
    pub sort: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Output {
    pub path: PathBuf,
    /// Order schemas and entities by name before writing
    pub sort: bool,
}

// Extraction configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExtractionInput {
    pub relations: Option<bool>,
    pub strict: Option<bool>,
}

// CLI argument groups
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    #[arg(long, short = 'H', help = "Database host")]
    pub host: Option<String>,

    #[arg(long, short = 'P', help = "Database port")]
    pub port: Option<u16>,

    #[arg(long, short = 'u', help = "Database user")]
    pub user: Option<String>,

    #[arg(long, short = 'p', help = "Database password")]
    pub password: Option<String>,

    #[arg(long, short = 'n', help = "Database name")]
    pub name: Option<String>,

    #[arg(long, visible_alias = "dt", help = "Database type (postgres, mysql)")]
    pub dbtype: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SchemaArgs {
    #[arg(
        long,
        short = 's',
        value_delimiter = ',',
        help = "Comma separated list of schemas to describe"
    )]
    pub schemas: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    #[arg(long, short = 'o', help = "JSON output file name")]
    pub output: Option<String>,

    #[arg(long, help = "Order schemas and entities by name in the output")]
    pub sort: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ExtractionArgs {
    #[arg(long, help = "Also extract foreign key relations")]
    pub relations: bool,

    #[arg(
        long,
        help = "Fail on columns or relations whose entity was not found instead of dropping them"
    )]
    pub strict: bool,
}

// Conversion functions from CLI args to config input
impl From<DatabaseArgs> for DatabaseInput {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            user: args.user,
            password: args.password,
            name: args.name,
            flavor: args.dbtype,
        }
    }
}

impl From<OutputArgs> for OutputInput {
    fn from(args: OutputArgs) -> Self {
        Self {
            path: args.output,
            sort: if args.sort { Some(true) } else { None },
        }
    }
}

impl From<ExtractionArgs> for ExtractionInput {
    fn from(args: ExtractionArgs) -> Self {
        Self {
            relations: if args.relations { Some(true) } else { None },
            strict: if args.strict { Some(true) } else { None },
        }
    }
}
