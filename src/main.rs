use anyhow::Result;
use clap::Parser;
use console::style;
use db_descriptor::config::{self, defaults::DEFAULT_CONFIG_FILE};
use db_descriptor::service;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Analyses a list of schemas in a database and writes a JSON file describing
/// their tables, views and columns.
#[derive(Parser)]
#[command(name = "db-descriptor", author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    database_args: config::DatabaseArgs,

    #[command(flatten)]
    schema_args: config::SchemaArgs,

    #[command(flatten)]
    output_args: config::OutputArgs,

    #[command(flatten)]
    extraction_args: config::ExtractionArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);
    run_main(cli).await
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_main(cli: Cli) -> Result<()> {
    let file_config = config::load_config(&cli.config_file)?;

    let cli_config = config::ConfigInput {
        database: Some(cli.database_args.clone().into()),
        schemas: cli.schema_args.schemas.clone(),
        output: Some(cli.output_args.clone().into()),
        extraction: Some(cli.extraction_args.clone().into()),
    };

    let config = config::ConfigBuilder::new()
        .with_file(file_config)
        .with_cli_args(cli_config)
        .resolve()?;

    info!("Describing database");
    let description = service::run(&config).await?;

    if !cli.quiet {
        println!(
            "{} JSON file created successfully: {} ({} schemas, {} entities)",
            style("✓").green(),
            style(config.output.path.display()).bold(),
            description.schemas().len(),
            description.entities().count()
        );
    }

    Ok(())
}
