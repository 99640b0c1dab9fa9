//! Cityfeed Ingest - slide data batch runner

use anyhow::Result;
use cityfeed_common::logging::{init_logging, LogConfig, LogLevel};
use cityfeed_common::types::DataType;
use cityfeed_common::{Catalog, Translate};
use cityfeed_ingest::config::IngestConfig;
use cityfeed_ingest::parse::ParsedBody;
use cityfeed_ingest::pipeline::DataPipeline;
use cityfeed_ingest::processor::BatchProcessor;
use cityfeed_ingest::registry::FunctionRegistry;
use cityfeed_ingest::sources::{ckan, csv_table};
use cityfeed_ingest::store::JsonSlideStore;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cityfeed-ingest")]
#[command(author, version, about = "Cityfeed slide data batch runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Process every slide of the monitored type once (the cron trigger)
    Run,

    /// Print the available data functions and body types as JSON
    List,

    /// Fetch one URL through the generic transformer and print the records
    Test {
        /// Source URL
        #[arg(long)]
        url: String,

        /// Declared body type (json or csv)
        #[arg(long, default_value = "json")]
        data_type: DataType,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging from the environment; the verbose flag raises the level
    let mut log_config = LogConfig::from_env().unwrap_or_default();
    if cli.verbose {
        log_config = log_config.with_level(LogLevel::Debug);
    }
    init_logging(&log_config)?;

    let config = IngestConfig::from_env();
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let translator: Arc<dyn Translate> = Arc::new(Catalog::embedded());

    match cli.command {
        Command::Run => {
            info!(slide_type = %config.slide_type, "Starting batch run");

            let registry = FunctionRegistry::new(&config, translator.as_ref());
            let pipeline = DataPipeline::new(&config)?;
            let store = JsonSlideStore::new(&config.slides_path);

            let mut processor = BatchProcessor::new(
                registry,
                pipeline,
                Box::new(store),
                translator,
                config.slide_type.clone(),
            );

            let stats = processor.run().await?;
            info!(
                seen = stats.slides_seen,
                updated = stats.slides_updated,
                skipped = stats.slides_skipped,
                "Run finished"
            );
        },

        Command::List => {
            let registry = FunctionRegistry::new(&config, translator.as_ref());
            let listing = serde_json::json!({
                "functions": registry.list(),
                "data_types": DataType::all(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        },

        Command::Test { url, data_type } => {
            let mut pipeline = DataPipeline::new(&config)?;
            let body = pipeline.fetch_parsed(&url, data_type).await?;

            let records = match body {
                ParsedBody::Json(json) => ckan::generic_records(
                    &json,
                    Some("location.waterfront"),
                    translator.as_ref(),
                ),
                ParsedBody::Csv(rows) => csv_table::table_records(&rows),
            };
            println!("{}", serde_json::to_string_pretty(&records)?);
        },
    }

    Ok(())
}
