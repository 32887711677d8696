//! Sismo Crawler CLI
//!
//! Local execution entry point. For AWS Lambda, use `sismo-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sismo_crawler::{
    config,
    error::Result,
    models::SourceVariant,
    pipeline,
    response::TriggerResponse,
    services::make_source,
    storage::{LocalStore, SnapshotStore},
    utils::http,
};

/// Sismo - IGP Earthquake Report Snapshot Crawler
#[derive(Parser, Debug)]
#[command(
    name = "sismo",
    version,
    about = "Fetches the latest earthquake reports and snapshots them into a local store"
)]
struct Cli {
    /// Path to storage directory containing config and records
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one fetch → extract → replace invocation
    Run {
        /// Override the configured source variant
        #[arg(long, value_enum)]
        variant: Option<Variant>,

        /// Print the full trigger response as JSON
        #[arg(long)]
        response: bool,
    },

    /// Validate configuration files
    Validate,

    /// Show current snapshot info
    Info,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Variant {
    Html,
    Api,
}

impl From<Variant> for SourceVariant {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Html => SourceVariant::Html,
            Variant::Api => SourceVariant::Api,
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Sismo crawler starting...");

    let config_path = cli.storage_dir.join("config.toml");
    let mut config = config::load_config(&config_path)?;
    let store = LocalStore::new(cli.storage_dir.join(&config.store.data_dir));

    match cli.command {
        Command::Run { variant, response } => {
            if let Some(variant) = variant {
                config.source.variant = variant.into();
            }
            config.validate()?;

            let client = http::create_async_client(&config.source)?;
            let source = make_source(&config.source, client)?;

            let result = pipeline::run_pipeline(source.as_ref(), &store).await;
            let trigger_response = TriggerResponse::from_run(result)?;

            if response {
                println!("{}", serde_json::to_string_pretty(&trigger_response)?);
            }

            match trigger_response.status_code {
                200 => log::info!("Run complete!"),
                code => log::error!("Run failed with status {}: {}", code, trigger_response.body),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!("Source variant: {:?}", config.source.variant);

            let count = store.count().await?;
            if count == 0 {
                log::info!("No snapshot stored yet.");
            } else {
                log::info!("Current snapshot holds {} records", count);
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
