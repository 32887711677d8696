//! AWS Lambda entry point for the sismo crawler.
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//!
//! ## Environment Variables
//!
//! - `TABLE_NAME`: DynamoDB table holding the snapshot (default: `TablaSismos`)
//! - `SOURCE_VARIANT`: `html` or `api` (default: `html`)
//! - `SOURCE_URL`: override for the selected variant's endpoint
//! - `FETCH_TIMEOUT_SECS`: HTTP request timeout
//! - `RUST_LOG`: log level (e.g., `info`, `debug`)

use lambda_runtime::service_fn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sismo_crawler::lambda::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // Initialize tracing for Lambda
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Sismo Lambda crawler starting...");

    // Run Lambda handler
    lambda_runtime::run(service_fn(handler)).await
}
