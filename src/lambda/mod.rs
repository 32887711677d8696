// src/lambda/mod.rs

//! AWS Lambda handler for the scheduled trigger.
//!
//! One invocation runs the full pipeline against DynamoDB and returns the
//! trigger response as a JSON value (API-Gateway proxy shape).

use lambda_runtime::{Error as LambdaError, LambdaEvent};

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::config::EnvConfigLoader;
use crate::error::Result;
use crate::pipeline::{RunOutcome, run_pipeline};
use crate::response::TriggerResponse;
use crate::services::make_source;
use crate::storage::DynamoStore;
use crate::utils::http;

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Value>) -> std::result::Result<Value, LambdaError> {
    info!("Handling scheduled trigger: {:?}", event.context.request_id);

    let response = TriggerResponse::from_run(run_trigger().await)?;
    match response.status_code {
        200 => info!("Trigger succeeded"),
        code => error!("Trigger failed with status {}", code),
    }

    Ok(serde_json::to_value(&response)?)
}

/// One pipeline invocation in the Lambda environment.
async fn run_trigger() -> Result<RunOutcome> {
    let config = EnvConfigLoader::load()?;
    let client = http::create_async_client(&config.source)?;
    let source = make_source(&config.source, client)?;
    let store = DynamoStore::from_env(&config.store.table_name).await;

    run_pipeline(source.as_ref(), &store).await
}
