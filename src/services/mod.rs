// src/services/mod.rs

//! Source reading strategies.
//!
//! One capability, two interchangeable implementations: scrape the public
//! reports page, or query the JSON API. Both produce an ordered, bounded
//! list of raw records and a count of malformed items skipped along the way.

pub mod api;
pub mod html;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{RawRecord, SourceConfig, SourceVariant};

pub use api::ApiSource;
pub use html::HtmlSource;

/// Result of one fetch-and-extract pass.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Successfully extracted records, in source order
    pub records: Vec<RawRecord>,
    /// Malformed items dropped without aborting the batch
    pub skipped: usize,
}

/// A strategy producing a bounded ordered batch of raw records.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Fetch the source and extract up to the configured limit of records.
    async fn fetch_batch(&self) -> Result<FetchOutcome>;
}

/// Build the configured source strategy.
pub fn make_source(
    config: &SourceConfig,
    client: reqwest::Client,
) -> Result<Box<dyn SourceReader>> {
    match config.variant {
        SourceVariant::Html => Ok(Box::new(HtmlSource::new(
            client,
            config.html_url.clone(),
            config.limit,
        )?)),
        SourceVariant::Api => Ok(Box::new(ApiSource::new(
            client,
            config.api_url.clone(),
            config.limit,
        ))),
    }
}
