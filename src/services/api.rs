// src/services/api.rs

//! JSON API strategy.
//!
//! The institute exposes the year's reports as a JSON array, newest first.
//! Fields are read with defaulting accessors since the API omits or nulls
//! fields irregularly. Date and time arrive split and are joined here;
//! depth arrives unitless and gets the `km` suffix appended.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::RawRecord;
use crate::services::{FetchOutcome, SourceReader};
use crate::utils::http::fetch_text;
use crate::utils::json::{opt_field, str_field};

const DEPTH_UNIT: &str = " km";

/// Source reader that queries the JSON API for the current year.
pub struct ApiSource {
    client: Client,
    url_template: String,
    limit: usize,
}

impl ApiSource {
    /// Create a new API source from a URL template with a `{year}` slot.
    pub fn new(client: Client, url_template: String, limit: usize) -> Self {
        Self {
            client,
            url_template,
            limit,
        }
    }

    /// Endpoint URL for a given calendar year.
    fn endpoint_for_year(&self, year: i32) -> String {
        self.url_template.replace("{year}", &year.to_string())
    }

    /// Extract up to `limit` records from the parsed payload.
    fn extract(&self, payload: &Value) -> Result<FetchOutcome> {
        let entries = payload
            .as_array()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AppError::not_found("API payload is not a non-empty list"))?;

        let mut outcome = FetchOutcome::default();
        for entry in entries.iter().take(self.limit) {
            match extract_entry(entry) {
                Some(record) => outcome.records.push(record),
                None => {
                    outcome.skipped += 1;
                    log::warn!("Skipping API entry with unexpected shape");
                }
            }
        }
        Ok(outcome)
    }
}

/// Extract a single API entry, or `None` if it is not a usable object.
fn extract_entry(entry: &Value) -> Option<RawRecord> {
    if !entry.is_object() {
        return None;
    }

    let local_datetime = join_datetime(
        &str_field(entry, "fecha_local"),
        &str_field(entry, "hora_local"),
    );
    let utc_datetime = join_datetime(
        &str_field(entry, "fecha_utc"),
        &str_field(entry, "hora_utc"),
    );

    let mut depth = str_field(entry, "profundidad");
    if !depth.is_empty() {
        depth.push_str(DEPTH_UNIT);
    }

    Some(RawRecord {
        local_datetime,
        utc_datetime,
        magnitude: str_field(entry, "magnitud"),
        depth,
        reference_location: str_field(entry, "referencia"),
        code: opt_field(entry, "codigo"),
        latitude: opt_field(entry, "latitud"),
        longitude: opt_field(entry, "longitud"),
        intensity: opt_field(entry, "intensidad"),
        report_url: opt_field(entry, "reporte_acelerometrico_pdf"),
        created_at: opt_field(entry, "createdAt"),
        updated_at: opt_field(entry, "updatedAt"),
    })
}

/// Join split date and time fields with a single space.
fn join_datetime(date: &str, time: &str) -> String {
    match (date.is_empty(), time.is_empty()) {
        (false, false) => format!("{date} {time}"),
        (false, true) => date.to_string(),
        (true, false) => time.to_string(),
        (true, true) => String::new(),
    }
}

#[async_trait]
impl SourceReader for ApiSource {
    async fn fetch_batch(&self) -> Result<FetchOutcome> {
        let url = self.endpoint_for_year(Utc::now().year());
        let body = fetch_text(&self.client, &url).await?;
        let payload: Value = serde_json::from_str(&body)?;
        self.extract(&payload)
    }
}
