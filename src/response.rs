// src/response.rs

//! Trigger response formatting.
//!
//! The scheduled trigger returns an HTTP-proxy-shaped structure regardless
//! of how it was invoked: a status code, JSON headers on success, and a
//! JSON-encoded body carrying either the stored batch or an error message.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::EarthquakeRecord;
use crate::pipeline::RunOutcome;

/// Structured result of one trigger invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    /// 200 success, 404 no usable source content, 500 otherwise
    pub status_code: u16,

    /// Response headers, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    /// JSON-encoded body
    pub body: String,
}

#[derive(Debug, Serialize)]
struct SuccessBody<'a> {
    message: String,
    total_count: usize,
    records: &'a [EarthquakeRecord],
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl TriggerResponse {
    /// Build the success response for a completed run.
    pub fn success(outcome: &RunOutcome) -> Result<Self> {
        let body = SuccessBody {
            message: format!(
                "Extracted and stored {} earthquake reports",
                outcome.records.len()
            ),
            total_count: outcome.records.len(),
            records: &outcome.records,
        };

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());

        Ok(Self {
            status_code: 200,
            headers: Some(headers),
            body: serde_json::to_string(&body)?,
        })
    }

    /// Build the failure response for a terminal error.
    pub fn failure(error: &AppError) -> Self {
        let body = ErrorBody {
            error: error.to_string(),
        };
        Self {
            status_code: error.status_code(),
            headers: None,
            // ErrorBody serialization cannot fail; fall back to a bare string
            body: serde_json::to_string(&body)
                .unwrap_or_else(|_| format!("{{\"error\":\"{error}\"}}")),
        }
    }

    /// Map a pipeline result into a response.
    pub fn from_run(result: Result<RunOutcome>) -> Result<Self> {
        match result {
            Ok(outcome) => Self::success(&outcome),
            Err(error) => Ok(Self::failure(&error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRecord;

    fn outcome() -> RunOutcome {
        RunOutcome {
            records: vec![
                RawRecord {
                    local_datetime: "26/08/2026 21:50:12".to_string(),
                    reference_location: "Lima".to_string(),
                    magnitude: "4.2".to_string(),
                    depth: "52 km".to_string(),
                    ..RawRecord::default()
                }
                .into_record("r1".to_string(), 1),
            ],
            skipped: 0,
            deleted: 2,
        }
    }

    #[test]
    fn test_success_response() {
        let response = TriggerResponse::success(&outcome()).unwrap();
        assert_eq!(response.status_code, 200);

        let headers = response.headers.unwrap();
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Access-Control-Allow-Origin"], "*");

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["total_count"], 1);
        assert_eq!(body["records"][0]["id"], "r1");
        assert_eq!(body["records"][0]["sequence_number"], 1);
    }

    #[test]
    fn test_failure_response_not_found() {
        let response = TriggerResponse::failure(&AppError::not_found("container missing"));
        assert_eq!(response.status_code, 404);
        assert!(response.headers.is_none());

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert!(body["error"].as_str().unwrap().contains("container missing"));
    }

    #[test]
    fn test_failure_response_write_error() {
        let response = TriggerResponse::failure(&AppError::write("put failed"));
        assert_eq!(response.status_code, 500);
        assert!(response.headers.is_none());
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let response = TriggerResponse::failure(&AppError::EmptyResult);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 404);
        assert!(value.get("headers").is_none());
        assert!(value["body"].is_string());
    }
}
