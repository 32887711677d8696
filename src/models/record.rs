//! Earthquake record data structures.

use serde::{Deserialize, Serialize};

/// A normalized earthquake report, as persisted in the store.
///
/// Both source strategies emit this one schema. The HTML page only carries
/// the core fields; the JSON API additionally fills the optional ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EarthquakeRecord {
    /// Synthetic unique identifier, generated fresh every run
    pub id: String,

    /// 1-based position within the current batch (display ordering only)
    pub sequence_number: u32,

    /// Local date and time as published by the source
    pub local_datetime: String,

    /// UTC date and time (empty when the source does not publish it)
    pub utc_datetime: String,

    /// Magnitude as published (numeric-as-text)
    pub magnitude: String,

    /// Depth as published, including unit suffix
    pub depth: String,

    /// Human-readable epicenter reference
    pub reference_location: String,

    /// Institute event code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Epicenter latitude (numeric-as-text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,

    /// Epicenter longitude (numeric-as-text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,

    /// Reported intensity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,

    /// URL of the full report document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,

    /// Source-side creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Source-side update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A raw record as extracted from the source, before the pipeline assigns
/// an id and a sequence number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub local_datetime: String,
    pub utc_datetime: String,
    pub magnitude: String,
    pub depth: String,
    pub reference_location: String,
    pub code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub intensity: Option<String>,
    pub report_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RawRecord {
    /// Finalize into a persistable record with the given identity.
    pub fn into_record(self, id: String, sequence_number: u32) -> EarthquakeRecord {
        EarthquakeRecord {
            id,
            sequence_number,
            local_datetime: self.local_datetime,
            utc_datetime: self.utc_datetime,
            magnitude: self.magnitude,
            depth: self.depth,
            reference_location: self.reference_location,
            code: self.code,
            latitude: self.latitude,
            longitude: self.longitude,
            intensity: self.intensity,
            report_url: self.report_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
