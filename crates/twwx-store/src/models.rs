//! Data models for stored data.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use twwx_types::{Region, WeatherRecord};

/// A weather record as persisted, with its store-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Database row ID.
    pub id: i64,
    /// Place name.
    pub location: String,
    /// Derived region.
    pub region: Region,
    /// Minimum temperature in Celsius.
    pub min_temp: Option<f64>,
    /// Maximum temperature in Celsius.
    pub max_temp: Option<f64>,
    /// Current temperature in Celsius.
    pub current_temp: Option<f64>,
    /// Weather condition text.
    pub description: String,
    /// Forecast start time as reported by the feed.
    pub forecast_time: String,
    /// When this record was ingested.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl StoredRecord {
    /// Strip the store-assigned fields.
    pub fn to_record(&self) -> WeatherRecord {
        WeatherRecord {
            location: self.location.clone(),
            region: self.region,
            min_temp: self.min_temp,
            max_temp: self.max_temp,
            current_temp: self.current_temp,
            description: self.description.clone(),
            forecast_time: self.forecast_time.clone(),
        }
    }
}

/// Aggregate statistics over the whole store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of rows.
    pub total_records: u64,
    /// Number of distinct location strings.
    pub unique_locations: u64,
    /// Most recent ingestion time, `None` when the store is empty.
    #[serde(with = "time::serde::rfc3339::option")]
    pub latest_update: Option<OffsetDateTime>,
    /// Lowest `min_temp` among rows that have both bounds.
    pub min_temp: Option<f64>,
    /// Highest `max_temp` among rows that have both bounds.
    pub max_temp: Option<f64>,
}
