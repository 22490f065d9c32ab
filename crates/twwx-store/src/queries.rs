//! Query builder for stored weather records.
//!
//! [`RecordQuery`] follows the builder pattern; every filter is optional.
//!
//! # Example
//!
//! ```
//! use twwx_store::{RecordQuery, Store};
//! use twwx_types::Region;
//! use time::{Duration, OffsetDateTime};
//!
//! let store = Store::open_in_memory()?;
//! let yesterday = OffsetDateTime::now_utc() - Duration::hours(24);
//!
//! let query = RecordQuery::new()
//!     .region(Region::North)
//!     .since(yesterday)
//!     .limit(50);
//!
//! let records = store.query_records(&query)?;
//! assert!(records.is_empty());
//! # Ok::<(), twwx_store::Error>(())
//! ```

use time::OffsetDateTime;
use twwx_types::Region;

pub(crate) const RECORD_COLUMNS: &str = "id, location, region, min_temp, max_temp, current_temp, \
     description, forecast_time, created_at";

/// Fluent query builder for stored records.
///
/// By default, results are ordered by `created_at` descending (newest
/// first), with the row id as tiebreaker.
#[derive(Debug, Default, Clone)]
pub struct RecordQuery {
    /// Filter by exact location string.
    pub location: Option<String>,
    /// Filter by region.
    pub region: Option<Region>,
    /// Only records ingested at or after this time.
    pub since: Option<OffsetDateTime>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Order by created_at descending (newest first).
    pub newest_first: bool,
}

impl RecordQuery {
    /// Create a query matching every record, newest first.
    pub fn new() -> Self {
        Self {
            newest_first: true,
            ..Default::default()
        }
    }

    /// Filter by location. Matching is exact; no spelling normalization.
    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    /// Filter by region.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Filter to records ingested at or after this time.
    pub fn since(mut self, time: OffsetDateTime) -> Self {
        self.since = Some(time);
        self
    }

    /// Limit the maximum number of results returned.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Order results oldest first.
    pub fn oldest_first(mut self) -> Self {
        self.newest_first = false;
        self
    }

    /// Build the SQL WHERE clause and parameters.
    pub(crate) fn build_where(&self) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref location) = self.location {
            conditions.push("location = ?");
            params.push(Box::new(location.clone()));
        }

        if let Some(region) = self.region {
            conditions.push("region = ?");
            params.push(Box::new(region.label()));
        }

        if let Some(since) = self.since {
            conditions.push("created_at >= ?");
            params.push(Box::new(since.unix_timestamp()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, params)
    }

    /// Build the full SQL query.
    pub(crate) fn build_sql(&self) -> String {
        let (where_clause, _) = self.build_where();
        let order = if self.newest_first { "DESC" } else { "ASC" };

        let mut sql = format!(
            "SELECT {} FROM weather {} ORDER BY created_at {}, id {}",
            RECORD_COLUMNS, where_clause, order, order
        );

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }
}
