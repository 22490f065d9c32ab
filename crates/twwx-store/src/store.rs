//! Main store implementation.

use std::io::Write;
use std::path::Path;

use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use twwx_types::{Region, UNSPECIFIED_DESCRIPTION, WeatherRecord};

use crate::error::{Error, Result};
use crate::models::{StoreStats, StoredRecord};
use crate::queries::{RECORD_COLUMNS, RecordQuery};
use crate::schema;

const INSERT_SQL: &str = "INSERT INTO weather (location, region, min_temp, max_temp, \
     current_temp, description, forecast_time) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// SQLite-based store for weather records.
///
/// The store owns a single connection for its whole lifetime; every public
/// operation runs against it and releases its statements before returning.
/// Records are append-only: nothing here updates a row.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init()?;
        Ok(store)
    }

    /// Ensure the schema exists. Safe to call any number of times.
    pub fn init(&self) -> Result<()> {
        schema::initialize(&self.conn)
    }
}

// Write operations
impl Store {
    /// Insert a single record, returning its row id.
    pub fn insert(&self, record: &WeatherRecord) -> Result<i64> {
        self.conn.execute(INSERT_SQL, record_params(record))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Append a batch of records.
    ///
    /// Each row is inserted independently inside one transaction: a row that
    /// fails (for example a constraint violation) is logged and skipped, and
    /// the rest of the batch continues. Returns how many rows were persisted.
    /// Only a failure of the transaction itself is returned as an error.
    pub fn insert_many(&self, records: &[WeatherRecord]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;

        {
            let mut stmt = tx.prepare_cached(INSERT_SQL)?;
            for record in records {
                match stmt.execute(record_params(record)) {
                    Ok(_) => inserted += 1,
                    Err(e) => warn!("Skipping record for {:?}: {}", record.location, e),
                }
            }
        }

        tx.commit()?;

        info!("Inserted {}/{} records", inserted, records.len());
        Ok(inserted)
    }

    /// Delete every row ingested more than `days` days ago.
    ///
    /// Location plays no part in the decision. Returns the number of rows
    /// deleted, so a second call in a row returns zero.
    pub fn prune_older_than(&self, days: u32) -> Result<usize> {
        // A cutoff before the representable range leaves nothing to delete.
        let Some(cutoff) = OffsetDateTime::now_utc().checked_sub(Duration::days(i64::from(days)))
        else {
            debug!("Retention of {} days reaches past the earliest timestamp", days);
            return Ok(0);
        };
        let deleted = self.conn.execute(
            "DELETE FROM weather WHERE created_at < ?1",
            [cutoff.unix_timestamp()],
        )?;

        info!("Deleted {} old records (older than {} days)", deleted, days);
        Ok(deleted)
    }
}

// Query operations
impl Store {
    /// Every record, newest ingestion first.
    pub fn all_records(&self) -> Result<Vec<StoredRecord>> {
        self.query_records(&RecordQuery::new())
    }

    /// Query records with filters.
    pub fn query_records(&self, query: &RecordQuery) -> Result<Vec<StoredRecord>> {
        let sql = query.build_sql();
        let (_, params) = query.build_where();

        debug!("Executing query: {}", sql);

        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_ref.as_slice(), stored_record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// The most recently ingested record for every distinct location.
    ///
    /// Locations are compared as exact strings. When two rows for a location
    /// share the same `created_at`, the one with the higher id wins. Results
    /// are ordered by region label, then location.
    pub fn latest_per_location(&self) -> Result<Vec<StoredRecord>> {
        let sql = format!(
            "SELECT {columns} FROM (
                 SELECT *, ROW_NUMBER() OVER (
                     PARTITION BY location ORDER BY created_at DESC, id DESC
                 ) AS rn
                 FROM weather
             )
             WHERE rn = 1
             ORDER BY region, location",
            columns = RECORD_COLUMNS
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], stored_record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Latest record per location, restricted to one region.
    pub fn latest_in_region(&self, region: Region) -> Result<Vec<StoredRecord>> {
        Ok(self
            .latest_per_location()?
            .into_iter()
            .filter(|r| r.region == region)
            .collect())
    }

    /// Count records, optionally for a single location.
    pub fn count_records(&self, location: Option<&str>) -> Result<u64> {
        let count: i64 = match location {
            Some(loc) => self.conn.query_row(
                "SELECT COUNT(*) FROM weather WHERE location = ?",
                [loc],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM weather", [], |row| row.get(0))?,
        };

        Ok(count as u64)
    }

    /// Aggregate statistics over all rows.
    pub fn stats(&self) -> Result<StoreStats> {
        let (total, unique, latest): (i64, i64, Option<i64>) = self.conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT location), MAX(created_at) FROM weather",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        let (min_temp, max_temp): (Option<f64>, Option<f64>) = self.conn.query_row(
            "SELECT MIN(min_temp), MAX(max_temp) FROM weather
             WHERE min_temp IS NOT NULL AND max_temp IS NOT NULL",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let latest_update = latest
            .map(|ts| timestamp_from_unix(ts, 2))
            .transpose()?;

        Ok(StoreStats {
            total_records: total as u64,
            unique_locations: unique as u64,
            latest_update,
            min_temp,
            max_temp,
        })
    }

    /// Write records as CSV, with a header row.
    pub fn export_csv<W: Write>(&self, records: &[StoredRecord], writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        wtr.write_record([
            "id",
            "location",
            "region",
            "min_temp",
            "max_temp",
            "current_temp",
            "description",
            "forecast_time",
            "created_at",
        ])?;
        for record in records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;

        Ok(())
    }
}

fn record_params(record: &WeatherRecord) -> impl rusqlite::Params + '_ {
    (
        record.location.as_str(),
        record.region.label(),
        record.min_temp,
        record.max_temp,
        record.current_temp,
        record.description.as_str(),
        record.forecast_time.as_str(),
    )
}

fn stored_record_from_row(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
    Ok(StoredRecord {
        id: row.get(0)?,
        location: row.get(1)?,
        region: row
            .get::<_, Option<String>>(2)?
            .map_or(Region::Other, |s| Region::from_stored(&s)),
        min_temp: row.get(3)?,
        max_temp: row.get(4)?,
        current_temp: row.get(5)?,
        description: row
            .get::<_, Option<String>>(6)?
            .unwrap_or_else(|| UNSPECIFIED_DESCRIPTION.to_string()),
        forecast_time: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        created_at: timestamp_from_unix(row.get(8)?, 8)?,
    })
}

fn timestamp_from_unix(ts: i64, column: usize) -> rusqlite::Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(ts)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(e)))
}
