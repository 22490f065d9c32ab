//! Database schema.

use rusqlite::Connection;

use crate::error::Result;

/// Create the weather table and its indexes if they do not exist yet.
///
/// `created_at` defaults to the SQLite clock in unix seconds, so the
/// ingestion timestamp is always assigned by the store.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS weather (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            location TEXT NOT NULL CHECK (length(location) > 0),
            region TEXT,
            min_temp REAL,
            max_temp REAL,
            current_temp REAL,
            description TEXT,
            forecast_time TEXT,
            created_at INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER))
        );
        CREATE INDEX IF NOT EXISTS idx_weather_location_created
            ON weather(location, created_at);
        CREATE INDEX IF NOT EXISTS idx_weather_created
            ON weather(created_at);
        "#,
    )?;

    Ok(())
}
