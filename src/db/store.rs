//! Append-only location log backed by a single SQLite connection.

use crate::db::initialize::init_db;
use crate::errors::{AppError, AppResult};
use crate::models::LocationSample;
use crate::utils::path::expand_tilde;
use chrono::{DateTime, Local};
use rusqlite::{Connection, OptionalExtension, Row, params};

pub struct LocationStore {
    conn: Connection,
}

impl LocationStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(expand_tilde(path)).map_err(AppError::persistence)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory().map_err(AppError::persistence)?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> AppResult<Self> {
        init_db(&conn).map_err(AppError::persistence)?;
        Ok(Self { conn })
    }

    /// Read-only access for maintenance commands (info, integrity check).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Insert one immutable row and return it with its assigned id.
    /// Writes take `&mut self`, so there is only ever one writer.
    pub fn append(&mut self, latitude: f64, longitude: f64) -> AppResult<LocationSample> {
        let now = Local::now();

        let tx = self.conn.transaction().map_err(AppError::persistence)?;
        tx.execute(
            "INSERT INTO locations (latitude, longitude, recorded_at) VALUES (?1, ?2, ?3)",
            params![latitude, longitude, now.to_rfc3339()],
        )
        .map_err(AppError::persistence)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(AppError::persistence)?;

        Ok(LocationSample {
            id,
            latitude,
            longitude,
            recorded_at: Some(now),
        })
    }

    /// Row with the highest id, `None` on an empty log.
    pub fn most_recent(&self) -> AppResult<Option<LocationSample>> {
        self.conn
            .query_row(
                "SELECT id, latitude, longitude, recorded_at FROM locations
                 ORDER BY id DESC LIMIT 1",
                [],
                map_row,
            )
            .optional()
            .map_err(AppError::persistence)
    }

    /// Newest first, optionally capped.
    pub fn list(&self, limit: Option<usize>) -> AppResult<Vec<LocationSample>> {
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, latitude, longitude, recorded_at FROM locations
                 ORDER BY id DESC LIMIT ?1",
            )
            .map_err(AppError::persistence)?;

        let rows = stmt
            .query_map([limit], map_row)
            .map_err(AppError::persistence)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(AppError::persistence)?);
        }
        Ok(out)
    }

    pub fn count(&self) -> AppResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))
            .map_err(AppError::persistence)
    }
}

fn map_row(row: &Row) -> rusqlite::Result<LocationSample> {
    let raw: Option<String> = row.get("recorded_at")?;
    let recorded_at = raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Local))
    });

    Ok(LocationSample {
        id: row.get("id")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        recorded_at,
    })
}
