use log::{info, warn};
use rusqlite::{Connection, OptionalExtension, Result};

const RECORDED_AT_MIGRATION: &str = "20250610_0002_add_recorded_at";

/// Ensure that the internal `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `locations` table exists.
fn locations_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='locations'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `locations` table already carries `recorded_at`.
fn locations_has_recorded_at(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('locations')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "recorded_at" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the append-only `locations` log.
/// AUTOINCREMENT keeps ids strictly increasing even across a VACUUM.
fn create_locations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            latitude    REAL NOT NULL,
            longitude   REAL NOT NULL,
            recorded_at TEXT
        );
        "#,
    )?;
    Ok(())
}

/// Logs written by the first mobile build only had id/latitude/longitude.
fn migrate_add_recorded_at(conn: &Connection) -> Result<()> {
    let applied = {
        let mut chk = conn.prepare(
            "SELECT 1 FROM log
             WHERE operation = 'migration_applied' AND target = ?1
             LIMIT 1",
        )?;
        chk.query_row([RECORDED_AT_MIGRATION], |_| Ok(()))
            .optional()?
            .is_some()
    };
    if applied || locations_has_recorded_at(conn)? {
        return Ok(());
    }

    warn!("Legacy locations table detected, adding 'recorded_at' column");

    conn.execute("ALTER TABLE locations ADD COLUMN recorded_at TEXT;", [])?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added recorded_at to locations')",
        [RECORDED_AT_MIGRATION],
    )?;

    info!("Migration applied: {RECORDED_AT_MIGRATION}");
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !locations_table_exists(conn)? {
        create_locations_table(conn)?;
        info!("Created locations table");
    } else {
        migrate_add_recorded_at(conn)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_twice_is_a_noop() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(locations_has_recorded_at(&conn).unwrap());
    }

    #[test]
    fn legacy_table_keeps_rows_and_gains_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE locations (id INTEGER PRIMARY KEY AUTOINCREMENT, latitude REAL, longitude REAL);
             INSERT INTO locations (latitude, longitude) VALUES (1.0, 2.0);",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        assert!(locations_has_recorded_at(&conn).unwrap());
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM locations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 1);
        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, 1);
    }
}
