use rgeologger::db::store::LocationStore;
use rgeologger::errors::AppError;
use rusqlite::Connection;

mod common;
use common::setup_test_db;

#[test]
fn test_most_recent_on_empty_log_is_none() {
    let store = LocationStore::open_in_memory().expect("open store");
    assert!(store.most_recent().unwrap().is_none());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_single_append_is_most_recent() {
    let mut store = LocationStore::open_in_memory().expect("open store");
    let sample = store.append(37.0, -122.0).unwrap();

    assert_eq!(sample.id, 1);
    let last = store.most_recent().unwrap().expect("one sample");
    assert_eq!(last.id, sample.id);
    assert_eq!(last.latitude, 37.0);
    assert_eq!(last.longitude, -122.0);
    assert!(last.recorded_at.is_some());
}

#[test]
fn test_ids_strictly_increase_and_most_recent_is_max() {
    let mut store = LocationStore::open_in_memory().expect("open store");
    let fixes = [(45.0, 9.0), (45.1, 9.1), (-33.9, 151.2), (0.0, 0.0), (45.0, 9.0)];

    let mut last_id = 0;
    for (lat, lon) in fixes {
        let s = store.append(lat, lon).unwrap();
        assert!(s.id > last_id, "id {} not above {}", s.id, last_id);
        last_id = s.id;

        let recent = store.most_recent().unwrap().unwrap();
        assert_eq!(recent.id, s.id);
        assert_eq!((recent.latitude, recent.longitude), (lat, lon));
    }

    let listed = store.list(None).unwrap();
    assert_eq!(listed.len(), fixes.len());
    assert!(listed.windows(2).all(|w| w[0].id > w[1].id));
    assert_eq!(store.list(Some(2)).unwrap().len(), 2);
}

#[test]
fn test_log_survives_reopen() {
    let db_path = setup_test_db("store_reopen");

    {
        let mut store = LocationStore::open(&db_path).unwrap();
        store.append(1.0, 2.0).unwrap();
        store.append(3.0, 4.0).unwrap();
    }

    // Re-opening re-runs schema creation, which must be a no-op
    let store = LocationStore::open(&db_path).unwrap();
    let last = store.most_recent().unwrap().unwrap();
    assert_eq!(last.id, 2);
    assert_eq!((last.latitude, last.longitude), (3.0, 4.0));
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_legacy_rows_without_timestamp_are_read() {
    let db_path = setup_test_db("store_legacy");

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE locations (id INTEGER PRIMARY KEY AUTOINCREMENT, latitude REAL, longitude REAL);
             INSERT INTO locations (id, latitude, longitude) VALUES (5, 1.0, 2.0);",
        )
        .unwrap();
    }

    let mut store = LocationStore::open(&db_path).unwrap();
    let last = store.most_recent().unwrap().unwrap();
    assert_eq!(last.id, 5);
    assert!(last.recorded_at.is_none());

    let next = store.append(3.0, 4.0).unwrap();
    assert_eq!(next.id, 6);
}

#[test]
fn test_failed_write_is_a_persistence_error() {
    let db_path = setup_test_db("store_write_failure");
    let mut store = LocationStore::open(&db_path).unwrap();

    let other = Connection::open(&db_path).unwrap();
    other.execute_batch("DROP TABLE locations;").unwrap();

    let err = store.append(1.0, 2.0).unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)), "got {err:?}");
}

#[test]
fn test_unopenable_database_is_reported() {
    let err = LocationStore::open("/nonexistent-dir/rgeologger/db.sqlite")
        .err()
        .expect("open must fail");
    assert!(matches!(err, AppError::Persistence(_)), "got {err:?}");
}
