#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rgeologger::core::{EventSink, PermissionBackend, PositionSource};
use rgeologger::errors::{AppError, AppResult};
use rgeologger::models::{PermissionId, PermissionState, WatchEvent, WatchId, WatchOptions};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Binary under test, with its config directory pointed at `home`.
pub fn rgl(home: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("rgeologger");
    cmd.env("HOME", home).env("APPDATA", home).env_remove("RUST_LOG");
    cmd
}

/// Fresh, empty directory inside the system temp dir
pub fn setup_test_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rgeologger_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path
}

/// Unique test DB path inside the system temp dir, removed if present
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rgeologger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Write a CSV feed file and return its path
pub fn write_feed(name: &str, content: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_feed.csv", name));
    fs::write(&path, content).expect("write feed");
    path
}

// ---------------------------------------------------------------------------
// Permission doubles
// ---------------------------------------------------------------------------

/// Always answers the same state and counts calls.
#[derive(Clone)]
pub struct StaticPermissions {
    pub state: PermissionState,
    pub checks: Arc<AtomicUsize>,
}

impl StaticPermissions {
    pub fn new(state: PermissionState) -> Self {
        Self {
            state,
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl PermissionBackend for StaticPermissions {
    async fn check_status(&self, _id: PermissionId) -> AppResult<PermissionState> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.state)
    }

    async fn request_status(&self, _id: PermissionId) -> AppResult<PermissionState> {
        Ok(self.state)
    }
}

/// Backend that cannot be reached.
pub struct BrokenPermissions;

impl PermissionBackend for BrokenPermissions {
    async fn check_status(&self, _id: PermissionId) -> AppResult<PermissionState> {
        Err(AppError::Permission("platform API unreachable".into()))
    }

    async fn request_status(&self, _id: PermissionId) -> AppResult<PermissionState> {
        Err(AppError::Permission("platform API unreachable".into()))
    }
}

/// A prompt nobody ever answers.
pub struct PendingPermissions;

impl PermissionBackend for PendingPermissions {
    async fn check_status(&self, _id: PermissionId) -> AppResult<PermissionState> {
        std::future::pending().await
    }

    async fn request_status(&self, _id: PermissionId) -> AppResult<PermissionState> {
        std::future::pending().await
    }
}

// ---------------------------------------------------------------------------
// Position source double
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockSourceInner {
    next_id: u64,
    sinks: HashMap<WatchId, EventSink>,
    started: Vec<WatchOptions>,
    cleared: Vec<WatchId>,
    fail_start: bool,
}

/// Shared handle: keep a clone in the test to push events and inspect calls.
#[derive(Clone, Default)]
pub struct MockSource {
    inner: Arc<Mutex<MockSourceInner>>,
}

impl MockSource {
    pub fn failing() -> Self {
        let s = Self::default();
        s.inner.lock().unwrap().fail_start = true;
        s
    }

    /// Deliver an event to every active watch.
    pub fn emit(&self, event: WatchEvent) {
        let inner = self.inner.lock().unwrap();
        for sink in inner.sinks.values() {
            sink.send(event.clone()).ok();
        }
    }

    /// Drop all sinks, as if the platform ended every watch.
    pub fn close(&self) {
        self.inner.lock().unwrap().sinks.clear();
    }

    pub fn started(&self) -> Vec<WatchOptions> {
        self.inner.lock().unwrap().started.clone()
    }

    pub fn cleared(&self) -> Vec<WatchId> {
        self.inner.lock().unwrap().cleared.clone()
    }
}

impl PositionSource for MockSource {
    fn watch_position(&self, sink: EventSink, options: WatchOptions) -> AppResult<WatchId> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_start {
            return Err(AppError::Other("location services disabled".into()));
        }
        inner.next_id += 1;
        let id = WatchId(inner.next_id);
        inner.sinks.insert(id, sink);
        inner.started.push(options);
        Ok(id)
    }

    fn clear_watch(&self, id: WatchId) {
        let mut inner = self.inner.lock().unwrap();
        inner.sinks.remove(&id);
        inner.cleared.push(id);
    }
}
