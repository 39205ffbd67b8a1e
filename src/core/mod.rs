//! Location tracking core: permission gate, watcher and the session that drives them.

pub mod config;
pub mod gate;
pub mod log;
pub mod session;
pub mod watcher;

pub use gate::{PermissionBackend, PermissionGate};
pub use session::{LocationSession, SessionState};
pub use watcher::{EventSink, LocationWatcher, PositionSource, WatchHandle};
