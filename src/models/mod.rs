pub mod display;
pub mod permission;
pub mod sample;
pub mod watch;

pub use display::DisplayState;
pub use permission::{PermissionId, PermissionState};
pub use sample::{Coordinates, LocationSample};
pub use watch::{WatchErrorCode, WatchEvent, WatchId, WatchOptions};
