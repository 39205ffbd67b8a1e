//! Desktop implementations of the permission and position boundaries.

pub mod feed;
pub mod permissions;

pub use feed::{FeedInput, FeedPositionSource};
pub use permissions::StoredPermissions;
