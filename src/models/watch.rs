use super::sample::Coordinates;
use std::fmt;

/// Error codes reported by a position source, numbered like the
/// platform geolocation services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    PlayServiceNotAvailable,
    SettingsNotSatisfied,
    Internal,
}

impl WatchErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            WatchErrorCode::PermissionDenied => 1,
            WatchErrorCode::PositionUnavailable => 2,
            WatchErrorCode::Timeout => 3,
            WatchErrorCode::PlayServiceNotAvailable => 4,
            WatchErrorCode::SettingsNotSatisfied => 5,
            WatchErrorCode::Internal => -1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WatchErrorCode::PermissionDenied => "PERMISSION_DENIED",
            WatchErrorCode::PositionUnavailable => "POSITION_UNAVAILABLE",
            WatchErrorCode::Timeout => "TIMEOUT",
            WatchErrorCode::PlayServiceNotAvailable => "PLAY_SERVICE_NOT_AVAILABLE",
            WatchErrorCode::SettingsNotSatisfied => "SETTINGS_NOT_SATISFIED",
            WatchErrorCode::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for WatchErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// One delivery from a watch: either a fix or a transient error, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    Fix(Coordinates),
    Error {
        code: WatchErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
        }
    }
}

/// Identifier handed out by a position source for one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

impl fmt::Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
