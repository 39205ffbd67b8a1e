use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

/// Tri-state reduction of whatever the platform reports for the location permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    #[default]
    Undetermined,
}

impl PermissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
            PermissionState::Undetermined => "undetermined",
        }
    }

    /// Parse the platform/config spelling. Platform variants that only
    /// restrict access ("blocked", "limited", "unavailable") count as denied.
    pub fn from_status_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "granted" => Some(PermissionState::Granted),
            "denied" | "blocked" | "limited" | "unavailable" => Some(PermissionState::Denied),
            "undetermined" | "not_determined" => Some(PermissionState::Undetermined),
            _ => None,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

/// Accepts any spelling `from_status_str` knows, so a hand-edited
/// `location_permission: Blocked` still loads.
impl<'de> Deserialize<'de> for PermissionState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PermissionState::from_status_str(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown permission status `{raw}`")))
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which platform permission identifier gates location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionId {
    /// Apple family
    LocationWhenInUse,
    /// Everything else
    AccessFineLocation,
}

impl PermissionId {
    /// Pure selection from an OS name as reported by `std::env::consts::OS`.
    pub fn for_os(os: &str) -> Self {
        match os {
            "ios" | "macos" => PermissionId::LocationWhenInUse,
            _ => PermissionId::AccessFineLocation,
        }
    }

    pub fn current() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionId::LocationWhenInUse => "ios.permission.LOCATION_WHEN_IN_USE",
            PermissionId::AccessFineLocation => "android.permission.ACCESS_FINE_LOCATION",
        }
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
