use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build a pair without range checks. Values coming from outside the
    /// process should go through [`Coordinates::checked`].
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a pair, rejecting non-finite or out-of-range degrees.
    pub fn checked(latitude: f64, longitude: f64) -> AppResult<Self> {
        let c = Self::new(latitude, longitude);
        if c.is_valid() {
            Ok(c)
        } else {
            Err(AppError::InvalidCoordinate(format!(
                "({latitude}, {longitude}) is outside lat [-90, 90] / lon [-180, 180]"
            )))
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One immutable row of the `locations` log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSample {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// `None` for rows written before the timestamp column existed.
    pub recorded_at: Option<DateTime<Local>>,
}

impl LocationSample {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}
