use crate::models::Coordinates;
use chrono::{DateTime, Local};

/// `37.000000, -122.000000` with the configured number of decimals.
pub fn format_coordinates(c: &Coordinates, precision: usize) -> String {
    format!(
        "{:.prec$}, {:.prec$}",
        c.latitude,
        c.longitude,
        prec = precision
    )
}

/// Local timestamp for listings, `--` when unknown.
pub fn format_timestamp(ts: Option<&DateTime<Local>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_is_applied() {
        let c = Coordinates::new(37.0, -122.0);
        assert_eq!(format_coordinates(&c, 2), "37.00, -122.00");
        assert_eq!(format_coordinates(&c, 0), "37, -122");
    }

    #[test]
    fn missing_timestamp_is_dashed() {
        assert_eq!(format_timestamp(None), "--");
    }
}
