//! Sky coordinate owned by an appointment.

use serde::{Deserialize, Serialize};

use crate::api::CoordinateInfo;

/// Right ascension / declination pair, entered as hours/minutes/seconds
/// plus declination degrees.
///
/// Coordinates are owned exclusively by the appointment that references
/// them; they are created and deleted with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    /// Right ascension in degrees, derived from hours/minutes/seconds.
    pub right_ascension: f64,
    /// Declination in degrees.
    pub declination: f64,
}

impl Coordinate {
    /// Build a coordinate, deriving the right ascension from the
    /// hours/minutes/seconds components.
    pub fn new(hours: i32, minutes: i32, seconds: i32, declination: f64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            right_ascension: Self::hours_minutes_seconds_to_degrees(hours, minutes, seconds),
            declination,
        }
    }

    /// Convert an hour-angle expressed as hours/minutes/seconds into degrees.
    ///
    /// One hour of right ascension is 15 degrees.
    pub fn hours_minutes_seconds_to_degrees(hours: i32, minutes: i32, seconds: i32) -> f64 {
        f64::from(hours) * 15.0 + f64::from(minutes) * 15.0 / 60.0 + f64::from(seconds) * 15.0 / 3600.0
    }

    /// Read-side representation.
    pub fn to_info(&self) -> CoordinateInfo {
        CoordinateInfo {
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            right_ascension: self.right_ascension,
            declination: self.declination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Coordinate;

    #[test]
    fn test_hms_to_degrees_whole_hours() {
        assert_eq!(Coordinate::hours_minutes_seconds_to_degrees(0, 0, 0), 0.0);
        assert_eq!(Coordinate::hours_minutes_seconds_to_degrees(12, 0, 0), 180.0);
        assert_eq!(Coordinate::hours_minutes_seconds_to_degrees(23, 0, 0), 345.0);
    }

    #[test]
    fn test_hms_to_degrees_minutes_and_seconds() {
        // 30 minutes = half an hour = 7.5 degrees
        assert_eq!(Coordinate::hours_minutes_seconds_to_degrees(0, 30, 0), 7.5);
        // 30 seconds = 0.125 degrees
        assert_eq!(Coordinate::hours_minutes_seconds_to_degrees(0, 0, 30), 0.125);
    }

    #[test]
    fn test_new_derives_right_ascension() {
        let coordinate = Coordinate::new(6, 30, 0, -45.0);
        assert_eq!(coordinate.right_ascension, 97.5);
        assert_eq!(coordinate.declination, -45.0);
    }
}
