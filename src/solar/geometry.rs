//! Sun position from day of year and local solar time.
//!
//! All angles are radians. Azimuth is measured so that solar noon sits at π; the
//! morning/afternoon branch decides which side of π the arccos result lands on.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Earth's axial tilt in degrees
pub const AXIAL_TILT_DEG: f64 = 23.44;
/// Hour angle used in place of an exact zero at solar noon
pub const NOON_HOUR_ANGLE: f64 = 0.05;

/// δ = -23.44°·cos(360°/365·day)
pub fn declination(day: f64) -> f64 {
    -AXIAL_TILT_DEG.to_radians() * (360.0 / 365.0 * day).to_radians().cos()
}

/// h = 15°·hour - 180°, never exactly zero
pub fn hour_angle(hour: f64) -> f64 {
    let h = 15f64.to_radians() * hour - 180f64.to_radians();
    if h == 0.0 {
        NOON_HOUR_ANGLE
    } else {
        h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    pub declination: f64,
    pub hour_angle: f64,
    pub elevation: f64,
    pub azimuth: f64,
}

impl SunPosition {
    /// Position of the sun seen from `latitude` (radians) on `day` at `hour`.
    ///
    /// Elevation and azimuth come out NaN when their arcsin/arccos arguments
    /// leave [-1, 1] through rounding; the power stage maps that to zero.
    pub fn at(latitude: f64, day: f64, hour: f64) -> Self {
        let declination = declination(day);
        let hour_angle = hour_angle(hour);

        let elevation = (declination.sin() * latitude.sin()
            + declination.cos() * latitude.cos() * hour_angle.cos())
        .asin();

        let arc = ((latitude.sin() * elevation.sin() - declination.sin())
            / (latitude.cos() * elevation.cos()))
        .acos();
        let azimuth = if hour_angle > 0.0 { PI - arc } else { PI + arc };

        Self {
            declination,
            hour_angle,
            elevation,
            azimuth,
        }
    }

    pub fn is_above_horizon(&self) -> bool {
        self.elevation > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATITUDE: f64 = 57.6;

    #[test]
    fn test_declination_extremes() {
        assert!((declination(0.0) - -AXIAL_TILT_DEG.to_radians()).abs() < 1e-12);
        assert!((declination(182.5) - AXIAL_TILT_DEG.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_noon_hour_angle_guard() {
        assert_eq!(hour_angle(12.0), NOON_HOUR_ANGLE);
        assert!(hour_angle(6.0) < 0.0);
        assert!(hour_angle(18.0) > 0.0);
        assert!((hour_angle(0.0) + PI).abs() < 1e-12);
    }

    #[test]
    fn test_noon_elevation_matches_latitude_rule() {
        // Peak elevation ≈ 90° - φ + δ
        let pos = SunPosition::at(LATITUDE.to_radians(), 172.0, 12.0);
        let expected = 90.0 - LATITUDE + pos.declination.to_degrees();
        assert!((pos.elevation.to_degrees() - expected).abs() < 0.2);
        assert!(pos.is_above_horizon());
    }

    #[test]
    fn test_azimuth_branches_around_noon() {
        let lat = LATITUDE.to_radians();
        let morning = SunPosition::at(lat, 121.0, 9.0);
        let afternoon = SunPosition::at(lat, 121.0, 15.0);
        assert!(morning.azimuth > PI && morning.azimuth < 2.0 * PI);
        assert!(afternoon.azimuth < PI && afternoon.azimuth > 0.0);
        // Symmetric about noon
        assert!((morning.azimuth - PI - (PI - afternoon.azimuth)).abs() < 1e-9);
    }

    #[test]
    fn test_midnight_below_horizon_in_winter() {
        let pos = SunPosition::at(LATITUDE.to_radians(), 355.0, 0.0);
        assert!(!pos.is_above_horizon());
    }
}
