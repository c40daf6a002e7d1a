//! Hourly power over one day with a random sun-hour mask.
//!
//! The clear-sky curve fixes a candidate daylight window. The day's known
//! sunshine duration decides how many hours of that window keep direct sun;
//! which ones is a uniform shuffle. The rest are re-evaluated with a diffuse
//! irradiance draw.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LabError, LabResult};

use super::panel::{clear_sky_sample, solar_sample, PanelConfig, SolarInstant};

pub const HOURS_PER_DAY: usize = 24;
/// Power (W) a clear-sky hour must exceed to open the daylight window
pub const SUN_HOUR_THRESHOLD_W: f64 = 120.0;
pub const WH_PER_KWH: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayProfile {
    pub day: u32,
    /// Delivered power (W) at each whole hour
    pub power_w: Vec<f64>,
    /// Deterministic clear-sky power (W) at each whole hour
    pub clear_sky_w: Vec<f64>,
    /// First hour of the daylight window
    pub first_hour: usize,
    /// One past the last hour of the daylight window
    pub last_hour: usize,
    /// Sun-hour flag for each hour of the window
    pub sun_mask: Vec<bool>,
}

impl DayProfile {
    pub fn window_len(&self) -> usize {
        self.last_hour - self.first_hour
    }

    pub fn sunlit_hours(&self) -> usize {
        self.sun_mask.iter().filter(|&&lit| lit).count()
    }

    /// Energy in kWh, one sample per hour.
    pub fn energy_kwh(&self) -> f64 {
        self.power_w.iter().sum::<f64>() / WH_PER_KWH
    }

    pub fn clear_sky_energy_kwh(&self) -> f64 {
        self.clear_sky_w.iter().sum::<f64>() / WH_PER_KWH
    }
}

/// Window `[first, last)`: opens at the first hour above the threshold and closes
/// at the next hour below it (or NaN). No opening gives an empty window; no
/// closing runs the window to the end of the day.
pub fn daylight_window(powers: &[f64]) -> (usize, usize) {
    let Some(first) = powers.iter().position(|&p| p > SUN_HOUR_THRESHOLD_W) else {
        return (0, 0);
    };
    let last = powers[first..]
        .iter()
        .position(|&p| p < SUN_HOUR_THRESHOLD_W || p.is_nan())
        .map_or(powers.len(), |offset| first + offset);
    (first, last)
}

/// Shuffled mask of `len` hours with exactly `min(sun_hours, len)` set.
pub fn sun_hour_mask<R: Rng>(sun_hours: usize, len: usize, rng: &mut R) -> Vec<bool> {
    let lit = sun_hours.min(len);
    let mut mask: Vec<bool> = std::iter::repeat(true)
        .take(lit)
        .chain(std::iter::repeat(false).take(len - lit))
        .collect();
    mask.shuffle(rng);
    mask
}

/// Hourly power for `day` given the day's sunshine duration in hours.
///
/// Fractional sun hours are truncated.
pub fn day_profile<R: Rng>(
    config: &PanelConfig,
    day: u32,
    available_sun_hours: f64,
    follow_sun: bool,
    rng: &mut R,
) -> LabResult<DayProfile> {
    config.check()?;
    if !(0.0..=HOURS_PER_DAY as f64).contains(&available_sun_hours) {
        return Err(LabError::invalid(
            "available_sun_hours",
            available_sun_hours,
            "must lie within [0, 24]",
        ));
    }

    let clear_sky_w: Vec<f64> = (0..HOURS_PER_DAY)
        .map(|hour| {
            clear_sky_sample(
                config,
                SolarInstant::new(f64::from(day), hour as f64),
                follow_sun,
            )
            .power
        })
        .collect();

    let (first_hour, last_hour) = daylight_window(&clear_sky_w);
    let sun_mask = sun_hour_mask(
        available_sun_hours as usize,
        last_hour - first_hour,
        rng,
    );

    let mut power_w = clear_sky_w.clone();
    for (hour, &lit) in (first_hour..last_hour).zip(&sun_mask) {
        power_w[hour] = solar_sample(
            config,
            SolarInstant::new(f64::from(day), hour as f64),
            follow_sun,
            lit,
            rng,
        )
        .power;
    }

    debug!(
        day,
        first_hour,
        last_hour,
        sunlit = sun_mask.iter().filter(|&&lit| lit).count(),
        "day profile"
    );

    Ok(DayProfile {
        day,
        power_w,
        clear_sky_w,
        first_hour,
        last_hour,
        sun_mask,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_daylight_window() {
        let powers = [0.0, 50.0, 130.0, 500.0, 121.0, 119.0, 300.0, 0.0];
        assert_eq!(daylight_window(&powers), (2, 5));
        assert_eq!(daylight_window(&[0.0, 10.0, 120.0]), (0, 0));
        assert_eq!(daylight_window(&[0.0, 200.0, 300.0]), (1, 3));
        // Exactly at the threshold neither opens nor closes the window
        assert_eq!(daylight_window(&[130.0, 120.0, 100.0]), (0, 2));
    }

    #[test]
    fn test_mask_counts() {
        let mut rng = StdRng::seed_from_u64(3);
        let mask = sun_hour_mask(4, 10, &mut rng);
        assert_eq!(mask.len(), 10);
        assert_eq!(mask.iter().filter(|&&b| b).count(), 4);
        let clamped = sun_hour_mask(30, 6, &mut rng);
        assert!(clamped.iter().all(|&b| b));
        assert!(sun_hour_mask(5, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_fractional_hours_truncate() {
        let config = PanelConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let profile = day_profile(&config, 121, 10.23, true, &mut rng).unwrap();
        assert_eq!(profile.sunlit_hours(), 10);
    }

    #[test]
    fn test_full_sun_is_clear_sky() {
        let config = PanelConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let profile = day_profile(&config, 172, 24.0, false, &mut rng).unwrap();
        assert_eq!(profile.power_w, profile.clear_sky_w);
        assert!(profile.sun_mask.iter().all(|&b| b));
    }

    #[test]
    fn test_rejects_out_of_range_hours() {
        let config = PanelConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(day_profile(&config, 10, 25.0, false, &mut rng).is_err());
        assert!(day_profile(&config, 10, -1.0, false, &mut rng).is_err());
        assert!(day_profile(&config, 10, f64::NAN, false, &mut rng).is_err());
    }

    #[test]
    fn test_same_seed_same_profile() {
        let config = PanelConfig::default();
        let a = day_profile(&config, 121, 6.0, true, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = day_profile(&config, 121, 6.0, true, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
