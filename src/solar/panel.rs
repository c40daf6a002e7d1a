//! # Panel Power
//!
//! Instantaneous power delivered by a flat PV panel, either fixed at a configured
//! altitude/azimuth or tracking the sun.
//!
//! 1. Sun position (declination, hour angle, elevation, azimuth)
//! 2. Irradiance on a horizontal surface from an empirical air-mass attenuation
//! 3. Projection of that irradiance onto the panel plane
//! 4. Power = irradiance × efficiency × area, clamped to a finite value >= 0

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;
use validator::Validate;

use crate::error::{ensure_finite, LabResult};

use super::geometry::SunPosition;

/// Upper bound (exclusive, W/m²) of the diffuse irradiance drawn for a non-sun hour
pub const OVERCAST_IRRADIANCE_MAX: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct PanelConfig {
    /// Site latitude in degrees (positive = north)
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude_deg: f64,
    /// Panel tilt above the horizon in degrees, used when not tracking
    #[validate(range(min = -90.0, max = 90.0))]
    pub altitude_deg: f64,
    /// Panel azimuth in degrees, used when not tracking
    #[validate(range(min = 0.0, max = 360.0))]
    pub azimuth_deg: f64,
    /// Conversion efficiency (0.0-1.0)
    #[validate(range(min = 0.0, max = 1.0))]
    pub efficiency: f64,
    /// Panel area in m²
    #[validate(range(exclusive_min = 0.0))]
    pub area_m2: f64,
    /// Irradiance at the top of the atmosphere (W/m²)
    #[validate(range(exclusive_min = 0.0))]
    pub solar_constant: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            latitude_deg: 57.6, // Visby
            altitude_deg: 44.4,
            azimuth_deg: 210.0,
            efficiency: 0.15,
            area_m2: 50.0,
            solar_constant: 1360.0,
        }
    }
}

impl PanelConfig {
    pub fn with_altitude(self, altitude_deg: f64) -> Self {
        Self {
            altitude_deg,
            ..self
        }
    }

    pub fn check(&self) -> LabResult<()> {
        self.validate()?;
        Ok(())
    }

    /// Clear-sky irradiance on a horizontal surface, 1.1·I₀·0.7^((1/sin θ)^0.678)
    ///
    /// NaN below the horizon, where the air mass term is negative.
    pub fn horizontal_irradiance(&self, elevation: f64) -> f64 {
        let air_mass = 1.0 / elevation.sin();
        1.1 * self.solar_constant * 0.7_f64.powf(air_mass.powf(0.678))
    }
}

/// Point in the year: day index in [0, 365) and hour of day in [0, 24)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarInstant {
    pub day: f64,
    pub hour: f64,
}

impl SolarInstant {
    pub fn new(day: f64, hour: f64) -> Self {
        Self { day, hour }
    }

    /// The given hours on one day.
    pub fn hours_of_day(day: f64, hours: &[f64]) -> Vec<Self> {
        hours.iter().map(|&hour| Self { day, hour }).collect()
    }
}

/// One evaluated instant with every intermediate of the power computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarSample {
    pub instant: SolarInstant,
    pub sun: SunPosition,
    /// Horizontal irradiance (W/m²), measured or drawn
    pub irradiance: f64,
    /// Delivered power (W), always finite and >= 0
    pub power: f64,
}

/// Projection factor of horizontal irradiance onto a panel at (`panel_alt`, `panel_az`).
fn incidence_factor(panel_alt: f64, panel_az: f64, sun: &SunPosition) -> f64 {
    let az_offset = (panel_az - sun.azimuth).cos();
    (panel_alt - sun.elevation).cos() * az_offset
        + (1.0 - az_offset) * panel_alt.sin() * sun.elevation.sin()
}

/// Map NaN/infinite or negative power to zero.
pub fn clamp_power(raw: f64) -> f64 {
    match ensure_finite("panel power", raw) {
        Ok(power) => power.max(0.0),
        Err(err) => {
            trace!(%err, "clamping power to zero");
            0.0
        }
    }
}

fn evaluate(
    config: &PanelConfig,
    instant: SolarInstant,
    follow_sun: bool,
    overcast_irradiance: Option<f64>,
) -> SolarSample {
    let sun = SunPosition::at(config.latitude_deg.to_radians(), instant.day, instant.hour);

    let (panel_alt, panel_az) = if follow_sun {
        (sun.elevation, sun.azimuth)
    } else {
        (config.altitude_deg.to_radians(), config.azimuth_deg.to_radians())
    };

    let irradiance =
        overcast_irradiance.unwrap_or_else(|| config.horizontal_irradiance(sun.elevation));
    let panel_irradiance = irradiance * incidence_factor(panel_alt, panel_az, &sun);

    SolarSample {
        instant,
        sun,
        irradiance,
        power: clamp_power(panel_irradiance * config.efficiency * config.area_m2),
    }
}

/// Evaluate one instant.
///
/// With `sun_hour == false` the horizontal irradiance is replaced by a uniform
/// integer draw in [0, 120) W/m² from `rng`; otherwise `rng` is untouched.
pub fn solar_sample<R: Rng>(
    config: &PanelConfig,
    instant: SolarInstant,
    follow_sun: bool,
    sun_hour: bool,
    rng: &mut R,
) -> SolarSample {
    let overcast = if sun_hour {
        None
    } else {
        Some(f64::from(rng.gen_range(0..OVERCAST_IRRADIANCE_MAX)))
    };
    evaluate(config, instant, follow_sun, overcast)
}

/// Deterministic clear-sky evaluation.
pub fn clear_sky_sample(config: &PanelConfig, instant: SolarInstant, follow_sun: bool) -> SolarSample {
    evaluate(config, instant, follow_sun, None)
}

/// Delivered power (W) at `day`, `hour`.
pub fn instantaneous_power<R: Rng>(
    config: &PanelConfig,
    day: f64,
    hour: f64,
    follow_sun: bool,
    sun_hour: bool,
    rng: &mut R,
) -> f64 {
    solar_sample(config, SolarInstant::new(day, hour), follow_sun, sun_hour, rng).power
}

/// Clear-sky power (W) at `day`, `hour`; bit-identical across calls.
pub fn clear_sky_power(config: &PanelConfig, day: f64, hour: f64, follow_sun: bool) -> f64 {
    clear_sky_sample(config, SolarInstant::new(day, hour), follow_sun).power
}

/// Power for each instant, with the same clamp as the scalar path.
pub fn power_series<R: Rng>(
    config: &PanelConfig,
    instants: &[SolarInstant],
    follow_sun: bool,
    sun_hour: bool,
    rng: &mut R,
) -> Vec<f64> {
    instants
        .iter()
        .map(|&instant| solar_sample(config, instant, follow_sun, sun_hour, rng).power)
        .collect()
}
