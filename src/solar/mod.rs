//! # Solar Panel Energy
//!
//! Estimates the power and energy delivered by a PV panel at a fixed site.
//!
//! ## Components
//!
//! - **Geometry**: sun declination, hour angle, elevation and azimuth
//! - **Panel**: clear-sky irradiance, projection onto the panel and power clamp
//! - **Day**: 24-hour profile with a randomly placed sun-hour mask (cloud cover)
//! - **Year**: monthly/yearly energy totals and a fixed-tilt sweep
//!
//! ## Usage
//!
//! ```rust
//! use physics_lab::solar::{day_profile, PanelConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = PanelConfig::default();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // May 1st, ten hours of sunshine, panel tracking the sun
//! let profile = day_profile(&config, 121, 10.0, true, &mut rng).unwrap();
//! assert_eq!(profile.power_w.len(), 24);
//! assert_eq!(profile.sunlit_hours(), 10);
//! ```

pub mod day;
pub mod geometry;
pub mod panel;
pub mod year;

pub use day::{
    day_profile, daylight_window, sun_hour_mask, DayProfile, HOURS_PER_DAY, SUN_HOUR_THRESHOLD_W,
};
pub use geometry::{declination, hour_angle, SunPosition};
pub use panel::{
    clamp_power, clear_sky_power, clear_sky_sample, instantaneous_power, power_series,
    solar_sample, PanelConfig, SolarInstant, SolarSample,
};
pub use year::{
    first_day_of_month, month_energy, month_of_day, optimal_fixed_altitude, year_energy,
    AltitudeSweep, MonthProfile, SunHoursTable, YearProfile, DAYS_IN_MONTHS,
};
