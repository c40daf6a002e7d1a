//! Monthly and yearly energy totals built from day profiles.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LabError, LabResult};

use super::day::{day_profile, HOURS_PER_DAY};
use super::panel::PanelConfig;

pub const DAYS_PER_YEAR: u32 = 365;
/// Non-leap year used to map day indices onto calendar months
const REFERENCE_YEAR: i32 = 2023;

pub const DAYS_IN_MONTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Sunshine record: total sun hours for each calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunHoursTable {
    pub monthly_hours: [f64; 12],
}

impl Default for SunHoursTable {
    fn default() -> Self {
        Self::visby()
    }
}

impl SunHoursTable {
    /// Visby, Sweden
    pub fn visby() -> Self {
        Self {
            monthly_hours: [
                41.0, 70.0, 156.0, 243.0, 317.0, 315.0, 314.0, 261.0, 188.0, 102.0, 42.0, 31.0,
            ],
        }
    }

    /// Every hour of every day counted as sunny
    pub fn full_sun() -> Self {
        let mut monthly_hours = [0.0; 12];
        for (hours, days) in monthly_hours.iter_mut().zip(DAYS_IN_MONTHS) {
            *hours = f64::from(days) * HOURS_PER_DAY as f64;
        }
        Self { monthly_hours }
    }

    /// Average sun hours per day in the zero-based `month`.
    pub fn daily_hours(&self, month: usize) -> LabResult<f64> {
        let month = check_month(month)?;
        Ok(self.monthly_hours[month] / f64::from(DAYS_IN_MONTHS[month]))
    }
}

/// Zero-based calendar month of the zero-based `day` index.
pub fn month_of_day(day: u32) -> LabResult<usize> {
    NaiveDate::from_yo_opt(REFERENCE_YEAR, day + 1)
        .filter(|_| day < DAYS_PER_YEAR)
        .map(|date| date.month0() as usize)
        .ok_or_else(|| LabError::invalid("day", f64::from(day), "must lie within [0, 365)"))
}

fn check_month(month: usize) -> LabResult<usize> {
    if month < DAYS_IN_MONTHS.len() {
        Ok(month)
    } else {
        Err(LabError::invalid("month", month as f64, "must lie within [0, 12)"))
    }
}

/// First zero-based day index of the zero-based `month`.
pub fn first_day_of_month(month: usize) -> LabResult<u32> {
    let month = check_month(month)?;
    Ok(DAYS_IN_MONTHS[..month].iter().sum())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthProfile {
    pub month: usize,
    pub first_day: u32,
    pub daily_kwh: Vec<f64>,
    pub total_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProfile {
    /// Energy per day with the sun-hour mask applied
    pub daily_kwh: Vec<f64>,
    /// Energy per day under a clear sky
    pub clear_sky_kwh: Vec<f64>,
    pub total_kwh: f64,
}

impl YearProfile {
    pub fn clear_sky_total_kwh(&self) -> f64 {
        self.clear_sky_kwh.iter().sum()
    }
}

/// Energy for each day of the zero-based `month`.
pub fn month_energy<R: Rng>(
    config: &PanelConfig,
    table: &SunHoursTable,
    month: usize,
    follow_sun: bool,
    rng: &mut R,
) -> LabResult<MonthProfile> {
    let first_day = first_day_of_month(month)?;
    let sun_hours = table.daily_hours(month)?;

    let daily_kwh = (first_day..first_day + DAYS_IN_MONTHS[month])
        .map(|day| {
            day_profile(config, day, sun_hours, follow_sun, rng).map(|profile| profile.energy_kwh())
        })
        .collect::<LabResult<Vec<f64>>>()?;
    let total_kwh: f64 = daily_kwh.iter().sum();

    debug!(month, total_kwh, "month energy");
    Ok(MonthProfile {
        month,
        first_day,
        daily_kwh,
        total_kwh,
    })
}

/// Energy for every day of the year, sun hours taken from each day's month.
pub fn year_energy<R: Rng>(
    config: &PanelConfig,
    table: &SunHoursTable,
    follow_sun: bool,
    rng: &mut R,
) -> LabResult<YearProfile> {
    let mut daily_kwh = Vec::with_capacity(DAYS_PER_YEAR as usize);
    let mut clear_sky_kwh = Vec::with_capacity(DAYS_PER_YEAR as usize);

    for day in 0..DAYS_PER_YEAR {
        let month = month_of_day(day)?;
        let profile = day_profile(config, day, table.daily_hours(month)?, follow_sun, rng)?;
        daily_kwh.push(profile.energy_kwh());
        clear_sky_kwh.push(profile.clear_sky_energy_kwh());
    }

    let total_kwh: f64 = daily_kwh.iter().sum();
    info!(total_kwh, follow_sun, "year energy");
    Ok(YearProfile {
        daily_kwh,
        clear_sky_kwh,
        total_kwh,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltitudeSweep {
    pub altitudes_deg: Vec<f64>,
    pub yearly_kwh: Vec<f64>,
    pub best_altitude_deg: f64,
    pub best_kwh: f64,
}

/// Yearly energy of a fixed panel at each candidate tilt, and the best one.
pub fn optimal_fixed_altitude<R: Rng>(
    config: &PanelConfig,
    table: &SunHoursTable,
    altitudes_deg: &[f64],
    rng: &mut R,
) -> LabResult<AltitudeSweep> {
    if altitudes_deg.is_empty() {
        return Err(LabError::invalid(
            "altitudes_deg",
            0.0,
            "at least one candidate altitude is required",
        ));
    }

    let yearly_kwh = altitudes_deg
        .iter()
        .map(|&alt| {
            year_energy(&config.with_altitude(alt), table, false, rng).map(|year| year.total_kwh)
        })
        .collect::<LabResult<Vec<f64>>>()?;

    let (best_idx, best_kwh) = yearly_kwh
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((0, 0.0));

    Ok(AltitudeSweep {
        altitudes_deg: altitudes_deg.to_vec(),
        best_altitude_deg: altitudes_deg[best_idx],
        best_kwh,
        yearly_kwh,
    })
}
