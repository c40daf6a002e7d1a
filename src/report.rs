//! Runs every configured scenario and collects the series for an external sink.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::circuit::{cutoff_frequency, FrequencyPoint};
use crate::config::{Config, OscillatorConfig};
use crate::error::LabResult;
use crate::oscillator::{
    peak, resonance_curve, simulate, OscillatorParams, ResonancePoint, UnderdampedSolution,
};
use crate::solar::{
    day_profile, first_day_of_month, month_energy, optimal_fixed_altitude, year_energy,
    AltitudeSweep, DayProfile, MonthProfile, YearProfile,
};

/// June, zero-based
const SUMMER_MONTH: usize = 5;
const WINTER_MONTH: usize = 0;
/// Mid-January day index for the winter day comparison
const WINTER_DAY: u32 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct OscillatorReport {
    pub time: Vec<f64>,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytic_position: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytic_max_deviation: Option<f64>,
    /// Undriven runs, one per configured damping
    pub damping_family: Vec<TrajectorySeries>,
    /// Driven runs, one per drive frequency ratio
    pub drive_family: Vec<TrajectorySeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transient: Option<TrajectorySeries>,
}

/// Position over time for one parameter variant
#[derive(Debug, Clone, Serialize)]
pub struct TrajectorySeries {
    pub damping: f64,
    pub drive_frequency: f64,
    pub time: Vec<f64>,
    pub position: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResonanceReport {
    pub damping: f64,
    pub curve: Vec<ResonancePoint>,
    pub peak: Option<ResonancePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RlcReport {
    pub resonant_frequency_hz: f64,
    pub cutoff_frequency_hz: Option<f64>,
    pub response: Vec<FrequencyPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolarReport {
    /// Clear-sky January day, fixed panel
    pub winter_day_fixed: DayProfile,
    /// Clear-sky January day, tracking panel
    pub winter_day_tracking: DayProfile,
    /// Clear-sky midsummer day, fixed panel
    pub summer_day_fixed: DayProfile,
    /// Clear-sky midsummer day, tracking panel
    pub summer_day_tracking: DayProfile,
    pub winter_month: MonthProfile,
    pub summer_month: MonthProfile,
    pub year: YearProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude_sweep: Option<AltitudeSweep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub oscillator: OscillatorReport,
    pub resonance: Vec<ResonanceReport>,
    pub rlc: RlcReport,
    pub solar: SolarReport,
}

impl Report {
    pub fn run<R: Rng>(cfg: &Config, rng: &mut R) -> LabResult<Self> {
        Ok(Self {
            oscillator: oscillator_report(cfg)?,
            resonance: resonance_report(cfg)?,
            rlc: rlc_report(cfg)?,
            solar: solar_report(cfg, rng)?,
        })
    }
}

fn oscillator_report(cfg: &Config) -> LabResult<OscillatorReport> {
    let osc = &cfg.oscillator;
    let trajectory = simulate(
        &osc.params,
        osc.initial_position,
        osc.initial_velocity,
        osc.total_time,
        osc.dt,
    )?;
    let time = trajectory.times();

    let analytic = if cfg.analytic.enabled && osc.params.is_underdamped() {
        Some(UnderdampedSolution::new(
            &osc.params,
            cfg.analytic.amplitude,
            cfg.analytic.phase_deg.to_radians(),
        )?)
    } else {
        None
    };
    let analytic_max_deviation = analytic.map(|a| a.max_deviation(&trajectory));

    info!(
        steps = trajectory.len(),
        final_position = trajectory.final_state().map(|s| s.position),
        analytic_max_deviation,
        "oscillator simulated"
    );

    let damping_family = osc
        .dampings
        .iter()
        .map(|&damping| {
            let params = osc.params.with_damping(damping);
            trajectory_series(&params, osc, osc.total_time, osc.dt, 1)
        })
        .collect::<LabResult<Vec<_>>>()?;

    let w0 = osc.drive_params.natural_frequency();
    let drive_family = osc
        .drive_frequency_ratios
        .iter()
        .map(|&ratio| {
            let params = osc
                .drive_params
                .with_drive(osc.drive_params.drive_amplitude, ratio * w0);
            trajectory_series(&params, osc, osc.total_time, osc.dt, 1)
        })
        .collect::<LabResult<Vec<_>>>()?;

    let transient = if osc.transient.enabled {
        let t = &osc.transient;
        Some(trajectory_series(
            &t.params,
            osc,
            t.total_time,
            t.dt,
            t.output_stride,
        )?)
    } else {
        None
    };

    debug!(
        dampings = damping_family.len(),
        drive_frequencies = drive_family.len(),
        transient = transient.is_some(),
        "oscillator families simulated"
    );

    Ok(OscillatorReport {
        analytic_position: analytic.map(|a| a.evaluate(&time)),
        analytic_max_deviation,
        position: trajectory.positions(),
        velocity: trajectory.velocities(),
        time,
        damping_family,
        drive_family,
        transient,
    })
}

/// Simulate from the configured initial state, keeping every `stride`-th sample.
fn trajectory_series(
    params: &OscillatorParams,
    osc: &OscillatorConfig,
    total_time: f64,
    dt: f64,
    stride: usize,
) -> LabResult<TrajectorySeries> {
    let trajectory = simulate(
        params,
        osc.initial_position,
        osc.initial_velocity,
        total_time,
        dt,
    )?;
    let (time, position): (Vec<f64>, Vec<f64>) = trajectory
        .states
        .iter()
        .step_by(stride.max(1))
        .map(|s| (s.time, s.position))
        .unzip();
    Ok(TrajectorySeries {
        damping: params.damping,
        drive_frequency: params.drive_frequency,
        time,
        position,
    })
}

fn resonance_report(cfg: &Config) -> LabResult<Vec<ResonanceReport>> {
    let res = &cfg.resonance;
    let w0 = res.params.natural_frequency();
    res.dampings
        .iter()
        .map(|&damping| -> LabResult<ResonanceReport> {
            let params = res.params.with_damping(damping);
            let curve = resonance_curve(&params, w0 - 1.0, w0 + 1.0, res.points)?;
            Ok(ResonanceReport {
                damping,
                peak: peak(&curve),
                curve,
            })
        })
        .collect()
}

fn rlc_report(cfg: &Config) -> LabResult<RlcReport> {
    let rlc = &cfg.rlc;
    let response = rlc
        .circuit
        .frequency_response(rlc.start_exp, rlc.end_exp, rlc.points)?;
    let report = RlcReport {
        resonant_frequency_hz: rlc.circuit.resonant_frequency(),
        cutoff_frequency_hz: cutoff_frequency(&response),
        response,
    };
    info!(
        resonant_frequency_hz = report.resonant_frequency_hz,
        cutoff_frequency_hz = report.cutoff_frequency_hz,
        "rlc response computed"
    );
    Ok(report)
}

fn solar_report<R: Rng>(cfg: &Config, rng: &mut R) -> LabResult<SolarReport> {
    let solar = &cfg.solar;
    let summer_day = first_day_of_month(SUMMER_MONTH)?;

    let winter_day_fixed = day_profile(&solar.panel, WINTER_DAY, 24.0, false, rng)?;
    let winter_day_tracking = day_profile(&solar.panel, WINTER_DAY, 24.0, true, rng)?;
    let summer_day_fixed = day_profile(&solar.panel, summer_day, 24.0, false, rng)?;
    let summer_day_tracking = day_profile(&solar.panel, summer_day, 24.0, true, rng)?;
    let winter_month = month_energy(
        &solar.panel,
        &solar.sun_hours,
        WINTER_MONTH,
        solar.follow_sun,
        rng,
    )?;
    let summer_month = month_energy(
        &solar.panel,
        &solar.sun_hours,
        SUMMER_MONTH,
        solar.follow_sun,
        rng,
    )?;
    let year = year_energy(&solar.panel, &solar.sun_hours, solar.follow_sun, rng)?;

    let altitude_sweep = if solar.altitude_sweep_deg.is_empty() {
        None
    } else {
        let sweep =
            optimal_fixed_altitude(&solar.panel, &solar.sun_hours, &solar.altitude_sweep_deg, rng)?;
        info!(
            best_altitude_deg = sweep.best_altitude_deg,
            best_kwh = sweep.best_kwh,
            "altitude sweep"
        );
        Some(sweep)
    };

    info!(
        winter_kwh = winter_month.total_kwh,
        summer_kwh = summer_month.total_kwh,
        year_kwh = year.total_kwh,
        clear_sky_year_kwh = year.clear_sky_total_kwh(),
        "solar energy estimated"
    );

    Ok(SolarReport {
        winter_day_fixed,
        winter_day_tracking,
        summer_day_fixed,
        summer_day_tracking,
        winter_month,
        summer_month,
        year,
        altitude_sweep,
    })
}
