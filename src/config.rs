use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::circuit::RlcCircuit;
use crate::oscillator::OscillatorParams;
use crate::solar::{PanelConfig, SunHoursTable};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub oscillator: OscillatorConfig,
    pub analytic: AnalyticConfig,
    pub resonance: ResonanceConfig,
    pub rlc: RlcConfig,
    pub solar: SolarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OscillatorConfig {
    pub params: OscillatorParams,
    pub initial_position: f64,
    pub initial_velocity: f64,
    pub total_time: f64,
    pub dt: f64,
    /// Damping coefficients swept over `params`
    pub dampings: Vec<f64>,
    /// Base system for the drive-frequency family
    pub drive_params: OscillatorParams,
    /// Drive frequencies as multiples of the natural frequency of `drive_params`
    pub drive_frequency_ratios: Vec<f64>,
    pub transient: TransientConfig,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            params: OscillatorParams::default(),
            initial_position: 1.0,
            initial_velocity: 0.0,
            total_time: 10.0,
            dt: 0.001,
            dampings: vec![0.2, 2.0, 5.0],
            drive_params: OscillatorParams::free(0.05, 1.0)
                .with_damping(0.01)
                .with_drive(0.02, 0.0),
            drive_frequency_ratios: vec![0.5, 1.0, 1.5],
            transient: TransientConfig::default(),
        }
    }
}

/// Long driven run that settles from the transient into the steady state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransientConfig {
    pub enabled: bool,
    pub params: OscillatorParams,
    pub total_time: f64,
    pub dt: f64,
    /// Keep every n-th sample in the report
    pub output_stride: usize,
}

impl Default for TransientConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            params: OscillatorParams::free(1.0, 1.0)
                .with_damping(0.05)
                .with_drive(1.0, 2.0),
            total_time: 200.0,
            dt: 1e-4,
            output_stride: 100,
        }
    }
}

/// Calibration of the closed-form comparison curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticConfig {
    pub enabled: bool,
    pub amplitude: f64,
    pub phase_deg: f64,
}

impl Default for AnalyticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            amplitude: 1.01,
            phase_deg: 81.9106,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResonanceConfig {
    pub params: OscillatorParams,
    pub dampings: Vec<f64>,
    pub points: usize,
}

impl Default for ResonanceConfig {
    fn default() -> Self {
        Self {
            params: OscillatorParams::free(1.0, 1.0).with_drive(1.0, 0.0),
            dampings: vec![0.1, 0.2, 0.5, 1.0, 1.5],
            points: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RlcConfig {
    pub circuit: RlcCircuit,
    /// Sweep starts at 10^start_exp Hz
    pub start_exp: f64,
    /// Sweep ends at 10^end_exp Hz
    pub end_exp: f64,
    pub points: usize,
}

impl Default for RlcConfig {
    fn default() -> Self {
        Self {
            circuit: RlcCircuit::default(),
            start_exp: 0.0,
            end_exp: 6.0,
            points: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarConfig {
    pub panel: PanelConfig,
    pub sun_hours: SunHoursTable,
    pub follow_sun: bool,
    /// Candidate tilts for the fixed-panel sweep; empty skips the sweep
    pub altitude_sweep_deg: Vec<f64>,
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            panel: PanelConfig::default(),
            sun_hours: SunHoursTable::visby(),
            follow_sun: true,
            altitude_sweep_deg: Vec::new(),
            random_seed: None,
        }
    }
}

impl Config {
    /// Built-in defaults, overridden by `config/default.toml`, then `PHYSLAB__*` env vars.
    pub fn load() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("PHYSLAB__").split("__"))
    }
}
