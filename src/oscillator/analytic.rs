//! Closed-form underdamped solution used as a reference curve for the Euler integrator.

use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};

use super::{OscillatorParams, Trajectory};

/// x(t) = A·e^(-λt)·sin(βt + δ)
///
/// Amplitude and phase are calibration constants supplied by the caller. They
/// are not solved from the initial conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnderdampedSolution {
    pub amplitude: f64,
    pub phase_rad: f64,
    /// λ = c / 2m
    pub decay_rate: f64,
    /// β = √(ω₀² - λ²)
    pub damped_frequency: f64,
}

impl UnderdampedSolution {
    pub fn new(params: &OscillatorParams, amplitude: f64, phase_rad: f64) -> LabResult<Self> {
        params.validate()?;
        if !params.is_underdamped() {
            return Err(LabError::invalid(
                "damping",
                params.damping,
                "closed-form solution requires c² < 4mk",
            ));
        }
        let decay_rate = params.decay_rate();
        let w0 = params.natural_frequency();
        Ok(Self {
            amplitude,
            phase_rad,
            decay_rate,
            damped_frequency: (w0 * w0 - decay_rate * decay_rate).sqrt(),
        })
    }

    pub fn position(&self, t: f64) -> f64 {
        self.amplitude
            * (-self.decay_rate * t).exp()
            * (self.damped_frequency * t + self.phase_rad).sin()
    }

    pub fn evaluate(&self, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.position(t)).collect()
    }

    /// Largest absolute gap between the numerical positions and this curve.
    pub fn max_deviation(&self, trajectory: &Trajectory) -> f64 {
        trajectory
            .states
            .iter()
            .map(|s| (s.position - self.position(s.time)).abs())
            .fold(0.0, f64::max)
    }
}
