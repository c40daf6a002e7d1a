//! Explicit (forward) Euler integration of the driven, damped oscillator.
//!
//! Each step only looks back one sample:
//!
//! ```text
//! v[i] = v[i-1] + a[i-1]·dt
//! x[i] = x[i-1] + v[i-1]·dt
//! a[i] = (b·cos(ω·t[i]) - c·v[i] - k·x[i]) / m
//! ```
//!
//! The acceleration is evaluated after position and velocity have been advanced,
//! so the trajectory carries the usual one-step phase lag of forward Euler. The
//! global error is O(dt) and there is no step size control; accuracy is entirely
//! in the hands of the caller's `dt`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_positive, LabError, LabResult};
use crate::numeric::step_count;

use super::OscillatorParams;

/// Oscillator state at one time step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

/// Ordered sequence of states sampled every `dt` from t = 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub dt: f64,
    pub states: Vec<State>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn times(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.time).collect()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.position).collect()
    }

    pub fn velocities(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.velocity).collect()
    }

    pub fn accelerations(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.acceleration).collect()
    }

    pub fn final_state(&self) -> Option<&State> {
        self.states.last()
    }

    /// Mechanical energy at every step.
    pub fn energies(&self, params: &OscillatorParams) -> Vec<f64> {
        self.states
            .iter()
            .map(|s| params.mechanical_energy(s.position, s.velocity))
            .collect()
    }
}

/// Integrate the oscillator from `(x0, v0)` over `[0, total_time)` with step `dt`.
///
/// Returns `⌈total_time / dt⌉` states; the first one is exactly the initial condition.
pub fn simulate(
    params: &OscillatorParams,
    x0: f64,
    v0: f64,
    total_time: f64,
    dt: f64,
) -> LabResult<Trajectory> {
    params.validate()?;
    let dt = ensure_positive("dt", dt)?;
    let steps = step_count(total_time, dt)?;
    if !(x0.is_finite() && v0.is_finite()) {
        return Err(LabError::invalid(
            "initial_state",
            x0,
            "initial position and velocity must be finite",
        ));
    }

    debug!(
        steps,
        dt,
        mass = params.mass,
        damping = params.damping,
        drive_frequency = params.drive_frequency,
        "integrating oscillator"
    );

    let mut states = Vec::new();
    states.try_reserve_exact(steps).map_err(|_| {
        LabError::invalid("dt", dt, format!("cannot allocate {steps} samples"))
    })?;
    let mut prev = State {
        time: 0.0,
        position: x0,
        velocity: v0,
        acceleration: params.acceleration(0.0, x0, v0),
    };
    states.push(prev);

    for i in 1..steps {
        let time = i as f64 * dt;
        let velocity = prev.velocity + prev.acceleration * dt;
        let position = prev.position + prev.velocity * dt;
        let next = State {
            time,
            position,
            velocity,
            acceleration: params.acceleration(time, position, velocity),
        };
        states.push(next);
        prev = next;
    }

    Ok(Trajectory { dt, states })
}
