//! # Harmonic Oscillator
//!
//! Driven, damped mass-spring system:
//!
//! - **Integrator**: explicit Euler trajectory of position, velocity and acceleration
//! - **Analytic**: calibrated closed-form underdamped curve for comparison
//! - **Resonance**: steady-state amplitude as a function of drive frequency

pub mod analytic;
pub mod integrator;
pub mod params;
pub mod resonance;

pub use analytic::UnderdampedSolution;
pub use integrator::{simulate, State, Trajectory};
pub use params::OscillatorParams;
pub use resonance::{
    default_resonance_curve, peak, resonance_curve, steady_state_amplitude, ResonancePoint,
};
