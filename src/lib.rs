//! Numerical physics lab: forward-Euler oscillator, resonance and RLC frequency
//! response, and a solar panel power/energy estimator.
//!
//! Every computation is a pure function over its inputs that returns plain
//! series and scalars. The only randomness is the sun-hour placement in the
//! solar day profile, which always draws from a caller-supplied [`rand::Rng`].

pub mod circuit;
pub mod config;
pub mod error;
pub mod numeric;
pub mod oscillator;
pub mod report;
pub mod solar;
pub mod telemetry;

pub use error::{LabError, LabResult};
