//! Lumped circuit frequency response.

pub mod rlc;

pub use rlc::{cutoff_frequency, FrequencyPoint, RlcCircuit, CUTOFF_DB};
