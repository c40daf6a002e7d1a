use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, LabError, LabResult};

/// Physical parameters of a driven, damped mass-spring system
///
/// m·x'' + c·x' + k·x = b·cos(ω·t)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorParams {
    /// Mass (kg), must be > 0
    pub mass: f64,
    /// Spring constant (N/m), must be > 0
    pub spring_constant: f64,
    /// Damping coefficient (N·s/m), must be >= 0
    pub damping: f64,
    /// Amplitude of the driving force (N)
    pub drive_amplitude: f64,
    /// Angular frequency of the driving force (rad/s)
    pub drive_frequency: f64,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            spring_constant: 1.0,
            damping: 0.2,
            drive_amplitude: 0.0,
            drive_frequency: 2.5,
        }
    }
}

impl OscillatorParams {
    /// Undriven, undamped oscillator
    pub fn free(mass: f64, spring_constant: f64) -> Self {
        Self {
            mass,
            spring_constant,
            damping: 0.0,
            drive_amplitude: 0.0,
            drive_frequency: 0.0,
        }
    }

    pub fn with_damping(self, damping: f64) -> Self {
        Self { damping, ..self }
    }

    pub fn with_drive(self, amplitude: f64, frequency: f64) -> Self {
        Self {
            drive_amplitude: amplitude,
            drive_frequency: frequency,
            ..self
        }
    }

    pub fn validate(&self) -> LabResult<()> {
        ensure_positive("mass", self.mass)?;
        ensure_positive("spring_constant", self.spring_constant)?;
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(LabError::invalid(
                "damping",
                self.damping,
                "must be finite and >= 0",
            ));
        }
        if !self.drive_amplitude.is_finite() || !self.drive_frequency.is_finite() {
            return Err(LabError::invalid(
                "drive",
                self.drive_amplitude,
                "drive amplitude and frequency must be finite",
            ));
        }
        Ok(())
    }

    /// ω₀ = √(k/m)
    pub fn natural_frequency(&self) -> f64 {
        (self.spring_constant / self.mass).sqrt()
    }

    /// λ = c / 2m
    pub fn decay_rate(&self) -> f64 {
        self.damping / (2.0 * self.mass)
    }

    /// c² < 4mk
    pub fn is_underdamped(&self) -> bool {
        self.damping * self.damping < 4.0 * self.mass * self.spring_constant
    }

    /// Net force divided by mass at time `t` for the given state.
    pub fn acceleration(&self, t: f64, position: f64, velocity: f64) -> f64 {
        (self.drive_amplitude * (self.drive_frequency * t).cos()
            - self.damping * velocity
            - self.spring_constant * position)
            / self.mass
    }

    /// Kinetic plus spring potential energy, ½mv² + ½kx²
    pub fn mechanical_energy(&self, position: f64, velocity: f64) -> f64 {
        0.5 * self.mass * velocity * velocity + 0.5 * self.spring_constant * position * position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(OscillatorParams::default().validate().is_ok());
        assert!(OscillatorParams::free(0.0, 1.0).validate().is_err());
        assert!(OscillatorParams::free(1.0, -1.0).validate().is_err());
        assert!(OscillatorParams::free(1.0, 1.0)
            .with_damping(-0.1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_derived_quantities() {
        let p = OscillatorParams::free(0.05, 1.0).with_damping(0.01);
        assert!((p.natural_frequency() - 20f64.sqrt()).abs() < 1e-12);
        assert!((p.decay_rate() - 0.1).abs() < 1e-12);
        assert!(p.is_underdamped());
        assert!(!OscillatorParams::free(1.0, 1.0).with_damping(2.0).is_underdamped());
    }

    #[test]
    fn test_acceleration_terms() {
        let p = OscillatorParams::free(2.0, 4.0)
            .with_damping(1.0)
            .with_drive(2.0, 0.0);
        // (2·cos(0) - 1·3 - 4·1) / 2
        assert_eq!(p.acceleration(5.0, 1.0, 3.0), -2.5);
    }
}
