//! Series RLC low-pass filter with the output taken across the capacitor.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{ensure_positive, LabResult};
use crate::numeric::{check_sweep, logspace};

/// Gain drop that defines the filter cutoff
pub const CUTOFF_DB: f64 = -3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RlcCircuit {
    /// Resistance (Ω)
    pub resistance: f64,
    /// Inductance (H)
    pub inductance: f64,
    /// Capacitance (F)
    pub capacitance: f64,
}

impl Default for RlcCircuit {
    fn default() -> Self {
        Self {
            resistance: 500.0,
            inductance: 8.2e-3,
            capacitance: 100e-6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyPoint {
    pub frequency_hz: f64,
    pub gain_db: f64,
    pub phase_rad: f64,
}

impl RlcCircuit {
    pub fn new(resistance: f64, inductance: f64, capacitance: f64) -> LabResult<Self> {
        let circuit = Self {
            resistance,
            inductance,
            capacitance,
        };
        circuit.validate()?;
        Ok(circuit)
    }

    pub fn validate(&self) -> LabResult<()> {
        ensure_positive("resistance", self.resistance)?;
        ensure_positive("inductance", self.inductance)?;
        ensure_positive("capacitance", self.capacitance)?;
        Ok(())
    }

    /// Z = R + jωL + 1/(jωC)
    pub fn impedance(&self, frequency_hz: f64) -> Complex64 {
        let omega = 2.0 * PI * frequency_hz;
        Complex64::new(self.resistance, 0.0)
            + Complex64::new(0.0, omega * self.inductance)
            + self.capacitor_impedance(omega)
    }

    fn capacitor_impedance(&self, omega: f64) -> Complex64 {
        Complex64::new(0.0, omega * self.capacitance).inv()
    }

    /// H(f) = Z_C / Z
    pub fn transfer(&self, frequency_hz: f64) -> Complex64 {
        let omega = 2.0 * PI * frequency_hz;
        self.capacitor_impedance(omega) / self.impedance(frequency_hz)
    }

    /// 1 / (2π√(LC))
    pub fn resonant_frequency(&self) -> f64 {
        1.0 / (2.0 * PI * (self.inductance * self.capacitance).sqrt())
    }

    pub fn response_at(&self, frequency_hz: f64) -> FrequencyPoint {
        let h = self.transfer(frequency_hz);
        FrequencyPoint {
            frequency_hz,
            gain_db: 20.0 * h.norm().log10(),
            phase_rad: h.arg(),
        }
    }

    /// Bode data over `points` log-spaced frequencies between `10^start_exp` and `10^end_exp` Hz.
    pub fn frequency_response(
        &self,
        start_exp: f64,
        end_exp: f64,
        points: usize,
    ) -> LabResult<Vec<FrequencyPoint>> {
        self.validate()?;
        check_sweep(start_exp, end_exp, points)?;
        Ok(logspace(start_exp, end_exp, points)
            .into_iter()
            .map(|f| self.response_at(f))
            .collect())
    }

    /// 1 Hz to 1 MHz, 1000 points.
    pub fn default_frequency_response(&self) -> LabResult<Vec<FrequencyPoint>> {
        self.frequency_response(0.0, 6.0, 1000)
    }
}

/// First swept frequency where the gain falls below -3 dB.
pub fn cutoff_frequency(response: &[FrequencyPoint]) -> Option<f64> {
    response
        .iter()
        .find(|p| p.gain_db < CUTOFF_DB)
        .map(|p| p.frequency_hz)
}
