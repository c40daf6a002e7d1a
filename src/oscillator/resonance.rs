//! Steady-state amplitude of the driven oscillator as a function of drive frequency.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ensure_finite, LabResult};
use crate::numeric::{check_sweep, linspace};

use super::OscillatorParams;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonancePoint {
    pub drive_frequency: f64,
    pub amplitude: f64,
}

/// A(ω) = b / √(m²(ω² - ω₀²)² + c²ω²)
pub fn steady_state_amplitude(params: &OscillatorParams, drive_frequency: f64) -> f64 {
    let w0 = params.natural_frequency();
    let w = drive_frequency;
    let detuning = w * w - w0 * w0;
    params.drive_amplitude
        / (params.mass * params.mass * detuning * detuning
            + params.damping * params.damping * w * w)
            .sqrt()
}

/// Amplitude over `points` drive frequencies from `w_min` to `w_max` inclusive.
///
/// Frequencies where the amplitude is not finite (undamped drive exactly at ω₀)
/// are left out of the curve.
pub fn resonance_curve(
    params: &OscillatorParams,
    w_min: f64,
    w_max: f64,
    points: usize,
) -> LabResult<Vec<ResonancePoint>> {
    params.validate()?;
    check_sweep(w_min, w_max, points)?;

    Ok(linspace(w_min, w_max, points)
        .into_iter()
        .filter_map(|w| {
            match ensure_finite("resonance amplitude", steady_state_amplitude(params, w)) {
                Ok(amplitude) => Some(ResonancePoint {
                    drive_frequency: w,
                    amplitude,
                }),
                Err(err) => {
                    trace!(drive_frequency = w, %err, "dropping resonance sample");
                    None
                }
            }
        })
        .collect())
}

/// Sweep of ω₀ ± 1 with 100 samples.
pub fn default_resonance_curve(params: &OscillatorParams) -> LabResult<Vec<ResonancePoint>> {
    let w0 = params.natural_frequency();
    resonance_curve(params, w0 - 1.0, w0 + 1.0, 100)
}

/// Sample with the largest amplitude.
pub fn peak(curve: &[ResonancePoint]) -> Option<ResonancePoint> {
    curve
        .iter()
        .copied()
        .max_by(|a, b| a.amplitude.total_cmp(&b.amplitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn driven(damping: f64) -> OscillatorParams {
        OscillatorParams::free(1.0, 1.0)
            .with_damping(damping)
            .with_drive(1.0, 0.0)
    }

    #[test]
    fn test_amplitude_at_resonance() {
        // At ω = ω₀ only damping limits the response: A = b / (c·ω₀)
        let params = driven(0.5);
        assert!((steady_state_amplitude(&params, 1.0) - 2.0).abs() < 1e-12);
    }

    #[rstest]
    #[case(0.1)]
    #[case(0.2)]
    #[case(0.5)]
    fn test_peak_near_natural_frequency(#[case] damping: f64) {
        let params = driven(damping);
        let curve = default_resonance_curve(&params).unwrap();
        assert_eq!(curve.len(), 100);
        let top = peak(&curve).unwrap();
        assert!((top.drive_frequency - 1.0).abs() < 0.15);
    }

    #[test]
    fn test_peak_falls_with_damping() {
        let peaks: Vec<f64> = [0.1, 0.2, 0.5, 1.0, 1.5]
            .iter()
            .map(|&c| peak(&default_resonance_curve(&driven(c)).unwrap()).unwrap().amplitude)
            .collect();
        assert!(peaks.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_undamped_singularity_is_dropped() {
        let params = driven(0.0);
        let curve = resonance_curve(&params, 0.0, 2.0, 3).unwrap();
        // ω = 1 is the pole; ω = 0 and ω = 2 remain
        assert_eq!(curve.len(), 2);
        assert!(curve.iter().all(|p| p.amplitude.is_finite()));
    }

    #[test]
    fn test_invalid_sweep() {
        assert!(resonance_curve(&driven(0.1), 2.0, 0.0, 10).is_err());
    }
}
