use crate::error::{Result, SonarError};
use serde::Deserialize;
use std::f64::consts::PI;

/// Parameters of a single linear chirp pulse.
///
/// The sweep runs from `f_min_hz` at the start of the pulse to `f_max_hz`
/// at the end, over `duration_secs` seconds sampled at `sample_rate`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChirpParams {
    /// Starting (lower) sweep frequency in Hz
    pub f_min_hz: f64,
    /// Ending (upper) sweep frequency in Hz
    pub f_max_hz: f64,
    /// Pulse duration in seconds
    pub duration_secs: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl ChirpParams {
    /// Check parameter consistency
    ///
    /// # Errors
    /// Returns `SonarError::InvalidParameter` for a non-positive duration
    /// or sample rate, a negative start frequency, or a sweep that does not
    /// ascend (`f_max <= f_min`).
    pub fn validate(&self) -> Result<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(SonarError::InvalidParameter(format!(
                "chirp duration must be positive, got {}",
                self.duration_secs
            )));
        }
        if self.sample_rate == 0 {
            return Err(SonarError::InvalidParameter(
                "sample rate must be positive".to_string(),
            ));
        }
        if !self.f_min_hz.is_finite() || self.f_min_hz < 0.0 {
            return Err(SonarError::InvalidParameter(format!(
                "start frequency must be non-negative, got {}",
                self.f_min_hz
            )));
        }
        if !self.f_max_hz.is_finite() || self.f_max_hz <= self.f_min_hz {
            return Err(SonarError::InvalidParameter(format!(
                "sweep must ascend: f_min={} Hz, f_max={} Hz",
                self.f_min_hz, self.f_max_hz
            )));
        }
        Ok(())
    }

    /// Number of samples in the pulse, never less than one
    pub fn num_samples(&self) -> usize {
        ((self.duration_secs * self.sample_rate as f64).round() as usize).max(1)
    }
}

/// Generate a single windowed linear chirp
///
/// Instantaneous phase follows the linear-chirp law
/// `phase(t) = 2π·(k/2·t² + f_min·t)` with sweep rate
/// `k = (f_max − f_min)/duration`, evaluated on a uniform time grid that
/// includes both endpoints `0` and `duration`. The raw sinusoid is tapered
/// with a Hamming window so the pulse edges go to near zero, suppressing
/// spectral side-lobes in the matched-filter response.
///
/// # Errors
/// Returns `SonarError::InvalidParameter` if the parameters are
/// inconsistent (see [`ChirpParams::validate`]).
pub fn generate_chirp(params: &ChirpParams) -> Result<Vec<f32>> {
    params.validate()?;

    let n = params.num_samples();
    let duration = params.duration_secs;
    let chirp_rate = (params.f_max_hz - params.f_min_hz) / duration;
    let window = hamming(n);

    let mut samples = Vec::with_capacity(n);
    for (i, &w) in window.iter().enumerate() {
        // Inclusive grid: t spans [0, duration] with spacing duration/(n-1)
        let t = if n > 1 {
            duration * i as f64 / (n - 1) as f64
        } else {
            0.0
        };
        let phase = 2.0 * PI * (chirp_rate / 2.0 * t * t + params.f_min_hz * t);
        samples.push((phase.sin() * w) as f32);
    }

    Ok(samples)
}

/// Symmetric Hamming taper of length `n`, unity at the center.
///
/// The single-sample taper degenerates to `[1.0]`.
pub fn hamming(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n.max(1)];
    }
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}
