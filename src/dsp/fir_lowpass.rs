use crate::constants::{MAX_NORMALIZED_CUTOFF, MIN_NORMALIZED_CUTOFF, SINC_EPSILON};
use crate::dsp::chirp::hamming;
use crate::error::{Result, SonarError};

/// Low-pass FIR design parameters.
///
/// `cutoff_normalized` is the cutoff frequency as a fraction of the sample
/// rate (cycles per sample), so the valid range is the open interval
/// (0, 0.5).
#[derive(Debug, Clone, Copy)]
pub struct FirFilterSpec {
    /// Number of coefficients; must be odd for Type I linear phase
    pub num_taps: usize,
    /// Cutoff as a fraction of the sample rate, in (0, 0.5)
    pub cutoff_normalized: f64,
}

impl FirFilterSpec {
    /// Spec from a cutoff in Hz at a given sample rate
    pub fn from_hz(num_taps: usize, cutoff_hz: f64, sample_rate: u32) -> Self {
        Self {
            num_taps,
            cutoff_normalized: cutoff_hz / sample_rate as f64,
        }
    }
}

/// Linear-phase low-pass FIR filter
///
/// Windowed-sinc (Hamming) design. Coefficients are symmetric and
/// normalized to unit DC gain, so a constant input passes through at
/// unchanged level and the group delay is exactly `(num_taps − 1) / 2`
/// samples.
pub struct FirLowpass {
    coeffs: Vec<f64>,
}

impl FirLowpass {
    /// Design the filter from a spec
    ///
    /// # Errors
    /// Returns `SonarError::InvalidParameter` when `num_taps` is zero or
    /// even, or the normalized cutoff lies outside (0, 0.5).
    pub fn design(spec: &FirFilterSpec) -> Result<Self> {
        if spec.num_taps == 0 {
            return Err(SonarError::InvalidParameter(
                "filter length must be at least 1".to_string(),
            ));
        }
        if spec.num_taps.is_multiple_of(2) {
            return Err(SonarError::InvalidParameter(format!(
                "filter length must be odd, got {}",
                spec.num_taps
            )));
        }
        let fc = spec.cutoff_normalized;
        if !fc.is_finite() || fc <= MIN_NORMALIZED_CUTOFF || fc >= MAX_NORMALIZED_CUTOFF {
            return Err(SonarError::InvalidParameter(format!(
                "normalized cutoff must lie in (0, 0.5), got {}",
                fc
            )));
        }

        let n = spec.num_taps;
        let center = (n - 1) / 2;
        let window = hamming(n);

        let mut coeffs = Vec::with_capacity(n);
        for (i, &w) in window.iter().enumerate() {
            let m = i as f64 - center as f64;
            let sinc = if m.abs() < SINC_EPSILON {
                2.0 * fc
            } else {
                (2.0 * std::f64::consts::PI * fc * m).sin() / (std::f64::consts::PI * m)
            };
            coeffs.push(sinc * w);
        }

        // Unit DC gain
        let sum: f64 = coeffs.iter().sum();
        for c in &mut coeffs {
            *c /= sum;
        }

        Ok(Self { coeffs })
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.coeffs.len()
    }

    /// Get the group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        (self.coeffs.len() - 1) / 2
    }

    /// Get access to the tap coefficients
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Full linear convolution of the input with the coefficients
    ///
    /// Output length is `input.len() + num_taps − 1`.
    ///
    /// # Errors
    /// Returns `SonarError::InvalidInput` if the input is empty.
    pub fn convolve(&self, input: &[f32]) -> Result<Vec<f32>> {
        if input.is_empty() {
            return Err(SonarError::InvalidInput(
                "convolution input must be non-empty".to_string(),
            ));
        }

        let nt = self.coeffs.len();
        let li = input.len();
        let out_len = li + nt - 1;

        let mut out = Vec::with_capacity(out_len);
        for k in 0..out_len {
            let j_start = (k + 1).saturating_sub(li);
            let j_end = nt.min(k + 1);

            let mut acc = 0.0f64;
            for j in j_start..j_end {
                acc += self.coeffs[j] * input[k - j] as f64;
            }
            out.push(acc as f32);
        }

        Ok(out)
    }
}
