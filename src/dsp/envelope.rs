use crate::dsp::fir_lowpass::{FirFilterSpec, FirLowpass};
use crate::error::{Result, SonarError};

/// Half-width of the focused analysis window around a correlation peak.
pub const DEFAULT_PEAK_HALF_WIDTH: usize = 50;

/// Rectify a correlation result and smooth it with an already-designed
/// low-pass filter.
///
/// The raw correlation oscillates at the chirp's carrier-like rate; the
/// absolute value collapses it into a positive envelope and the low-pass
/// suppresses the residual oscillation. Output length is
/// `corr.len() + num_taps − 1`, with the envelope peak delayed by the
/// filter's group delay.
///
/// # Errors
/// Returns `SonarError::InvalidInput` if the correlation input is empty.
pub fn smooth_with(corr: &[f32], filter: &FirLowpass) -> Result<Vec<f32>> {
    if corr.is_empty() {
        return Err(SonarError::InvalidInput(
            "correlation input must be non-empty".to_string(),
        ));
    }
    let rectified: Vec<f32> = corr.iter().map(|&x| x.abs()).collect();
    filter.convolve(&rectified)
}

/// Design a low-pass from `spec` and smooth the rectified correlation.
///
/// One-shot form of [`smooth_with`] for callers that do not reuse the
/// filter.
pub fn smooth_envelope(corr: &[f32], spec: &FirFilterSpec) -> Result<Vec<f32>> {
    let filter = FirLowpass::design(spec)?;
    smooth_with(corr, &filter)
}

/// Smoothed envelope restricted to a window around `center`.
///
/// Returns up to `2·half_width` samples spanning
/// `[center − half_width, center + half_width)`, clamped to the envelope
/// bounds — the focused view used to inspect a single correlation peak.
///
/// # Errors
/// `SonarError::InvalidInput` for an empty correlation input,
/// `SonarError::InvalidParameter` when `center` lies outside the smoothed
/// envelope.
pub fn smooth_envelope_around(
    corr: &[f32],
    spec: &FirFilterSpec,
    center: usize,
    half_width: usize,
) -> Result<Vec<f32>> {
    let envelope = smooth_envelope(corr, spec)?;
    if center >= envelope.len() {
        return Err(SonarError::InvalidParameter(format!(
            "window center {} outside envelope of length {}",
            center,
            envelope.len()
        )));
    }
    let start = center.saturating_sub(half_width);
    let end = (center + half_width).min(envelope.len());
    Ok(envelope[start..end].to_vec())
}
