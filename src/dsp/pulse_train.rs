use crate::error::{Result, SonarError};

/// Silence gap length in samples for a given repetition fraction.
///
/// `gap_fraction` is the silent time before each pulse as a fraction of one
/// second; the default 0.25 gives roughly four pulses per second.
pub fn gap_length(sample_rate: u32, gap_fraction: f64) -> usize {
    (sample_rate as f64 * gap_fraction).round() as usize
}

/// Repeat a chirp into a periodic transmit train
///
/// Each repetition is a block of silence followed by the chirp, so the
/// output length is exactly `pulse_count * (gap_length + chirp.len())`.
///
/// # Errors
/// Returns `SonarError::InvalidParameter` if `pulse_count` is zero or
/// `gap_fraction` is negative or non-finite, and `SonarError::InvalidInput`
/// if the chirp is empty.
pub fn build_pulse_train(
    chirp: &[f32],
    sample_rate: u32,
    pulse_count: usize,
    gap_fraction: f64,
) -> Result<Vec<f32>> {
    if chirp.is_empty() {
        return Err(SonarError::InvalidInput("empty chirp waveform".to_string()));
    }
    if pulse_count < 1 {
        return Err(SonarError::InvalidParameter(
            "pulse count must be at least 1".to_string(),
        ));
    }
    if !gap_fraction.is_finite() || gap_fraction < 0.0 {
        return Err(SonarError::InvalidParameter(format!(
            "gap fraction must be non-negative, got {}",
            gap_fraction
        )));
    }

    let gap = gap_length(sample_rate, gap_fraction);
    let mut train = Vec::with_capacity(pulse_count * (gap + chirp.len()));
    for _ in 0..pulse_count {
        train.resize(train.len() + gap, 0.0);
        train.extend_from_slice(chirp);
    }

    Ok(train)
}
