use crate::error::{Result, SonarError};

/// Full linear cross-correlation of `a` against `b`
///
/// `result[k] = Σ_n a[n]·b[n − k + len(b) − 1]` over all overlapping
/// indices, for `k = 0 .. len(a)+len(b)−2`; equivalent to reversing `b`
/// and convolving. No normalization is applied — peak values scale with
/// raw signal energy, and self-correlation peaks at the middle index with
/// the sum of squares of the input.
///
/// Accumulation is in f64; a long capture against a short reference sums
/// hundreds of products per lag and f32 accumulation visibly drifts.
///
/// # Errors
/// Returns `SonarError::InvalidInput` if either operand is empty.
pub fn correlate(a: &[f32], b: &[f32]) -> Result<Vec<f32>> {
    if a.is_empty() || b.is_empty() {
        return Err(SonarError::InvalidInput(
            "correlation operands must be non-empty".to_string(),
        ));
    }

    let la = a.len();
    let lb = b.len();
    let out_len = la + lb - 1;

    let mut out = Vec::with_capacity(out_len);
    for k in 0..out_len {
        let n_start = (k + 1).saturating_sub(lb);
        let n_end = la.min(k + 1);

        let mut acc = 0.0f64;
        for n in n_start..n_end {
            acc += a[n] as f64 * b[n + lb - 1 - k] as f64;
        }
        out.push(acc as f32);
    }

    Ok(out)
}

/// Index of the zero-lag alignment in a full correlation result.
///
/// For equal-length operands this is the anchor for peak-search windows.
pub fn zero_lag_index(result_len: usize) -> usize {
    result_len / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::chirp::{ChirpParams, generate_chirp};

    #[test]
    fn test_correlate_known_sequences() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [0.0f32, 1.0, 0.5];
        let c = correlate(&a, &b).unwrap();
        let expected = [0.5f32, 2.0, 3.5, 3.0, 0.0];
        assert_eq!(c.len(), expected.len());
        for (got, want) in c.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-6, "got {:?}, want {:?}", c, expected);
        }
    }

    #[test]
    fn test_correlate_length() {
        let a = vec![1.0f32; 100];
        let b = vec![1.0f32; 30];
        let c = correlate(&a, &b).unwrap();
        assert_eq!(c.len(), 129);
    }

    #[test]
    fn test_correlate_rejects_empty() {
        assert!(correlate(&[], &[1.0]).is_err());
        assert!(correlate(&[1.0], &[]).is_err());
    }

    #[test]
    fn test_autocorrelation_peaks_at_zero_lag() {
        let params = ChirpParams {
            f_min_hz: 200.0,
            f_max_hz: 12_000.0,
            duration_secs: 256.0 / 44_100.0,
            sample_rate: 44_100,
        };
        let chirp = generate_chirp(&params).unwrap();
        let auto = correlate(&chirp, &chirp).unwrap();

        assert_eq!(auto.len(), 2 * chirp.len() - 1);

        let mid = zero_lag_index(auto.len());
        assert_eq!(mid, chirp.len() - 1);

        let (peak_idx, peak_val) = auto
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| x.abs().total_cmp(&y.abs()))
            .unwrap();
        assert_eq!(peak_idx, mid, "autocorrelation peak off zero lag");

        // Cauchy-Schwarz equality: the zero-lag value is the pulse energy
        let energy: f64 = chirp.iter().map(|&s| s as f64 * s as f64).sum();
        assert!(
            (*peak_val as f64 - energy).abs() < energy * 1e-4,
            "peak {} vs energy {}",
            peak_val,
            energy
        );
    }

    #[test]
    fn test_zero_padding_preserves_alignment_peak() {
        let params = ChirpParams {
            f_min_hz: 200.0,
            f_max_hz: 12_000.0,
            duration_secs: 256.0 / 44_100.0,
            sample_rate: 44_100,
        };
        let chirp = generate_chirp(&params).unwrap();

        let mut padded = vec![0.0f32; 300];
        padded.extend_from_slice(&chirp);
        padded.extend(std::iter::repeat(0.0).take(300));

        let auto = correlate(&chirp, &chirp).unwrap();
        let padded_corr = correlate(&padded, &chirp).unwrap();

        let auto_peak = auto.iter().fold(0.0f32, |m, &v| m.max(v.abs()));
        let padded_peak = padded_corr.iter().fold(0.0f32, |m, &v| m.max(v.abs()));

        assert!(
            (auto_peak - padded_peak).abs() < auto_peak * 1e-5,
            "padding changed the alignment peak: {} vs {}",
            auto_peak,
            padded_peak
        );
    }
}
