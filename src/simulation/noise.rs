use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Mean squared sample value.
pub fn signal_power(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f32>() / signal.len() as f32
}

/// Add white Gaussian noise at the requested SNR relative to the signal's
/// own power. A silent signal is left untouched.
pub fn apply_awgn(signal: &mut [f32], snr_db: f32, rng: &mut ChaCha8Rng) {
    let sig_power = signal_power(signal);
    if sig_power == 0.0 {
        return;
    }

    let snr_linear = 10.0_f32.powf(snr_db / 10.0);
    let noise_power = sig_power / snr_linear;
    let noise_std = noise_power.sqrt();

    let normal = Normal::new(0.0, noise_std as f64).unwrap();

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng) as f32;
    }
}
