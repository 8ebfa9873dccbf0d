use super::noise::{apply_awgn, create_rng};

/// One reflected propagation path.
#[derive(Clone, Debug)]
pub struct EchoPath {
    /// Round-trip delay relative to the direct path, in samples
    pub delay_samples: usize,
    /// Reflection amplitude relative to the direct path
    pub amplitude: f32,
}

/// Synthetic capture description: a direct path, reflected paths, and
/// optional additive noise.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    pub seed: Option<u64>,
    /// AWGN level; `None` leaves the capture noise-free
    pub snr_db: Option<f32>,
    /// Direct-path (speaker-to-microphone leak) amplitude
    pub direct_path_amplitude: f32,
    pub echoes: Vec<EchoPath>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            snr_db: None,
            direct_path_amplitude: 1.0,
            echoes: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f32) -> Self {
        self.snr_db = Some(snr_db);
        self
    }

    pub fn with_echo(mut self, delay_samples: usize, amplitude: f32) -> Self {
        self.echoes.push(EchoPath {
            delay_samples,
            amplitude,
        });
        self
    }

    pub fn with_direct_path(mut self, amplitude: f32) -> Self {
        self.direct_path_amplitude = amplitude;
        self
    }
}

/// Simulate what the microphone would capture for a transmit signal.
///
/// Sums the direct path and each delayed, scaled echo, then applies seeded
/// AWGN if configured. Output length is the transmit length plus the
/// longest echo delay. Deterministic under a fixed seed.
pub fn synthesize_capture(transmit: &[f32], config: &SimulationConfig) -> Vec<f32> {
    let max_delay = config
        .echoes
        .iter()
        .map(|e| e.delay_samples)
        .max()
        .unwrap_or(0);

    let mut capture = vec![0.0f32; transmit.len() + max_delay];

    for (i, &s) in transmit.iter().enumerate() {
        capture[i] += s * config.direct_path_amplitude;
    }
    for echo in &config.echoes {
        for (i, &s) in transmit.iter().enumerate() {
            capture[i + echo.delay_samples] += s * echo.amplitude;
        }
    }

    if let Some(snr_db) = config.snr_db {
        let mut rng = create_rng(config.seed);
        apply_awgn(&mut capture, snr_db, &mut rng);
    }

    capture
}
