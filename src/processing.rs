use crate::config::SonarConfig;
use crate::dsp::{FirLowpass, build_pulse_train, correlate, generate_chirp, smooth_with};
use crate::error::{Result, SonarError};

/// Matched-filter analysis of one capture.
pub struct EchoProfile {
    /// Raw cross-correlation of the capture against the reference chirp
    pub correlation: Vec<f32>,
    /// Rectified, low-pass smoothed detection envelope
    pub envelope: Vec<f32>,
    /// Index of the envelope maximum
    pub peak_index: usize,
    /// Value of the envelope maximum
    pub peak_value: f32,
    /// Group delay of the smoothing filter in samples
    pub group_delay_samples: usize,
}

impl EchoProfile {
    /// Envelope peak position with the filter's group delay removed, as an
    /// index into the raw correlation.
    pub fn aligned_peak_index(&self) -> usize {
        self.peak_index.saturating_sub(self.group_delay_samples)
    }
}

/// Bundles the reference chirp and envelope filter for repeated analysis
///
/// The chirp is synthesized and the low-pass designed once at
/// construction; every `analyze` call is then a pure transform over the
/// supplied capture.
pub struct SonarProcessor {
    chirp: Vec<f32>,
    lowpass: FirLowpass,
    config: SonarConfig,
}

impl SonarProcessor {
    pub fn new(config: &SonarConfig) -> Result<Self> {
        let chirp = generate_chirp(&config.chirp)?;
        let lowpass = FirLowpass::design(&config.filter_spec())?;
        Ok(Self {
            chirp,
            lowpass,
            config: config.clone(),
        })
    }

    /// The synthesized reference pulse
    pub fn reference_chirp(&self) -> &[f32] {
        &self.chirp
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.chirp.sample_rate
    }

    /// Build the configured transmit pulse train
    pub fn transmit_train(&self) -> Result<Vec<f32>> {
        build_pulse_train(
            &self.chirp,
            self.config.chirp.sample_rate,
            self.config.train.pulse_count,
            self.config.train.gap_fraction,
        )
    }

    /// Matched-filter a capture against the reference chirp
    ///
    /// # Errors
    /// Returns `SonarError::InvalidInput` for an empty capture.
    pub fn analyze(&self, captured: &[f32]) -> Result<EchoProfile> {
        if captured.is_empty() {
            return Err(SonarError::InvalidInput(
                "capture must be non-empty".to_string(),
            ));
        }

        let correlation = correlate(captured, &self.chirp)?;
        let envelope = smooth_with(&correlation, &self.lowpass)?;

        let (peak_index, peak_value) = envelope
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| x.total_cmp(y))
            .map(|(i, &v)| (i, v))
            .unwrap_or((0, 0.0));

        Ok(EchoProfile {
            correlation,
            envelope,
            peak_index,
            peak_value,
            group_delay_samples: self.lowpass.group_delay_samples(),
        })
    }

    /// Analyze the reference chirp against itself.
    ///
    /// Characterizes the matched filter's own resolution: main-lobe width
    /// and side-lobe level with no echo channel in the way.
    pub fn autocorrelation_profile(&self) -> Result<EchoProfile> {
        let chirp = self.chirp.clone();
        self.analyze(&chirp)
    }

    /// Envelope restricted to the configured window around the peak
    pub fn envelope_window(&self, profile: &EchoProfile) -> Vec<f32> {
        let half = self.config.envelope.peak_half_width;
        let start = profile.peak_index.saturating_sub(half);
        let end = (profile.peak_index + half).min(profile.envelope.len());
        profile.envelope[start..end].to_vec()
    }
}
