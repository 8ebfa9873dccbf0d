//! Configuration for the sonar ranging experiment.
//!
//! Defaults reproduce the reference experiment: a 256-sample chirp sweeping
//! 200 Hz to 12 kHz at 44.1 kHz, sixteen pulses about a quarter second
//! apart, and a 101-tap envelope smoother cut off at 2 kHz.
//!
//! All sections are optional in the TOML file:
//!
//! ```toml
//! [train]
//! pulse_count = 8
//! gap_fraction = 0.5
//! ```

use serde::Deserialize;

use crate::dsp::{ChirpParams, DEFAULT_PEAK_HALF_WIDTH, FirFilterSpec};

/// System-wide experiment configuration
///
/// Use `SonarConfig::default()` for the reference experiment, or load a
/// TOML file with [`SonarConfig::from_toml_str`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SonarConfig {
    /// Reference chirp pulse parameters
    pub chirp: ChirpParams,
    /// Transmit pulse train shape
    pub train: PulseTrainConfig,
    /// Envelope smoothing filter parameters
    pub envelope: EnvelopeConfig,
    /// Audio device configuration
    pub audio: AudioConfig,
}

/// Transmit pulse train shape
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PulseTrainConfig {
    /// Number of chirp pulses in one transmission
    pub pulse_count: usize,
    /// Silence before each pulse, as a fraction of one second.
    /// 0.25 gives roughly four pulses per second.
    pub gap_fraction: f64,
}

/// Envelope smoothing filter parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Number of low-pass taps (must be odd)
    pub num_taps: usize,
    /// Low-pass cutoff in Hz
    pub cutoff_hz: f64,
    /// Half-width of the focused window around a correlation peak
    pub peak_half_width: usize,
}

/// Audio device configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Processing buffer size in samples
    pub buffer_size: usize,
    /// Extra recording time after playback drains, in seconds, so trailing
    /// echoes land in the capture
    pub record_tail_secs: f64,
}

impl SonarConfig {
    /// Parse a TOML configuration, filling omitted sections with defaults
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Envelope filter spec at the configured sample rate
    pub fn filter_spec(&self) -> FirFilterSpec {
        FirFilterSpec::from_hz(
            self.envelope.num_taps,
            self.envelope.cutoff_hz,
            self.chirp.sample_rate,
        )
    }
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self {
            chirp: default_chirp(),
            train: PulseTrainConfig::default(),
            envelope: EnvelopeConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

fn default_chirp() -> ChirpParams {
    ChirpParams {
        f_min_hz: 200.0,
        f_max_hz: 12_000.0,
        duration_secs: 256.0 / 44_100.0,
        sample_rate: 44_100,
    }
}

impl Default for PulseTrainConfig {
    fn default() -> Self {
        Self {
            pulse_count: 16,
            gap_fraction: 0.25,
        }
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            num_taps: 101,
            cutoff_hz: 2_000.0,
            peak_half_width: DEFAULT_PEAK_HALF_WIDTH,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1024,
            record_tail_secs: 0.25,
        }
    }
}
