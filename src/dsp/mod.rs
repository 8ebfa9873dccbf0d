pub mod chirp;
pub mod correlate;
pub mod envelope;
pub mod fir_lowpass;
pub mod pulse_train;

pub use chirp::{ChirpParams, generate_chirp, hamming};
pub use correlate::{correlate, zero_lag_index};
pub use envelope::{
    DEFAULT_PEAK_HALF_WIDTH, smooth_envelope, smooth_envelope_around, smooth_with,
};
pub use fir_lowpass::{FirFilterSpec, FirLowpass};
pub use pulse_train::{build_pulse_train, gap_length};
