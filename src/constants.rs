//! Numeric constants for signal processing stability
//!
//! These constants define thresholds and epsilon values used throughout
//! the signal processing pipeline to ensure numerical stability.

/// Epsilon below which a sinc argument is treated as zero.
/// Used at the center tap of the windowed-sinc low-pass design.
pub const SINC_EPSILON: f64 = 1e-12;

/// Lower bound (exclusive) on the normalized cutoff frequency, in cycles
/// per sample. Designs at or below this are degenerate.
pub const MIN_NORMALIZED_CUTOFF: f64 = 0.0;

/// Upper bound (exclusive) on the normalized cutoff frequency. Half the
/// sample rate in cycles-per-sample terms.
pub const MAX_NORMALIZED_CUTOFF: f64 = 0.5;
