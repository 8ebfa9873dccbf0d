mod echo;
mod noise;

pub use echo::{EchoPath, SimulationConfig, synthesize_capture};
pub use noise::{apply_awgn, signal_power};
