pub mod duplex;

pub use duplex::play_and_record;
