pub mod circular;
pub mod sample;

pub use circular::{CircularBuffer, Wrap};
pub use sample::Sample;
