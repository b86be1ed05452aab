pub mod buffer;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod processing;
pub mod signal_processing;
pub mod wav;

pub use buffer::{CircularBuffer, Sample, Wrap};
pub use config::ProcessorConfig;
pub use error::{BufferError, Result};
pub use processing::Processor;
pub use signal_processing::{DelayLine, Filter, FirFilter};
pub use wav::save_wav;
