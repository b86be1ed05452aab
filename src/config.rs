//! Configuration for delay lines and FIR filters.
//!
//! Every section has defaults, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! [buffer]
//! capacity = 512
//!
//! [fir]
//! taps = [0.25, 0.5, 0.25]
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::{CircularBuffer, Sample};
use crate::constants::{DEFAULT_CAPACITY, DEFAULT_DELAY_SAMPLES};
use crate::error::{BufferError, Result};
use crate::signal_processing::{DelayLine, FirFilter};

/// Which processor to build from a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorKind {
    /// Fixed-depth sample delay line
    #[default]
    Delay,
    /// FIR filter with caller-supplied taps
    Fir,
}

impl fmt::Display for ProcessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorKind::Delay => write!(f, "delay"),
            ProcessorKind::Fir => write!(f, "fir"),
        }
    }
}

/// Comma-separated list of FIR tap coefficients
///
/// # Example
/// ```
/// use ringtap::config::TapList;
///
/// let taps: TapList = "0.5, 0.5".parse().unwrap();
/// assert_eq!(taps.0, vec![0.5, 0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TapList(pub Vec<f64>);

impl FromStr for TapList {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("tap list is empty".to_string());
        }

        s.split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| format!("invalid tap coefficient: {}", part))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(TapList)
    }
}

/// Top-level processor configuration
///
/// Use `ProcessorConfig::default()` for a 256-slot buffer, zero delay and
/// no taps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Processor to build when none is given on the command line
    pub kind: ProcessorKind,
    /// Circular buffer geometry shared by both processors
    pub buffer: BufferConfig,
    /// Delay line parameters
    pub delay: DelayConfig,
    /// FIR filter parameters
    pub fir: FirConfig,
}

/// Circular buffer geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Number of slots
    pub capacity: usize,
    /// Reject capacities that are not a power of two instead of
    /// falling back to modulo wraparound
    pub require_power_of_two: bool,
}

/// Delay line parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    /// Delay in samples; must be below the buffer capacity
    pub delay_samples: usize,
}

/// FIR filter parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FirConfig {
    /// Tap coefficients, most recent sample first
    pub taps: Vec<f64>,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            require_power_of_two: false,
        }
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            delay_samples: DEFAULT_DELAY_SAMPLES,
        }
    }
}

impl BufferConfig {
    /// Build an empty buffer with this geometry
    pub fn build<T: Sample>(&self) -> Result<CircularBuffer<T>> {
        if self.require_power_of_two {
            CircularBuffer::new_power_of_two(self.capacity)
        } else {
            CircularBuffer::new(self.capacity)
        }
    }
}

impl ProcessorConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| BufferError::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Build a delay line from the buffer and delay sections
    pub fn delay_line<T: Sample>(&self) -> Result<DelayLine<T>> {
        DelayLine::with_buffer(self.delay.delay_samples, self.buffer.build()?)
    }

    /// Build a FIR filter from the buffer and fir sections
    pub fn fir_filter(&self) -> Result<FirFilter<f64>> {
        FirFilter::with_buffer(self.fir.taps.clone(), self.buffer.build()?)
    }
}
