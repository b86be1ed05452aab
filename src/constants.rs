//! Default construction parameters
//!
//! These are the values a buffer gets when the caller (or a config file)
//! leaves them unspecified.

/// Default number of slots in a circular buffer.
/// A power of two, so wraparound uses a bitmask.
pub const DEFAULT_CAPACITY: usize = 256;

/// Default delay line depth in samples.
pub const DEFAULT_DELAY_SAMPLES: usize = 0;
