use crate::buffer::{CircularBuffer, Sample};
use crate::error::{BufferError, Result};
use crate::signal_processing::Filter;

/// FIR filter over a circular sample history
///
/// Holds the tap coefficients and a circular buffer of past inputs. There
/// is no read pointer: `compute` always convolves against the samples just
/// behind the write pointer, `taps[0]` weighting the most recent insertion
/// and `taps[i]` the one inserted `i + 1` steps ago. Tap values are
/// supplied by the caller.
#[derive(Debug, Clone)]
pub struct FirFilter<T: Sample> {
    taps: Vec<T>,
    buffer: CircularBuffer<T>,
}

impl<T: Sample> FirFilter<T> {
    /// Create a new FIR filter with the given tap coefficients
    ///
    /// # Arguments
    /// * `taps` - Coefficients, most recent sample first
    /// * `capacity` - History slots; must exceed the number of taps
    ///
    /// # Errors
    /// Returns `BufferError::InvalidCapacity` if `capacity` is zero, or
    /// `BufferError::TooManyTaps` if `taps.len() >= capacity`
    pub fn new(taps: Vec<T>, capacity: usize) -> Result<Self> {
        Self::with_buffer(taps, CircularBuffer::new(capacity)?)
    }

    /// Create a FIR filter over an existing buffer
    ///
    /// # Errors
    /// Returns `BufferError::TooManyTaps` if `taps.len() >= buffer.capacity()`
    pub fn with_buffer(taps: Vec<T>, buffer: CircularBuffer<T>) -> Result<Self> {
        if taps.len() >= buffer.capacity() {
            return Err(BufferError::TooManyTaps {
                taps: taps.len(),
                capacity: buffer.capacity(),
            });
        }

        log::debug!(
            "FIR filter: {} taps over {} slots ({:?} wraparound)",
            taps.len(),
            buffer.capacity(),
            buffer.wrap()
        );

        Ok(Self { taps, buffer })
    }

    /// Insert a sample into the history
    pub fn insert(&mut self, sample: T) {
        self.buffer.insert(sample);
    }

    /// Convolve the taps with the most recent history
    ///
    /// Pure read: neither the store nor the write pointer changes. Calling
    /// this before any insert convolves the zero-filled history. The
    /// accumulation order is fixed (most recent sample first) so floating
    /// point results are reproducible.
    ///
    /// # Panics
    /// With integer sample kinds, each product and the running sum use the
    /// sample type's own arithmetic, so they panic on overflow in debug
    /// builds and wrap in release builds. Pick an integer kind wide enough
    /// for `sum(|sample| * |tap|)`, e.g. `i64` for 16-bit audio.
    pub fn compute(&self) -> T {
        let history = self.buffer.as_slice();
        let write_ptr = self.buffer.write_ptr();
        let n = self.taps.len();

        let mut output = T::ZERO;

        // Iterate the ring in two contiguous reverse ranges to avoid
        // modulo arithmetic in the inner convolution loop.
        let mut tap_i = 0usize;
        for delay_idx in (0..write_ptr).rev().take(n) {
            output = output + history[delay_idx] * self.taps[tap_i];
            tap_i += 1;
        }
        let remaining = n - tap_i;
        for delay_idx in (write_ptr..history.len()).rev().take(remaining) {
            output = output + history[delay_idx] * self.taps[tap_i];
            tap_i += 1;
        }
        debug_assert_eq!(tap_i, n);

        output
    }

    /// Zero the history, leaving the write pointer in place
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Get the group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        self.taps.len().saturating_sub(1) / 2
    }

    /// Get access to the tap coefficients
    pub fn taps(&self) -> &[T] {
        &self.taps
    }

    pub fn write_ptr(&self) -> usize {
        self.buffer.write_ptr()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Underlying circular buffer
    pub fn buffer(&self) -> &CircularBuffer<T> {
        &self.buffer
    }
}

impl<T: Sample> Filter<T> for FirFilter<T> {
    fn process(&mut self, sample: T) -> T {
        self.insert(sample);
        self.compute()
    }
}

macro_rules! impl_moving_average {
    ($($ty:ty),*) => {
        $(
            impl FirFilter<$ty> {
                /// Create a boxcar moving average over the last `window` samples
                ///
                /// # Errors
                /// Returns `BufferError::EmptyTaps` if `window` is zero, or
                /// `BufferError::TooManyTaps` if `window >= capacity`
                pub fn moving_average(window: usize, capacity: usize) -> Result<Self> {
                    if window == 0 {
                        return Err(BufferError::EmptyTaps);
                    }
                    Self::new(vec![1.0 / window as $ty; window], capacity)
                }
            }
        )*
    };
}

impl_moving_average!(f32, f64);
