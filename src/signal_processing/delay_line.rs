use crate::buffer::{CircularBuffer, Sample};
use crate::error::{BufferError, Result};

/// Fixed-depth sample delay line
///
/// A FIFO of depth `delay_samples` realized on a single circular buffer:
/// the read pointer trails the write pointer by the delay, and each `read`
/// consumes one slot. The circular distance from the read pointer forward
/// to the write pointer is the number of samples ready to read; equal
/// pointers mean nothing is ready.
///
/// # Example
/// ```
/// use ringtap::signal_processing::DelayLine;
///
/// let mut delay = DelayLine::new(2, 8).unwrap();
/// let out: Vec<i32> = [1, 2, 3, 4]
///     .into_iter()
///     .map(|s| delay.process(s).unwrap())
///     .collect();
/// assert_eq!(out, vec![0, 0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine<T: Sample> {
    buffer: CircularBuffer<T>,
    delay_samples: usize,
    read_ptr: usize,
}

impl<T: Sample> DelayLine<T> {
    /// Create a delay line of `delay_samples` over a fresh buffer of `capacity` slots
    ///
    /// # Errors
    /// Returns `BufferError::InvalidCapacity` if `capacity` is zero, or
    /// `BufferError::InvalidDelay` if `delay_samples >= capacity`
    pub fn new(delay_samples: usize, capacity: usize) -> Result<Self> {
        Self::with_buffer(delay_samples, CircularBuffer::new(capacity)?)
    }

    /// Create a delay line over an existing buffer
    ///
    /// The read pointer starts `delay_samples` slots behind the buffer's
    /// current write pointer.
    ///
    /// # Errors
    /// Returns `BufferError::InvalidDelay` if `delay_samples >= buffer.capacity()`
    pub fn with_buffer(delay_samples: usize, buffer: CircularBuffer<T>) -> Result<Self> {
        let capacity = buffer.capacity();
        if delay_samples >= capacity {
            return Err(BufferError::InvalidDelay {
                delay: delay_samples,
                capacity,
            });
        }

        let read_ptr = buffer.retreat(buffer.write_ptr(), delay_samples);
        log::debug!(
            "Delay line: {} samples in {} slots ({:?} wraparound)",
            delay_samples,
            capacity,
            buffer.wrap()
        );

        Ok(Self {
            buffer,
            delay_samples,
            read_ptr,
        })
    }

    /// Insert a sample, advancing the write pointer only
    ///
    /// Never fails. If every slot already holds an unread sample the write
    /// pointer catches up with the read pointer and the unread history is
    /// lost; use [`try_insert`](Self::try_insert) to refuse instead.
    pub fn insert(&mut self, sample: T) {
        self.buffer.insert(sample);
    }

    /// Insert a sample unless that would overwrite unread history
    ///
    /// # Errors
    /// Returns `BufferError::BufferOverrun` if the line is full
    pub fn try_insert(&mut self, sample: T) -> Result<()> {
        if self.is_full() {
            return Err(BufferError::BufferOverrun {
                capacity: self.buffer.capacity(),
            });
        }
        self.buffer.insert(sample);
        Ok(())
    }

    /// Read the next delayed sample and advance the read pointer
    ///
    /// # Errors
    /// Returns `BufferError::BufferUnderrun` if no sample has been inserted
    /// since the last successful read caught up with the write pointer
    pub fn read(&mut self) -> Result<T> {
        if self.read_ptr == self.buffer.write_ptr() {
            return Err(BufferError::BufferUnderrun);
        }

        let sample = self.buffer.get(self.read_ptr);
        self.read_ptr = self.buffer.advance(self.read_ptr, 1);
        Ok(sample)
    }

    /// Insert one sample and read one delayed sample
    ///
    /// Output `n` is input `n - delay_samples`; the first `delay_samples`
    /// outputs are the zero-filled priming slots. Works for every delay the
    /// constructor accepts, up to `capacity - 1`.
    ///
    /// # Errors
    /// Returns `BufferError::BufferUnderrun` or `BufferError::BufferOverrun`
    /// if earlier unpaired `insert`/`read` calls left the line empty or full
    pub fn process(&mut self, sample: T) -> Result<T> {
        if self.delay_samples == 0 {
            // Nothing is primed, so the sample must go in before it can come out.
            self.try_insert(sample)?;
            return self.read();
        }

        // Reading first frees a slot, so a delay of capacity - 1 never overruns.
        let out = self.read()?;
        self.try_insert(sample)?;
        Ok(out)
    }

    /// Process a buffer of samples in-place, stopping at the first error
    pub fn process_buffer(&mut self, buffer: &mut [T]) -> Result<()> {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample)?;
        }
        Ok(())
    }

    /// Number of samples ready to read
    pub fn available(&self) -> usize {
        // Distance from the read pointer forward to the write pointer.
        self.buffer.retreat(self.buffer.write_ptr(), self.read_ptr)
    }

    /// True when one more insert would make the pointers meet
    pub fn is_full(&self) -> bool {
        self.available() == self.buffer.capacity() - 1
    }

    /// Zero the store, leaving both pointers in place
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the delay in samples
    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    pub fn read_ptr(&self) -> usize {
        self.read_ptr
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_pointer_trails_by_delay() {
        let delay = DelayLine::<f32>::new(3, 8).unwrap();
        assert_eq!(delay.write_ptr(), 0);
        assert_eq!(delay.read_ptr(), 5);
        assert_eq!(delay.available(), 3);
    }

    #[test]
    fn test_zero_delay_underruns_until_insert() {
        let mut delay = DelayLine::<i32>::new(0, 4).unwrap();
        assert!(matches!(delay.read(), Err(BufferError::BufferUnderrun)));

        delay.insert(7);
        assert_eq!(delay.read().unwrap(), 7);
        assert!(matches!(delay.read(), Err(BufferError::BufferUnderrun)));
    }

    #[test]
    fn test_delay_must_be_below_capacity() {
        assert!(matches!(
            DelayLine::<f64>::new(4, 4),
            Err(BufferError::InvalidDelay {
                delay: 4,
                capacity: 4
            })
        ));
        assert!(DelayLine::<f64>::new(3, 4).is_ok());
        assert!(matches!(
            DelayLine::<f64>::new(0, 0),
            Err(BufferError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_try_insert_detects_overrun() {
        let mut delay = DelayLine::new(0, 4).unwrap();
        for s in 1..=3 {
            delay.try_insert(s).unwrap();
        }
        assert!(delay.is_full());
        assert!(matches!(
            delay.try_insert(4),
            Err(BufferError::BufferOverrun { capacity: 4 })
        ));
        assert_eq!(delay.write_ptr(), 3);

        assert_eq!(delay.read().unwrap(), 1);
        assert!(delay.try_insert(4).is_ok());
    }

    #[test]
    fn test_process_at_maximum_delay() {
        let mut delay = DelayLine::new(3, 4).unwrap();
        assert!(delay.is_full());

        let out: Vec<f64> = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
            .into_iter()
            .map(|s| delay.process(s).unwrap())
            .collect();
        assert_eq!(out, vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(delay.available(), 3);
    }

    #[test]
    fn test_process_every_valid_delay() {
        for delay_samples in 0..8 {
            let mut delay = DelayLine::new(delay_samples, 8).unwrap();
            let mut samples: Vec<i32> = (1..=20).collect();
            delay.process_buffer(&mut samples).unwrap();

            let expected: Vec<i32> = (1..=(20 - delay_samples as i32)).collect();
            assert!(samples[..delay_samples].iter().all(|&s| s == 0));
            assert_eq!(
                &samples[delay_samples..],
                expected.as_slice(),
                "delay {} misordered samples",
                delay_samples
            );
        }
    }

    #[test]
    fn test_process_reports_unpaired_reads() {
        let mut delay = DelayLine::new(1, 4).unwrap();
        assert_eq!(delay.read().unwrap(), 0);
        assert!(matches!(delay.process(5), Err(BufferError::BufferUnderrun)));
        assert_eq!(delay.write_ptr(), 0);
    }

    #[test]
    fn test_with_buffer_uses_current_write_pointer() {
        let mut buffer = CircularBuffer::new(8).unwrap();
        buffer.insert(10);
        buffer.insert(20);
        let mut delay = DelayLine::with_buffer(1, buffer).unwrap();
        assert_eq!(delay.read_ptr(), 1);
        assert_eq!(delay.read().unwrap(), 20);
    }

    #[test]
    fn test_process_buffer_in_place() {
        let mut delay = DelayLine::new(1, 8).unwrap();
        let mut samples = vec![1, 2, 3, 4];
        delay.process_buffer(&mut samples).unwrap();
        assert_eq!(samples, vec![0, 1, 2, 3]);
    }
}
