use super::Sample;
use crate::error::{BufferError, Result};

/// Wraparound strategy for pointer arithmetic
///
/// Power-of-two capacities wrap with a bitmask. Any other capacity falls
/// back to true modulo arithmetic, which is slower but always correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    /// `index & mask`, where `mask = capacity - 1`
    Mask(usize),
    /// `index % capacity`
    Modulo,
}

impl Wrap {
    fn for_capacity(capacity: usize) -> Self {
        if capacity.is_power_of_two() {
            Wrap::Mask(capacity - 1)
        } else {
            Wrap::Modulo
        }
    }
}

/// Fixed-capacity circular sample buffer
///
/// Owns a zero-filled store and a write pointer. `insert` writes at the
/// write pointer and advances it one slot, wrapping to the start after the
/// last slot. Delay lines and FIR filters are built on top of this by
/// composition.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Sample> {
    store: Vec<T>,
    write_ptr: usize,
    wrap: Wrap,
}

impl<T: Sample> CircularBuffer<T> {
    /// Create a zero-filled buffer with `capacity` slots
    ///
    /// Non-power-of-two capacities are accepted and use modulo wraparound.
    ///
    /// # Errors
    /// Returns `BufferError::InvalidCapacity` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity(capacity));
        }

        let wrap = Wrap::for_capacity(capacity);
        if wrap == Wrap::Modulo {
            log::debug!(
                "Capacity {} is not a power of two, using modulo wraparound",
                capacity
            );
        }

        Ok(Self {
            store: vec![T::ZERO; capacity],
            write_ptr: 0,
            wrap,
        })
    }

    /// Create a zero-filled buffer whose capacity must be a power of two
    ///
    /// # Errors
    /// Returns `BufferError::InvalidCapacity` if `capacity` is zero, or
    /// `BufferError::CapacityNotPowerOfTwo` otherwise if it is not a power of two
    pub fn new_power_of_two(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity(capacity));
        }
        if !capacity.is_power_of_two() {
            return Err(BufferError::CapacityNotPowerOfTwo(capacity));
        }
        Self::new(capacity)
    }

    /// Write a sample at the write pointer and advance it one slot
    pub fn insert(&mut self, sample: T) {
        self.store[self.write_ptr] = sample;
        self.write_ptr = self.advance(self.write_ptr, 1);
    }

    /// Step `pointer` forward by `amount` slots, wrapping as many laps as needed
    ///
    /// The result is always in `[0, capacity)`.
    pub fn advance(&self, pointer: usize, amount: usize) -> usize {
        match self.wrap {
            // Wrapping add is exact here: 2^usize::BITS is a multiple of the capacity.
            Wrap::Mask(mask) => pointer.wrapping_add(amount) & mask,
            Wrap::Modulo => {
                let n = self.store.len();
                (pointer % n + amount % n) % n
            }
        }
    }

    /// Step `pointer` backward by `amount` slots, wrapping as many laps as needed
    ///
    /// The result is always in `[0, capacity)`, even when `pointer < amount`.
    pub fn retreat(&self, pointer: usize, amount: usize) -> usize {
        match self.wrap {
            Wrap::Mask(mask) => pointer.wrapping_sub(amount) & mask,
            Wrap::Modulo => {
                let n = self.store.len();
                (pointer % n + n - amount % n) % n
            }
        }
    }

    /// Overwrite every slot with zero, leaving the write pointer in place
    pub fn clear(&mut self) {
        self.store.fill(T::ZERO);
    }

    /// Same as [`clear`](Self::clear)
    pub fn empty(&mut self) {
        self.clear();
    }

    /// Sample at `index`, taken circularly
    pub fn get(&self, index: usize) -> T {
        self.store[self.advance(index, 0)]
    }

    /// Sample inserted `age + 1` insertions ago (`age` 0 is the most recent)
    pub fn peek(&self, age: usize) -> T {
        self.store[self.retreat(self.write_ptr, age.saturating_add(1))]
    }

    /// Get the latest `count` samples in chronological order (oldest to newest)
    ///
    /// `count` is capped at the capacity. Slots never written read as zero.
    pub fn latest(&self, count: usize) -> Vec<T> {
        let len = count.min(self.store.len());
        (0..len).rev().map(|age| self.peek(age)).collect()
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Index of the next slot `insert` will write
    pub fn write_ptr(&self) -> usize {
        self.write_ptr
    }

    /// Wraparound strategy chosen for this capacity
    pub fn wrap(&self) -> Wrap {
        self.wrap
    }

    /// Raw store in slot order (not chronological)
    pub fn as_slice(&self) -> &[T] {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        let result = CircularBuffer::<f32>::new(0);
        assert!(matches!(result, Err(BufferError::InvalidCapacity(0))));
    }

    #[test]
    fn test_wrap_selection() {
        assert_eq!(CircularBuffer::<f32>::new(8).unwrap().wrap(), Wrap::Mask(7));
        assert_eq!(CircularBuffer::<f32>::new(1).unwrap().wrap(), Wrap::Mask(0));
        assert_eq!(CircularBuffer::<f32>::new(6).unwrap().wrap(), Wrap::Modulo);
    }

    #[test]
    fn test_power_of_two_constructor() {
        assert!(CircularBuffer::<i32>::new_power_of_two(16).is_ok());
        assert!(matches!(
            CircularBuffer::<i32>::new_power_of_two(12),
            Err(BufferError::CapacityNotPowerOfTwo(12))
        ));
        assert!(matches!(
            CircularBuffer::<i32>::new_power_of_two(0),
            Err(BufferError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_insert_wraps_write_pointer() {
        let mut buf = CircularBuffer::new(4).unwrap();
        for i in 1..=5 {
            buf.insert(i);
        }
        assert_eq!(buf.write_ptr(), 1);
        assert_eq!(buf.as_slice(), &[5, 2, 3, 4]);
    }

    #[test]
    fn test_modulo_wraparound() {
        let buf = CircularBuffer::<f64>::new(6).unwrap();
        assert_eq!(buf.advance(4, 3), 1);
        assert_eq!(buf.advance(5, 13), 0);
        assert_eq!(buf.retreat(1, 3), 4);
        assert_eq!(buf.retreat(0, 13), 5);
    }

    #[test]
    fn test_extreme_amounts_do_not_overflow() {
        let masked = CircularBuffer::<f32>::new(8).unwrap();
        assert_eq!(masked.advance(7, usize::MAX), usize::MAX.wrapping_add(7) & 7);
        assert_eq!(masked.retreat(0, usize::MAX), 1);

        let modulo = CircularBuffer::<f32>::new(10).unwrap();
        assert_eq!(modulo.advance(9, usize::MAX), (9 + usize::MAX % 10) % 10);
        assert_eq!(modulo.retreat(0, usize::MAX), (10 - usize::MAX % 10) % 10);
    }

    #[test]
    fn test_peek_and_latest() {
        let mut buf = CircularBuffer::new(4).unwrap();
        for s in [1.0, 2.0, 3.0, 4.0, 5.0] {
            buf.insert(s);
        }
        assert_eq!(buf.peek(0), 5.0);
        assert_eq!(buf.peek(3), 2.0);
        assert_eq!(buf.latest(2), vec![4.0, 5.0]);
        assert_eq!(buf.latest(10), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_clear_keeps_write_pointer() {
        let mut buf = CircularBuffer::new(8).unwrap();
        buf.insert(3_i64);
        buf.insert(4);
        buf.clear();
        assert_eq!(buf.write_ptr(), 2);
        assert!(buf.as_slice().iter().all(|&s| s == 0));

        buf.empty();
        assert_eq!(buf.write_ptr(), 2);
    }
}
