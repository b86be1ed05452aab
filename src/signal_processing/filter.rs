use crate::buffer::Sample;

/// Common trait for one-in-one-out sample processors that cannot fail
///
/// Implemented by FirFilter.
pub trait Filter<T: Sample> {
    /// Process a single sample through the filter
    fn process(&mut self, sample: T) -> T;

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [T]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
