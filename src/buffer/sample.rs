use std::fmt::Debug;
use std::ops::{Add, Mul};

/// Numeric sample stored in a circular buffer
///
/// A single buffer instance holds one homogeneous sample kind. The only
/// arithmetic the buffers need is a zero value for fills, addition for
/// accumulation, and multiplication for tap weighting.
pub trait Sample: Copy + PartialEq + Debug + Add<Output = Self> + Mul<Output = Self> {
    /// Value every slot holds after construction or `clear()`
    const ZERO: Self;
}

macro_rules! impl_sample {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Sample for $ty {
                const ZERO: Self = $zero;
            }
        )*
    };
}

impl_sample! {
    i16 => 0,
    i32 => 0,
    i64 => 0,
    f32 => 0.0,
    f64 => 0.0,
}
