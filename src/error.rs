use thiserror::Error;

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("Invalid capacity {0}: must be greater than zero")]
    InvalidCapacity(usize),

    #[error("Invalid capacity {0}: must be a power of two")]
    CapacityNotPowerOfTwo(usize),

    #[error("Invalid delay: {delay} samples needs a capacity above {delay}, have {capacity}")]
    InvalidDelay { delay: usize, capacity: usize },

    #[error("Too many taps: {taps} taps need a capacity above {taps}, have {capacity}")]
    TooManyTaps { taps: usize, capacity: usize },

    #[error("Filter needs at least one tap")]
    EmptyTaps,

    #[error("Buffer underrun: no new delayed sample ready, insert before reading again")]
    BufferUnderrun,

    #[error("Buffer overrun: all {capacity} slots hold unread samples")]
    BufferOverrun { capacity: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Expected mono WAV file, got {0} channels")]
    UnsupportedChannels(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BufferError>;
