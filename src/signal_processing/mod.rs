pub mod delay_line;
pub mod filter;
pub mod fir_filter;

pub use delay_line::DelayLine;
pub use filter::Filter;
pub use fir_filter::FirFilter;
