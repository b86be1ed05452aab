mod csv;
mod json;
mod text;

use chrono::Utc;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

use crate::config::ProcessorKind;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Summary of one file run through a processor
pub struct ProcessingReport {
    pub input: String,
    pub output: String,
    pub kind: ProcessorKind,
    pub capacity: usize,
    pub sample_rate: u32,
    pub samples: usize,
    pub latency_samples: usize,
    pub input_peak: f32,
    pub output_peak: f32,
}

impl ProcessingReport {
    /// Latency converted to milliseconds at the file's sample rate
    pub fn latency_ms(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.latency_samples as f32 * 1000.0 / self.sample_rate as f32
    }
}

pub trait Formatter: Send {
    fn format(&self, report: &ProcessingReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Largest absolute sample value, 0.0 for an empty slice
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
pub(crate) fn sample_report() -> ProcessingReport {
    ProcessingReport {
        input: "in.wav".to_string(),
        output: "out.wav".to_string(),
        kind: ProcessorKind::Delay,
        capacity: 256,
        sample_rate: 48000,
        samples: 4800,
        latency_samples: 48,
        input_peak: 0.5,
        output_peak: 0.25,
    }
}
