use super::{Formatter, ProcessingReport};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &ProcessingReport) -> String {
        let summary = format!(
            "{} -> {}: {} over {} slots, {} samples, latency {} samples ({:.2} ms)",
            report.input,
            report.output,
            report.kind,
            report.capacity,
            report.samples,
            report.latency_samples,
            report.latency_ms()
        );
        if self.verbose {
            format!(
                "{} [rate: {} Hz, peak in: {:.3}, peak out: {:.3}]",
                summary, report.sample_rate, report.input_peak, report.output_peak
            )
        } else {
            summary
        }
    }
}
