use super::{Formatter, ProcessingReport, iso8601_timestamp};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &ProcessingReport) -> String {
        serde_json::json!({
            "ts": iso8601_timestamp(),
            "input": report.input,
            "output": report.output,
            "mode": report.kind,
            "capacity": report.capacity,
            "sample_rate": report.sample_rate,
            "samples": report.samples,
            "latency_samples": report.latency_samples,
            "input_peak": report.input_peak,
            "output_peak": report.output_peak,
        })
        .to_string()
    }
}
