use super::{Formatter, ProcessingReport, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &ProcessingReport) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{:.4},{:.4}",
            iso8601_timestamp(),
            report.input,
            report.output,
            report.kind,
            report.capacity,
            report.sample_rate,
            report.samples,
            report.latency_samples,
            report.input_peak,
            report.output_peak
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,input,output,mode,capacity,sample_rate,samples,latency_samples,input_peak,output_peak")
    }
}
