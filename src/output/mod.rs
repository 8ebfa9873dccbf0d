mod csv;
mod json;
mod text;

use chrono::Utc;

pub use self::csv::{CsvFormatter, export_envelope_csv};
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

use crate::processing::EchoProfile;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One-line summary of a matched-filter analysis.
pub struct EchoSummary {
    pub peak_index: usize,
    pub peak_value: f32,
    pub aligned_peak_index: usize,
    pub envelope_len: usize,
    pub group_delay_samples: usize,
    pub sample_rate: u32,
}

impl EchoSummary {
    pub fn from_profile(profile: &EchoProfile, sample_rate: u32) -> Self {
        Self {
            peak_index: profile.peak_index,
            peak_value: profile.peak_value,
            aligned_peak_index: profile.aligned_peak_index(),
            envelope_len: profile.envelope.len(),
            group_delay_samples: profile.group_delay_samples,
            sample_rate,
        }
    }

    /// Peak position in seconds, group delay removed
    pub fn peak_time_secs(&self) -> f64 {
        self.aligned_peak_index as f64 / self.sample_rate as f64
    }
}

pub trait Formatter: Send {
    fn format(&self, summary: &EchoSummary) -> String;

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

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> EchoSummary {
        EchoSummary {
            peak_index: 305,
            peak_value: 64.25,
            aligned_peak_index: 255,
            envelope_len: 611,
            group_delay_samples: 50,
            sample_rate: 44_100,
        }
    }

    #[test]
    fn test_peak_time() {
        let s = summary();
        assert!((s.peak_time_secs() - 255.0 / 44_100.0).abs() < 1e-12);
    }

    #[test]
    fn test_text_formatter_mentions_peak() {
        let line = create_formatter(OutputFormat::Text, false).format(&summary());
        assert!(line.contains("305"), "missing peak index: {}", line);
    }

    #[test]
    fn test_json_formatter_parses() {
        let line = create_formatter(OutputFormat::Json, false).format(&summary());
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["peak_index"], 305);
        assert_eq!(value["group_delay_samples"], 50);
    }

    #[test]
    fn test_csv_formatter_field_count() {
        let formatter = create_formatter(OutputFormat::Csv, false);
        let header_fields = formatter.header().unwrap().split(',').count();
        let row_fields = formatter.format(&summary()).split(',').count();
        assert_eq!(header_fields, row_fields);
    }
}
