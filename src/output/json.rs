use super::{EchoSummary, Formatter, iso8601_timestamp};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, summary: &EchoSummary) -> String {
        format!(
            r#"{{"ts":"{}","peak_index":{},"peak_value":{:.4},"aligned_peak_index":{},"peak_time_secs":{:.6},"envelope_len":{},"group_delay_samples":{},"sample_rate":{}}}"#,
            iso8601_timestamp(),
            summary.peak_index,
            summary.peak_value,
            summary.aligned_peak_index,
            summary.peak_time_secs(),
            summary.envelope_len,
            summary.group_delay_samples,
            summary.sample_rate
        )
    }
}
