use super::{EchoSummary, Formatter};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, summary: &EchoSummary) -> String {
        if self.verbose {
            format!(
                "Envelope peak: {:>8.3} at sample {} ({:.4} s aligned) [envelope: {} samples, group delay: {}]",
                summary.peak_value,
                summary.peak_index,
                summary.peak_time_secs(),
                summary.envelope_len,
                summary.group_delay_samples
            )
        } else {
            format!(
                "Envelope peak: {:>8.3} at sample {} ({:.4} s aligned)",
                summary.peak_value,
                summary.peak_index,
                summary.peak_time_secs()
            )
        }
    }
}
