use std::io::Write;

use super::{EchoSummary, Formatter, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, summary: &EchoSummary) -> String {
        format!(
            "{},{},{:.4},{},{:.6},{},{},{}",
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

    fn header(&self) -> Option<&'static str> {
        Some(
            "ts,peak_index,peak_value,aligned_peak_index,peak_time_secs,envelope_len,group_delay_samples,sample_rate",
        )
    }
}

/// Write an envelope as `index,seconds,value` rows for offline plotting.
pub fn export_envelope_csv<W: Write>(
    writer: &mut W,
    envelope: &[f32],
    sample_rate: u32,
) -> std::io::Result<()> {
    writeln!(writer, "index,seconds,value")?;
    for (i, &value) in envelope.iter().enumerate() {
        writeln!(
            writer,
            "{},{:.6},{:.6}",
            i,
            i as f64 / sample_rate as f64,
            value
        )?;
    }
    Ok(())
}
