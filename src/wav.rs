use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{WavReader, WavSpec, WavWriter};

/// Write a mono float waveform to a WAV file.
pub fn save_wav<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Read a capture WAV file as a mono float waveform.
///
/// Accepts float or integer PCM; integer samples are normalized to
/// `[-1, 1]`. Multi-channel files are reduced to their first channel.
/// Returns the samples and the file's sample rate.
pub fn load_wav<P: AsRef<Path>>(path: P) -> anyhow::Result<(Vec<f32>, u32)> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    let interleaved = read_samples(reader, &spec)?;
    let channels = spec.channels as usize;
    let samples: Vec<f32> = if channels <= 1 {
        interleaved
    } else {
        interleaved.into_iter().step_by(channels).collect()
    };

    Ok((samples, spec.sample_rate))
}

fn read_samples(
    mut reader: WavReader<BufReader<File>>,
    spec: &hound::WavSpec,
) -> anyhow::Result<Vec<f32>> {
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_val = 2_i32.pow(spec.bits_per_sample as u32 - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}
