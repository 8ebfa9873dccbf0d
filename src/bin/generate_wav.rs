use anyhow::{Context, Result};
use clap::Parser;
use echochamber::config::SonarConfig;
use echochamber::processing::SonarProcessor;
use echochamber::save_wav;
use echochamber::simulation::{SimulationConfig, synthesize_capture};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_wav")]
#[command(about = "Generate transmit trains and synthetic echo captures for sonar testing")]
struct Args {
    /// TOML experiment configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Echo delays in ms: comma-separated (e.g., "10,25,40") or range (e.g., "5-50:5")
    #[arg(short, long, default_value = "25")]
    delays: String,

    /// Echo amplitude relative to the direct path
    #[arg(long, default_value_t = 0.3)]
    echo_amplitude: f32,

    /// Direct-path (speaker-to-microphone leak) amplitude
    #[arg(long, default_value_t = 1.0)]
    direct_amplitude: f32,

    /// AWGN SNR in dB (omit for a noise-free capture)
    #[arg(long)]
    snr: Option<f32>,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of trials per delay
    #[arg(short, long, default_value_t = 1)]
    trials: u32,

    /// Also write the bare transmit train
    #[arg(long)]
    train: bool,

    /// Output filename prefix
    #[arg(long, default_value = "synth")]
    prefix: String,

    /// Generate manifest.json
    #[arg(long)]
    manifest: bool,
}

#[derive(Debug, serde::Serialize)]
struct ManifestEntry {
    file: String,
    delay_ms: f32,
    delay_samples: usize,
    trial: u32,
    seed: Option<u64>,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    sample_rate: u32,
    pulse_count: usize,
    echo_amplitude: f32,
    snr_db: Option<f32>,
    files: Vec<ManifestEntry>,
}

fn parse_delays(s: &str) -> Result<Vec<f32>> {
    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let step: f32 = parts[1].parse().context("Invalid step value")?;
        let range_parts: Vec<&str> = parts[0].split('-').collect();
        if range_parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let start: f32 = range_parts[0].parse().context("Invalid start value")?;
        let end: f32 = range_parts[1].parse().context("Invalid end value")?;

        let mut delays = Vec::new();
        let mut d = start;
        while d <= end {
            delays.push(d);
            d += step;
        }
        Ok(delays)
    } else {
        s.split(',')
            .map(|p| p.trim().parse::<f32>().context("Invalid delay value"))
            .collect()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).context("Failed to read config file")?;
            SonarConfig::from_toml_str(&text).context("Failed to parse config file")?
        }
        None => SonarConfig::default(),
    };

    let processor = SonarProcessor::new(&config)?;
    let sample_rate = processor.sample_rate();
    let transmit = processor.transmit_train()?;

    if args.train {
        let path = args.output_dir.join(format!("{}_train.wav", args.prefix));
        save_wav(&path, &transmit, sample_rate).context("Failed to write train WAV")?;
        eprintln!("Transmit train written to {}", path.display());
    }

    let delays = parse_delays(&args.delays)?;

    let mut manifest_entries = Vec::new();
    let total_files = delays.len() * args.trials as usize;
    let mut file_count = 0;

    for &delay_ms in &delays {
        let delay_samples = (delay_ms / 1000.0 * sample_rate as f32).round() as usize;

        for trial in 0..args.trials {
            let seed = args.seed.map(|s| s + trial as u64 * 1000 + delay_ms as u64);

            let mut sim = SimulationConfig::default()
                .with_direct_path(args.direct_amplitude)
                .with_echo(delay_samples, args.echo_amplitude);
            if let Some(snr) = args.snr {
                sim = sim.with_awgn(snr);
            }
            if let Some(seed) = seed {
                sim = sim.with_seed(seed);
            }

            let capture = synthesize_capture(&transmit, &sim);

            let filename = format!("{}_d{:04}_t{:02}.wav", args.prefix, delay_ms as i32, trial);
            let filepath = args.output_dir.join(&filename);
            save_wav(&filepath, &capture, sample_rate).context("Failed to write WAV file")?;

            manifest_entries.push(ManifestEntry {
                file: filename,
                delay_ms,
                delay_samples,
                trial,
                seed,
            });

            file_count += 1;
            eprint!("\rGenerating: {}/{}", file_count, total_files);
        }
    }
    eprintln!();

    if args.manifest {
        let manifest = Manifest {
            sample_rate,
            pulse_count: config.train.pulse_count,
            echo_amplitude: args.echo_amplitude,
            snr_db: args.snr,
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} files in {}",
        total_files,
        args.output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delays_comma_separated() {
        let delays = parse_delays("10,25,40").unwrap();
        assert_eq!(delays, vec![10.0, 25.0, 40.0]);
    }

    #[test]
    fn test_parse_delays_range() {
        let delays = parse_delays("5-20:5").unwrap();
        assert_eq!(delays, vec![5.0, 10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_parse_delays_invalid() {
        assert!(parse_delays("abc").is_err());
        assert!(parse_delays("5-20:5:1").is_err());
    }
}
