use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use echochamber::audio::play_and_record;
use echochamber::config::SonarConfig;
use echochamber::output::{EchoSummary, OutputFormat, create_formatter, export_envelope_csv};
use echochamber::processing::SonarProcessor;
use echochamber::{load_wav, save_wav};

#[derive(Parser, Debug)]
#[command(name = "echochamber")]
#[command(about = "Chirp-pulse sonar ranging experiment")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Capture WAV file to analyze (written when transmitting)
    #[arg(long, default_value = "sonar_capture.wav")]
    capture: PathBuf,

    /// Play the pulse train and record a fresh capture before analysis
    #[arg(short, long)]
    transmit: bool,

    /// Analyze the reference chirp's own autocorrelation instead of a capture
    #[arg(long)]
    self_test: bool,

    /// Summary output format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verbose summary output
    #[arg(short, long)]
    verbose: bool,

    /// Write the smoothed envelope to a CSV file
    #[arg(long)]
    envelope_csv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            SonarConfig::from_toml_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => SonarConfig::default(),
    };

    println!("=== Echo Chamber - Chirp Sonar ===");
    println!("Sample rate: {} Hz", config.chirp.sample_rate);
    println!(
        "Chirp sweep: {}-{} Hz over {:.2} ms",
        config.chirp.f_min_hz,
        config.chirp.f_max_hz,
        config.chirp.duration_secs * 1000.0
    );
    println!(
        "Pulse train: {} pulses, gap fraction {}",
        config.train.pulse_count, config.train.gap_fraction
    );
    println!(
        "Envelope filter: {} taps, cutoff {} Hz",
        config.envelope.num_taps, config.envelope.cutoff_hz
    );
    println!();

    let processor = SonarProcessor::new(&config)?;

    let profile = if args.self_test {
        println!("Analyzing reference chirp autocorrelation");
        processor.autocorrelation_profile()?
    } else {
        let captured = acquire_capture(&args, &config, &processor)?;
        processor.analyze(&captured)?
    };

    let formatter = create_formatter(args.format, args.verbose);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!(
        "{}",
        formatter.format(&EchoSummary::from_profile(&profile, processor.sample_rate()))
    );

    if let Some(path) = &args.envelope_csv {
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        export_envelope_csv(&mut file, &profile.envelope, processor.sample_rate())?;
        println!("Envelope written to {}", path.display());
    }

    Ok(())
}

fn acquire_capture(
    args: &Args,
    config: &SonarConfig,
    processor: &SonarProcessor,
) -> anyhow::Result<Vec<f32>> {
    if args.transmit {
        let train = processor.transmit_train()?;
        log::info!(
            "Transmitting {} pulses ({} samples)",
            config.train.pulse_count,
            train.len()
        );

        let recorded = play_and_record(&config.audio, processor.sample_rate(), &train)?;

        save_wav(&args.capture, &recorded, processor.sample_rate())
            .with_context(|| format!("Failed to write {}", args.capture.display()))?;
        println!("Capture written to {}", args.capture.display());

        return Ok(recorded);
    }

    match load_wav(&args.capture) {
        Ok((samples, rate)) => {
            if samples.is_empty() {
                anyhow::bail!("Capture file {} contains no samples", args.capture.display());
            }
            if rate != processor.sample_rate() {
                log::warn!(
                    "Capture sample rate {} Hz differs from configured {} Hz",
                    rate,
                    processor.sample_rate()
                );
            }
            Ok(samples)
        }
        Err(e) => {
            eprintln!("No capture at {}: {}", args.capture.display(), e);
            eprintln!("Run with --transmit to play and record a sonar pulse train first.");
            std::process::exit(1);
        }
    }
}
