use echochamber::config::SonarConfig;
use echochamber::dsp::gap_length;
use echochamber::processing::SonarProcessor;
use echochamber::simulation::{SimulationConfig, synthesize_capture};
use echochamber::{load_wav, save_wav};

fn single_pulse_processor() -> (SonarConfig, SonarProcessor) {
    let mut config = SonarConfig::default();
    config.train.pulse_count = 1;
    let processor = SonarProcessor::new(&config).unwrap();
    (config, processor)
}

#[test]
fn test_known_echo_delay_round_trip() {
    let (config, processor) = single_pulse_processor();
    let transmit = processor.transmit_train().unwrap();
    let chirp_len = processor.reference_chirp().len();

    // Echo well above the direct-path leak so it owns the envelope maximum
    let delay = 2_000;
    let sim = SimulationConfig::default()
        .with_direct_path(0.1)
        .with_echo(delay, 0.8)
        .with_awgn(30.0)
        .with_seed(7);
    let capture = synthesize_capture(&transmit, &sim);

    let profile = processor.analyze(&capture).unwrap();

    let gap = gap_length(44_100, config.train.gap_fraction);
    let expected = gap + delay + chirp_len - 1;
    assert!(
        profile.aligned_peak_index().abs_diff(expected) <= 20,
        "aligned peak at {}, expected near {}",
        profile.aligned_peak_index(),
        expected
    );
}

#[test]
fn test_noise_free_echo_hits_exactly() {
    let (config, processor) = single_pulse_processor();
    let transmit = processor.transmit_train().unwrap();
    let chirp_len = processor.reference_chirp().len();

    let delay = 4_410; // 100 ms
    let sim = SimulationConfig::default()
        .with_direct_path(0.0)
        .with_echo(delay, 1.0);
    let capture = synthesize_capture(&transmit, &sim);

    let profile = processor.analyze(&capture).unwrap();

    let gap = gap_length(44_100, config.train.gap_fraction);
    let expected = gap + delay + chirp_len - 1;
    assert!(
        profile.aligned_peak_index().abs_diff(expected) <= 5,
        "aligned peak at {}, expected near {}",
        profile.aligned_peak_index(),
        expected
    );
}

#[test]
fn test_capture_survives_wav_round_trip() {
    let (_, processor) = single_pulse_processor();
    let transmit = processor.transmit_train().unwrap();

    let sim = SimulationConfig::default()
        .with_echo(1_500, 0.5)
        .with_awgn(25.0)
        .with_seed(11);
    let capture = synthesize_capture(&transmit, &sim);

    let path = std::env::temp_dir().join("echochamber_synthetic_capture.wav");
    save_wav(&path, &capture, processor.sample_rate()).unwrap();
    let (loaded, rate) = load_wav(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(rate, processor.sample_rate());
    assert_eq!(loaded.len(), capture.len());

    let direct = processor.analyze(&capture).unwrap();
    let via_wav = processor.analyze(&loaded).unwrap();
    assert_eq!(direct.peak_index, via_wav.peak_index);
}

#[test]
fn test_envelope_window_focuses_on_echo() {
    let (config, processor) = single_pulse_processor();
    let transmit = processor.transmit_train().unwrap();

    let sim = SimulationConfig::default()
        .with_direct_path(0.0)
        .with_echo(3_000, 1.0);
    let capture = synthesize_capture(&transmit, &sim);

    let profile = processor.analyze(&capture).unwrap();
    let window = processor.envelope_window(&profile);

    assert!(window.len() <= 2 * config.envelope.peak_half_width);
    let window_max = window.iter().fold(0.0f32, |m, &v| m.max(v));
    assert_eq!(window_max, profile.peak_value);
}
