use echochamber::config::SonarConfig;
use echochamber::dsp::{
    ChirpParams, FirFilterSpec, build_pulse_train, correlate, gap_length, generate_chirp,
    smooth_envelope, zero_lag_index,
};
use echochamber::processing::SonarProcessor;

fn reference_params() -> ChirpParams {
    ChirpParams {
        f_min_hz: 200.0,
        f_max_hz: 12_000.0,
        duration_secs: 256.0 / 44_100.0,
        sample_rate: 44_100,
    }
}

#[test]
fn test_reference_experiment_end_to_end() {
    let chirp = generate_chirp(&reference_params()).unwrap();
    assert!(
        (chirp.len() as i64 - 256).abs() <= 1,
        "expected ~256 samples, got {}",
        chirp.len()
    );

    let auto = correlate(&chirp, &chirp).unwrap();
    assert_eq!(auto.len(), 511);

    let peak_idx = auto
        .iter()
        .enumerate()
        .max_by(|(_, x), (_, y)| x.abs().total_cmp(&y.abs()))
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(peak_idx, 255);
    assert_eq!(zero_lag_index(auto.len()), 255);

    let spec = FirFilterSpec::from_hz(101, 2_000.0, 44_100);
    let envelope = smooth_envelope(&auto, &spec).unwrap();
    assert_eq!(envelope.len(), 511 + 101 - 1);

    let env_peak = envelope
        .iter()
        .enumerate()
        .max_by(|(_, x), (_, y)| x.total_cmp(y))
        .map(|(i, _)| i)
        .unwrap();
    // the smoothing filter delays the peak by its group delay, 50 samples
    assert!(
        env_peak.abs_diff(255 + 50) <= 20,
        "envelope peak at {}, expected near 305",
        env_peak
    );
}

#[test]
fn test_pulse_train_length_matches_config() {
    let chirp = generate_chirp(&reference_params()).unwrap();
    let train = build_pulse_train(&chirp, 44_100, 16, 0.25).unwrap();

    let gap = gap_length(44_100, 0.25);
    assert_eq!(gap, 11_025);
    assert_eq!(train.len(), 16 * (gap + chirp.len()));

    let config = SonarConfig::default();
    let processor = SonarProcessor::new(&config).unwrap();
    assert_eq!(processor.transmit_train().unwrap().len(), train.len());
}

#[test]
fn test_embedded_chirp_is_located() {
    // A chirp buried in silence stands in for a clean single echo
    let config = SonarConfig::default();
    let processor = SonarProcessor::new(&config).unwrap();
    let chirp = processor.reference_chirp().to_vec();

    let offset = 1_000;
    let mut capture = vec![0.0f32; offset];
    capture.extend_from_slice(&chirp);
    capture.extend(std::iter::repeat(0.0).take(500));

    let profile = processor.analyze(&capture).unwrap();
    let expected = offset + chirp.len() - 1;
    assert!(
        profile.aligned_peak_index().abs_diff(expected) <= 20,
        "aligned peak at {}, expected near {}",
        profile.aligned_peak_index(),
        expected
    );
}

#[test]
fn test_transmit_train_analysis_aligns_on_a_pulse() {
    let config = SonarConfig::default();
    let processor = SonarProcessor::new(&config).unwrap();
    let train = processor.transmit_train().unwrap();

    let profile = processor.analyze(&train).unwrap();

    let chirp_len = processor.reference_chirp().len();
    let gap = gap_length(44_100, config.train.gap_fraction);
    let period = gap + chirp_len;

    // Every pulse produces an equal correlation peak; the envelope maximum
    // must land on one of the sixteen alignments
    let aligned = profile.aligned_peak_index();
    let best_distance = (0..config.train.pulse_count)
        .map(|i| {
            let alignment = gap + i * period + chirp_len - 1;
            aligned.abs_diff(alignment)
        })
        .min()
        .unwrap();
    assert!(
        best_distance <= 20,
        "envelope peak {} not near any pulse alignment",
        aligned
    );
}

#[test]
fn test_core_errors_propagate() {
    let mut bad = reference_params();
    bad.f_max_hz = 100.0;
    assert!(generate_chirp(&bad).is_err());

    let chirp = generate_chirp(&reference_params()).unwrap();
    assert!(build_pulse_train(&chirp, 44_100, 0, 0.25).is_err());
    assert!(correlate(&chirp, &[]).is_err());

    let even_taps = FirFilterSpec::from_hz(100, 2_000.0, 44_100);
    assert!(smooth_envelope(&chirp, &even_taps).is_err());
}
