use crate::config::AudioConfig;
use crate::error::{Result, SonarError};
use audio_thread_priority::RtPriorityHandle;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::bounded;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Play a transmit signal while recording the microphone input
///
/// The mono transmit samples are replicated across the output device's
/// channels; the capture is mono (one input channel). Recording continues
/// for `record_tail_secs` after playback drains so trailing echoes are not
/// truncated.
///
/// Blocks until the capture completes and returns the recorded samples.
///
/// # Errors
/// `SonarError::AudioDevice` when no default input/output device exists,
/// `SonarError::AudioStream` on stream construction or playback failure.
pub fn play_and_record(
    config: &AudioConfig,
    sample_rate: u32,
    transmit: &[f32],
) -> Result<Vec<f32>> {
    if transmit.is_empty() {
        return Err(SonarError::InvalidInput(
            "transmit signal must be non-empty".to_string(),
        ));
    }

    let host = cpal::default_host();

    let output_device = host
        .default_output_device()
        .ok_or_else(|| SonarError::AudioDevice("No output device found".into()))?;
    let input_device = host
        .default_input_device()
        .ok_or_else(|| SonarError::AudioDevice("No input device found".into()))?;

    match output_device.description() {
        Ok(desc) => log::info!("Output device: {:?}", desc),
        Err(_) => log::info!("Output device: Unknown"),
    }
    match input_device.description() {
        Ok(desc) => log::info!("Input device: {:?}", desc),
        Err(_) => log::info!("Input device: Unknown"),
    }

    let output_channels = output_device
        .default_output_config()
        .map_err(|e| SonarError::AudioDevice(format!("{}", e)))?
        .channels() as usize;

    let output_config = cpal::StreamConfig {
        channels: output_channels as u16,
        sample_rate,
        buffer_size: cpal::BufferSize::Fixed(config.buffer_size as u32),
    };
    let input_config = cpal::StreamConfig {
        channels: 1,
        sample_rate,
        buffer_size: cpal::BufferSize::Fixed(config.buffer_size as u32),
    };

    let samples: Arc<[f32]> = Arc::from(transmit);
    let position = Arc::new(AtomicUsize::new(0));

    let playback_samples = Arc::clone(&samples);
    let playback_position = Arc::clone(&position);
    let output_stream = output_device
        .build_output_stream(
            &output_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut pos = playback_position.load(Ordering::Relaxed);
                for frame in data.chunks_mut(output_channels) {
                    let value = playback_samples.get(pos).copied().unwrap_or(0.0);
                    for ch in frame.iter_mut() {
                        *ch = value;
                    }
                    if pos < playback_samples.len() {
                        pos += 1;
                    }
                }
                playback_position.store(pos, Ordering::Relaxed);
            },
            |err| eprintln!("Audio output error: {}", err),
            None,
        )
        .map_err(|e| SonarError::AudioStream(format!("{}", e)))?;

    let (tx, rx) = bounded::<Vec<f32>>(32);
    let input_stream = input_device
        .build_input_stream(
            &input_config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if tx.send(data.to_vec()).is_err() {
                    log::warn!("Capture receiver dropped");
                }
            },
            |err| eprintln!("Audio input error: {}", err),
            None,
        )
        .map_err(|e| SonarError::AudioStream(format!("{}", e)))?;

    // Attempt to promote to real-time priority
    let _rt_handle: Option<RtPriorityHandle> =
        match audio_thread_priority::promote_current_thread_to_real_time(
            config.buffer_size as u32,
            sample_rate,
        ) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("Could not set real-time priority: {}", e);
                None
            }
        };

    input_stream
        .play()
        .map_err(|e| SonarError::AudioStream(format!("{}", e)))?;
    output_stream
        .play()
        .map_err(|e| SonarError::AudioStream(format!("{}", e)))?;

    let poll = Duration::from_millis(20);
    let mut recorded = Vec::with_capacity(samples.len());

    // Playback should take len/rate seconds; a stream that makes no
    // progress well past that is stuck, not slow
    let playback_deadline = Instant::now()
        + Duration::from_secs_f64(samples.len() as f64 / sample_rate as f64)
        + Duration::from_secs(5);

    while position.load(Ordering::Relaxed) < samples.len() {
        if Instant::now() > playback_deadline {
            return Err(SonarError::AudioStream(
                "playback stalled before the transmit signal drained".to_string(),
            ));
        }
        while let Ok(chunk) = rx.try_recv() {
            recorded.extend_from_slice(&chunk);
        }
        std::thread::sleep(poll);
    }

    let tail_deadline = Instant::now() + Duration::from_secs_f64(config.record_tail_secs.max(0.0));
    while Instant::now() < tail_deadline {
        while let Ok(chunk) = rx.try_recv() {
            recorded.extend_from_slice(&chunk);
        }
        std::thread::sleep(poll);
    }

    let _ = output_stream.pause();
    let _ = input_stream.pause();
    while let Ok(chunk) = rx.try_recv() {
        recorded.extend_from_slice(&chunk);
    }

    if recorded.is_empty() {
        return Err(SonarError::AudioStream(
            "capture produced no samples".to_string(),
        ));
    }

    log::info!(
        "Captured {} samples ({:.2} s) for {} transmitted",
        recorded.len(),
        recorded.len() as f64 / sample_rate as f64,
        samples.len()
    );

    Ok(recorded)
}
