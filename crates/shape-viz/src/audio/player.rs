//! Track playback through the default output device.
//!
//! The decoded track is handed to the cpal output callback inside a
//! `PlaybackCursor`. After every callback the cursor's position is published
//! through atomics, which is the only state shared with the render loop.

use anyhow::{bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use shape_viz_core::audio::frames_to_duration;
use shape_viz_core::{PlaybackCursor, Track};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Progress written by the audio callback, read by the render loop
#[derive(Default)]
struct Progress {
    frames_played: AtomicU64,
    finished: AtomicBool,
}

pub struct Player {
    stream: Stream,
    progress: Arc<Progress>,
    sample_rate: u32,
    device_name: String,
}

impl Player {
    /// Opens the default output device and starts playing `track` immediately
    pub fn start(track: Track) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .context("no default audio output device")?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let supported = device
            .default_output_config()
            .with_context(|| format!("failed to query output config of {}", device_name))?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();

        info!(
            "Audio output: {} @ {}Hz, {} channel(s), {:?}",
            device_name, config.sample_rate.0, config.channels, sample_format
        );
        if config.sample_rate.0 != track.sample_rate() {
            info!(
                "Resampling track from {}Hz to {}Hz",
                track.sample_rate(),
                config.sample_rate.0
            );
        }

        let sample_rate = track.sample_rate();
        let cursor = PlaybackCursor::new(track, config.sample_rate.0);
        let progress = Arc::new(Progress::default());

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, cursor, &progress),
            SampleFormat::F64 => build_stream::<f64>(&device, &config, cursor, &progress),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, cursor, &progress),
            SampleFormat::I32 => build_stream::<i32>(&device, &config, cursor, &progress),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, cursor, &progress),
            other => bail!("unsupported output sample format {:?}", other),
        }?;
        stream.play().context("failed to start audio stream")?;

        Ok(Self {
            stream,
            progress,
            sample_rate,
            device_name,
        })
    }

    /// Playback position as reported by the output callback
    pub fn elapsed(&self) -> Duration {
        frames_to_duration(
            self.progress.frames_played.load(Ordering::Relaxed),
            self.sample_rate,
        )
    }

    pub fn is_finished(&self) -> bool {
        self.progress.finished.load(Ordering::Relaxed)
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn stop(&self) {
        if let Err(e) = self.stream.pause() {
            warn!("Failed to pause audio stream: {}", e);
        }
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    mut cursor: PlaybackCursor,
    progress: &Arc<Progress>,
) -> Result<Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let progress = Arc::clone(progress);
    let mut scratch: Vec<f32> = Vec::new();

    let err_fn = |err| warn!("Audio stream error: {}", err);

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                scratch.resize(data.len(), 0.0);
                cursor.fill(&mut scratch, channels);
                for (out, &sample) in data.iter_mut().zip(scratch.iter()) {
                    *out = T::from_sample(sample);
                }
                progress
                    .frames_played
                    .store(cursor.frames_played(), Ordering::Relaxed);
                progress
                    .finished
                    .store(cursor.is_finished(), Ordering::Relaxed);
            },
            err_fn,
            None,
        )
        .context("failed to build audio output stream")?;

    Ok(stream)
}
