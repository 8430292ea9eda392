//! Spectral analysis at the current playback position.
//!
//! Each call seeks the WAV reader to the frame matching the elapsed playback
//! time, reads one window of interleaved samples and returns the magnitudes of
//! a real FFT over it (bins `0..=n/2`). No window function is applied.

use hound::{WavReader, WavSpec};
use num_complex::Complex;
use rustfft::FftPlanner;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::spectrum::Spectrum;
use super::track::read_normalized;
use crate::settings::FULL_SCALE;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Playback position is at or past the end of the stream
    #[error("no audio at frame {offset} (stream has {len} frames)")]
    NoData { offset: u64, len: u64 },
    #[error("failed to read audio window: {0}")]
    Read(#[from] hound::Error),
}

impl AnalyzeError {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, AnalyzeError::NoData { .. })
    }
}

pub struct SpectrumAnalyzer<R> {
    reader: WavReader<R>,
    window_frames: usize,
    planner: FftPlanner<f32>,
    buffer: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>, window_frames: usize) -> Result<Self, hound::Error> {
        Ok(Self::from_wav(WavReader::open(path)?, window_frames))
    }
}

impl<R: Read + Seek> SpectrumAnalyzer<R> {
    pub fn new(reader: R, window_frames: usize) -> Result<Self, hound::Error> {
        Ok(Self::from_wav(WavReader::new(reader)?, window_frames))
    }

    pub fn from_wav(reader: WavReader<R>, window_frames: usize) -> Self {
        let capacity = window_frames * reader.spec().channels as usize;
        Self {
            reader,
            window_frames,
            planner: FftPlanner::new(),
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn spec(&self) -> WavSpec {
        self.reader.spec()
    }

    /// Stream length in frames
    pub fn len_frames(&self) -> u64 {
        self.reader.duration() as u64
    }

    /// Nearest frame to `elapsed`. Rounding keeps positions produced by
    /// `frames_to_duration` on the frame they came from.
    pub fn frame_offset(&self, elapsed: Duration) -> u64 {
        (elapsed.as_secs_f64() * self.reader.spec().sample_rate as f64).round() as u64
    }

    pub fn analyze(&mut self, elapsed: Duration) -> Result<Spectrum, AnalyzeError> {
        let offset = self.frame_offset(elapsed);
        let len = self.len_frames();
        if offset >= len {
            return Err(AnalyzeError::NoData { offset, len });
        }

        self.reader.seek(offset as u32).map_err(hound::Error::from)?;
        let channels = self.reader.spec().channels as usize;
        let samples = read_normalized(&mut self.reader, self.window_frames * channels)?;
        if samples.is_empty() {
            return Err(AnalyzeError::NoData { offset, len });
        }

        Ok(self.transform(&samples))
    }

    /// Real FFT magnitudes on a 16-bit scale
    fn transform(&mut self, samples: &[f32]) -> Spectrum {
        let n = samples.len();
        self.buffer.clear();
        self.buffer
            .extend(samples.iter().map(|&s| Complex::new(s * FULL_SCALE, 0.0)));

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut self.buffer);

        Spectrum::new(self.buffer[..=n / 2].iter().map(|c| c.norm()).collect())
    }
}
