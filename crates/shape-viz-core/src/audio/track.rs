//! Whole-file WAV decoding for playback.
//!
//! The track is decoded once at startup into interleaved `f32` samples in
//! `[-1, 1]`, which is what the output device consumes.

use hound::{SampleFormat, WavReader, WavSpec};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("failed to decode samples: {0}")]
    Decode(#[from] hound::Error),
    #[error("track declares zero channels")]
    NoChannels,
}

pub struct Track {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl Track {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let path = path.as_ref();
        let wav = WavReader::<BufReader<File>>::open(path).map_err(|source| TrackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_wav(wav)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TrackError> {
        Self::from_wav(WavReader::new(reader)?)
    }

    pub fn from_wav<R: Read>(mut wav: WavReader<R>) -> Result<Self, TrackError> {
        let spec = wav.spec();
        if spec.channels == 0 {
            return Err(TrackError::NoChannels);
        }
        let samples = read_normalized(&mut wav, usize::MAX)?;
        Ok(Self::from_samples(samples, spec.channels, spec.sample_rate))
    }

    /// Builds a track from already-interleaved samples
    pub fn from_samples(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples,
            channels: channels.max(1),
            sample_rate,
        }
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        frames_to_duration(self.frames() as u64, self.sample_rate)
    }

    /// One interleaved frame, or `None` past the end
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        let ch = self.channels as usize;
        let start = index.checked_mul(ch)?;
        self.samples.get(start..start + ch)
    }
}

pub fn frames_to_duration(frames: u64, sample_rate: u32) -> Duration {
    if sample_rate == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(frames as f64 / sample_rate as f64)
}

/// Reads up to `limit` interleaved samples, scaled to `[-1, 1]`.
///
/// Integer samples of any width are divided by `2^(bits-1)`; float samples
/// pass through.
pub(crate) fn read_normalized<R: Read>(
    wav: &mut WavReader<R>,
    limit: usize,
) -> Result<Vec<f32>, hound::Error> {
    let WavSpec {
        sample_format,
        bits_per_sample,
        ..
    } = wav.spec();

    match sample_format {
        SampleFormat::Float => wav.samples::<f32>().take(limit).collect(),
        SampleFormat::Int => {
            let norm = 1.0 / (1u64 << bits_per_sample.saturating_sub(1)) as f32;
            wav.samples::<i32>()
                .take(limit)
                .map(|s| s.map(|v| v as f32 * norm))
                .collect()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hound::WavWriter;
    use std::io::Cursor;

    /// Writes 16-bit PCM samples into an in-memory WAV file
    pub(crate) fn wav_bytes(samples: &[i16], channels: u16, sample_rate: u32) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_16_bit_stereo() {
        let bytes = wav_bytes(&[16384, -16384, 0, 32767], 2, 8000);
        let track = Track::from_reader(Cursor::new(bytes)).unwrap();

        assert_eq!(track.channels(), 2);
        assert_eq!(track.sample_rate(), 8000);
        assert_eq!(track.frames(), 2);
        assert_eq!(track.frame(0), Some(&[0.5, -0.5][..]));
        assert!(track.frame(2).is_none());
    }

    #[test]
    fn test_decode_float() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for s in [0.25f32, -1.0, 0.75] {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        let track = Track::from_reader(Cursor::new(cursor.into_inner())).unwrap();

        assert_eq!(track.frames(), 3);
        assert_eq!(track.frame(1), Some(&[-1.0][..]));
        assert!((track.duration().as_secs_f64() - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_open_missing_file_reports_path() {
        let err = Track::open("definitely/not/here.wav").err().unwrap();
        assert!(matches!(err, TrackError::Open { .. }));
        assert!(err.to_string().contains("here.wav"));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = Track::from_reader(Cursor::new(b"not a wav file".to_vec()))
            .err()
            .unwrap();
        assert!(matches!(err, TrackError::Decode(_)));
    }
}
