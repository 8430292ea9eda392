//! Device-independent read head into a decoded track.
//!
//! The output callback asks the cursor to fill whatever buffer shape the
//! device wants; the cursor handles channel mapping and nearest-frame rate
//! conversion, and remembers how far into the track it has played.

use std::time::Duration;

use super::track::{frames_to_duration, Track};

pub struct PlaybackCursor {
    track: Track,
    /// Read position in source frames (fractional when rates differ)
    position: f64,
    /// Source frames consumed per output frame
    step: f64,
}

impl PlaybackCursor {
    pub fn new(track: Track, output_rate: u32) -> Self {
        let step = if output_rate == 0 || track.sample_rate() == 0 {
            1.0
        } else {
            track.sample_rate() as f64 / output_rate as f64
        };
        Self {
            track,
            position: 0.0,
            step,
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Whole source frames played so far, capped at the track length
    pub fn frames_played(&self) -> u64 {
        (self.position as u64).min(self.track.frames() as u64)
    }

    pub fn elapsed(&self) -> Duration {
        frames_to_duration(self.frames_played(), self.track.sample_rate())
    }

    pub fn is_finished(&self) -> bool {
        self.position as usize >= self.track.frames()
    }

    /// Fills interleaved `out` with `out_channels` channels; silence past the end
    pub fn fill(&mut self, out: &mut [f32], out_channels: usize) {
        let out_channels = out_channels.max(1);
        for frame in out.chunks_mut(out_channels) {
            match self.track.frame(self.position as usize) {
                Some(src) => {
                    map_channels(src, frame);
                    self.position += self.step;
                }
                None => frame.fill(0.0),
            }
        }
    }
}

fn map_channels(src: &[f32], dst: &mut [f32]) {
    if src.len() == dst.len() {
        dst.copy_from_slice(src);
    } else if src.len() == 1 {
        dst.fill(src[0]);
    } else if dst.len() == 1 {
        dst[0] = src.iter().sum::<f32>() / src.len() as f32;
    } else {
        for (c, sample) in dst.iter_mut().enumerate() {
            *sample = src.get(c).copied().unwrap_or(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(frames: usize, channels: u16, rate: u32) -> Track {
        let samples = (0..frames * channels as usize)
            .map(|i| i as f32 / 100.0)
            .collect();
        Track::from_samples(samples, channels, rate)
    }

    #[test]
    fn test_mono_duplicates_to_stereo() {
        let mut cursor = PlaybackCursor::new(Track::from_samples(vec![0.1, 0.2], 1, 10), 10);
        let mut out = [9.0; 4];
        cursor.fill(&mut out, 2);
        assert_eq!(out, [0.1, 0.1, 0.2, 0.2]);
        assert_eq!(cursor.frames_played(), 2);
        assert!(cursor.is_finished());
    }

    #[test]
    fn test_stereo_folds_to_mono() {
        let mut cursor =
            PlaybackCursor::new(Track::from_samples(vec![0.2, 0.4, -1.0, 1.0], 2, 10), 10);
        let mut out = [9.0; 2];
        cursor.fill(&mut out, 1);
        assert!((out[0] - 0.3).abs() < 1e-6);
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn test_extra_output_channels_are_silent() {
        let mut cursor = PlaybackCursor::new(Track::from_samples(vec![0.5, -0.5], 2, 10), 10);
        let mut out = [9.0; 4];
        cursor.fill(&mut out, 4);
        assert_eq!(out, [0.5, -0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_silence_after_end() {
        let mut cursor = PlaybackCursor::new(ramp(2, 1, 10), 10);
        let mut out = [9.0; 5];
        cursor.fill(&mut out, 1);
        assert_eq!(out, [0.0, 0.01, 0.0, 0.0, 0.0]);
        assert_eq!(cursor.frames_played(), 2);

        cursor.fill(&mut out, 1);
        assert_eq!(out, [0.0; 5]);
        assert_eq!(cursor.frames_played(), 2);
    }

    #[test]
    fn test_rate_conversion_tracks_source_time() {
        // 48 kHz device playing a 24 kHz track: each source frame lasts two output frames
        let mut cursor = PlaybackCursor::new(ramp(24_000, 1, 24_000), 48_000);
        let mut out = vec![0.0; 4_800];
        cursor.fill(&mut out, 1);

        assert_eq!(cursor.frames_played(), 2_400);
        assert!((cursor.elapsed().as_secs_f64() - 0.1).abs() < 1e-9);
        assert_eq!(out[0], out[1]);
        assert_ne!(out[1], out[2]);
    }
}
