//! Fixed tuning constants.
//!
//! Every knob the visualizer has lives here. There is no config file; the
//! values are compiled in and `Settings::default()` is what the app runs with.
//! Tests build modified copies to probe edge cases.

use std::path::PathBuf;
use std::time::Duration;

/// Peak magnitude that maps to a loudness of 1.0 (16-bit full scale)
pub const FULL_SCALE: f32 = 32768.0;

/// Frames read per analysis window
pub const WINDOW_FRAMES: usize = 1024;

/// Length of the zero spectrum used once playback has ended
pub const SILENT_BINS: usize = 1024;

/// Ceiling on particles one band may spawn in a single frame
pub const MAX_BAND_PARTICLES: usize = 2048;

/// Ceiling on twinkle points per frame
pub const MAX_TWINKLES: usize = 4096;

#[derive(Clone, Debug)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub title: &'static str,
    pub fps: u32,
    /// Seconds a particle may live regardless of position
    pub despawn_secs: f32,
    /// Loudness must be strictly above this for anything to spawn
    pub loudness_threshold: f32,
    /// The `K` in `mean * len * loudness / K`
    pub spawn_divisor: f32,
    pub min_speed: f32,
    /// Multiplier applied to `1 - mean/max` when deriving band speed
    pub speed_scale: f32,
    pub window_frames: usize,
    pub silent_bins: usize,
    pub twinkles_per_loudness: f32,
    pub twinkle_radius: f32,
    pub image_scale: f32,
    pub audio_path: PathBuf,
    pub image_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Audio Reactive Shapes",
            fps: 60,
            despawn_secs: 2.0,
            loudness_threshold: 0.015,
            spawn_divisor: 2.5e9,
            min_speed: 2.0,
            speed_scale: 10.0,
            window_frames: WINDOW_FRAMES,
            silent_bins: SILENT_BINS,
            twinkles_per_loudness: 0.3,
            twinkle_radius: 2.0,
            image_scale: 0.3,
            audio_path: PathBuf::from("song.wav"),
            image_path: PathBuf::from("center_image.png"),
        }
    }
}

impl Settings {
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    /// Upper bound on frames a particle can survive once spawning stops
    pub fn despawn_frames(&self) -> u32 {
        (self.despawn_secs * self.fps as f32).ceil() as u32
    }
}
