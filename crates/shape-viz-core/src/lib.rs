//! Simulation core for the audio-reactive shape visualizer.
//!
//! Everything here is independent of windowing and audio devices: decoding
//! the track, analysing the spectrum at a playback position, and the
//! per-frame particle simulation the renderer draws.

pub mod audio;
pub mod clock;
pub mod color;
pub mod particles;
pub mod scene;
pub mod settings;
pub mod twinkle;
pub mod viewport;

pub use audio::{AnalyzeError, PlaybackCursor, Spectrum, SpectrumAnalyzer, Track, TrackError};
pub use clock::FrameClock;
pub use color::Rgb;
pub use particles::{Particle, ParticleField, ShapeKind};
pub use scene::{FrameReport, PlaybackState, Scene, SpectrumSource};
pub use settings::Settings;
pub use viewport::Viewport;

pub use glam::Vec2;
