//! Per-frame simulation: analysis, spawning, movement and twinkles.
//!
//! The scene runs a two-state machine. While `Playing` it pulls a spectrum
//! for the current playback position every frame; the first failure switches
//! it to `Ended`, after which a silent spectrum is used so nothing new spawns
//! and the remaining particles run out their lifetime.

use glam::Vec2;
use rand::Rng;
use std::io::{Read, Seek};
use std::time::Duration;
use tracing::{info, trace, warn};

use crate::audio::{AnalyzeError, Spectrum, SpectrumAnalyzer};
use crate::particles::{Particle, ParticleField, ShapeKind};
use crate::settings::{Settings, FULL_SCALE};
use crate::twinkle;
use crate::viewport::Viewport;

/// Anything that can produce a spectrum for a playback position
pub trait SpectrumSource {
    fn spectrum_at(&mut self, elapsed: Duration) -> Result<Spectrum, AnalyzeError>;
}

impl<R: Read + Seek> SpectrumSource for SpectrumAnalyzer<R> {
    fn spectrum_at(&mut self, elapsed: Duration) -> Result<Spectrum, AnalyzeError> {
        self.analyze(elapsed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Ended,
}

/// What happened during one `Scene::step`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Spawned this frame, indexed like `ShapeKind::ALL`
    pub spawned: [usize; 3],
    pub despawned: usize,
    pub loudness: f32,
}

impl FrameReport {
    pub fn total_spawned(&self) -> usize {
        self.spawned.iter().sum()
    }
}

pub struct Scene {
    settings: Settings,
    viewport: Viewport,
    field: ParticleField,
    twinkles: Vec<Vec2>,
    state: PlaybackState,
    loudness: f32,
}

impl Scene {
    pub fn new(settings: Settings) -> Self {
        let viewport = Viewport::new(settings.width as f32, settings.height as f32);
        Self {
            settings,
            viewport,
            field: ParticleField::new(),
            twinkles: Vec::new(),
            state: PlaybackState::Playing,
            loudness: 0.0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    pub fn twinkles(&self) -> &[Vec2] {
        &self.twinkles
    }

    pub fn loudness(&self) -> f32 {
        self.loudness
    }

    /// Advances one frame. `elapsed` is the audio engine's playback position,
    /// `now` the app clock in seconds used for particle ages.
    pub fn step<S, R>(
        &mut self,
        source: &mut S,
        elapsed: Duration,
        now: f32,
        rng: &mut R,
    ) -> FrameReport
    where
        S: SpectrumSource + ?Sized,
        R: Rng + ?Sized,
    {
        let spectrum = self.next_spectrum(source, elapsed);
        self.step_with(&spectrum, now, rng)
    }

    /// Same as `step` but with a spectrum supplied directly
    pub fn step_with<R: Rng + ?Sized>(
        &mut self,
        spectrum: &Spectrum,
        now: f32,
        rng: &mut R,
    ) -> FrameReport {
        let mut report = FrameReport {
            loudness: spectrum.loudness(FULL_SCALE),
            ..FrameReport::default()
        };
        self.loudness = report.loudness;

        if report.loudness > self.settings.loudness_threshold {
            report.spawned = self.spawn(spectrum, report.loudness, now, rng);
        }

        report.despawned = self
            .field
            .update(&self.viewport, now, self.settings.despawn_secs);

        let count = twinkle::twinkle_count(report.loudness, self.settings.twinkles_per_loudness);
        twinkle::scatter(&mut self.twinkles, count, &self.viewport, rng);

        trace!(
            loudness = report.loudness,
            spawned = report.total_spawned(),
            despawned = report.despawned,
            live = self.field.len(),
            "frame"
        );
        report
    }

    /// Ends playback from outside, e.g. when the output stream reports the
    /// track has been fully played.
    pub fn finish_playback(&mut self) {
        if self.state == PlaybackState::Playing {
            info!("Playback finished: output stream drained");
            self.state = PlaybackState::Ended;
        }
    }

    fn next_spectrum<S: SpectrumSource + ?Sized>(
        &mut self,
        source: &mut S,
        elapsed: Duration,
    ) -> Spectrum {
        if self.state == PlaybackState::Playing {
            match source.spectrum_at(elapsed) {
                Ok(spectrum) => return spectrum,
                Err(err) => {
                    if err.is_end_of_stream() {
                        info!("Playback finished at {:.2}s: {}", elapsed.as_secs_f32(), err);
                    } else {
                        warn!("Audio read failed, continuing in silence: {}", err);
                    }
                    self.state = PlaybackState::Ended;
                }
            }
        }
        Spectrum::silent(self.settings.silent_bins)
    }

    fn spawn<R: Rng + ?Sized>(
        &mut self,
        spectrum: &Spectrum,
        loudness: f32,
        now: f32,
        rng: &mut R,
    ) -> [usize; 3] {
        let bands = spectrum.bands();
        let origin = self.viewport.center();
        let mut spawned = [0; 3];

        for (slot, kind) in spawned.iter_mut().zip(ShapeKind::ALL) {
            let band = bands.get(kind.band());
            let count = band.particle_count(loudness, self.settings.spawn_divisor);
            let speed = band.speed(self.settings.min_speed, self.settings.speed_scale);
            self.field.spawn(kind, count, origin, speed, now, rng);
            *slot = count;
        }
        spawned
    }
}
