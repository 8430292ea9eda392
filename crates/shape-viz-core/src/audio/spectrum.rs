//! Magnitude spectrum and its three-band summary.
//!
//! The spectrum is split by index into equal thirds: low, mid and high. Each
//! band yields a spawn count and a speed for the shape kind it drives.

use crate::settings::MAX_BAND_PARTICLES;

#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    magnitudes: Vec<f32>,
}

impl Spectrum {
    pub fn new(magnitudes: Vec<f32>) -> Self {
        Self { magnitudes }
    }

    /// All-zero spectrum used once playback has ended
    pub fn silent(bins: usize) -> Self {
        Self::new(vec![0.0; bins])
    }

    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    pub fn peak(&self) -> f32 {
        self.magnitudes.iter().copied().fold(0.0f32, f32::max)
    }

    /// Peak magnitude normalized by `full_scale`
    pub fn loudness(&self, full_scale: f32) -> f32 {
        self.peak() / full_scale
    }

    pub fn bands(&self) -> Bands {
        let n = self.magnitudes.len();
        let (a, b) = (n / 3, 2 * n / 3);
        Bands {
            low: BandStats::from_slice(&self.magnitudes[..a]),
            mid: BandStats::from_slice(&self.magnitudes[a..b]),
            high: BandStats::from_slice(&self.magnitudes[b..]),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BandStats {
    pub len: usize,
    pub mean: f32,
    pub max: f32,
}

impl BandStats {
    /// Empty slices yield zero mean and zero max
    pub fn from_slice(values: &[f32]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let sum: f64 = values.iter().map(|&v| v as f64).sum();
        Self {
            len: values.len(),
            mean: (sum / values.len() as f64) as f32,
            max: values.iter().copied().fold(f32::MIN, f32::max),
        }
    }

    /// `max(1, floor(mean * len * loudness / divisor))`, capped at
    /// `MAX_BAND_PARTICLES`
    pub fn particle_count(&self, loudness: f32, divisor: f32) -> usize {
        let raw = self.mean as f64 * self.len as f64 * loudness as f64 / divisor as f64;
        if raw.is_nan() {
            return 1;
        }
        raw.floor().clamp(1.0, MAX_BAND_PARTICLES as f64) as usize
    }

    /// `max(min_speed, floor(scale * (1 - mean / max)))`, or `min_speed` when max is zero
    pub fn speed(&self, min_speed: f32, scale: f32) -> f32 {
        if self.max.is_nan() || self.max <= 0.0 {
            return min_speed;
        }
        let ratio = self.mean as f64 / self.max as f64;
        ((scale as f64 * (1.0 - ratio)).floor() as f32).max(min_speed)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bands {
    pub low: BandStats,
    pub mid: BandStats,
    pub high: BandStats,
}

impl Bands {
    pub fn get(&self, band: Band) -> &BandStats {
        match band {
            Band::Low => &self.low,
            Band::Mid => &self.mid,
            Band::High => &self.high,
        }
    }
}
