mod analyzer;
mod cursor;
mod spectrum;
mod track;

pub use analyzer::{AnalyzeError, SpectrumAnalyzer};
pub use cursor::PlaybackCursor;
pub use spectrum::{Band, BandStats, Bands, Spectrum};
pub use track::{frames_to_duration, Track, TrackError};

#[cfg(test)]
pub(crate) use track::tests as tests_support;
