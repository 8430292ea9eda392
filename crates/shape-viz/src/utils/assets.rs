//! Startup asset loading. Any failure here is fatal.

use anyhow::{Context, Result};
use nannou::prelude::*;
use shape_viz_core::{SpectrumAnalyzer, Track};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub fn load_center_image(app: &App, path: &Path) -> Result<wgpu::Texture> {
    let texture = wgpu::Texture::from_path(app, path)
        .with_context(|| format!("failed to load center image {}", path.display()))?;
    let [w, h] = texture.size();
    info!("Center image: {} ({}x{})", path.display(), w, h);
    Ok(texture)
}

/// Decodes the whole track for playback and opens a second reader for analysis
pub fn load_audio(
    path: &Path,
    window_frames: usize,
) -> Result<(Track, SpectrumAnalyzer<BufReader<File>>)> {
    let track = Track::open(path).context("failed to load audio track")?;
    let analyzer = SpectrumAnalyzer::open(path, window_frames)
        .with_context(|| format!("failed to open {} for analysis", path.display()))?;

    let spec = analyzer.spec();
    info!(
        "Track: {} ({}Hz, {} channel(s), {}-bit {:?}, {:.1}s)",
        path.display(),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format,
        track.duration().as_secs_f32()
    );
    Ok((track, analyzer))
}
