//! Per-frame decorative points.

use glam::Vec2;
use rand::Rng;

use crate::settings::MAX_TWINKLES;
use crate::viewport::Viewport;

/// `floor(loudness * per_loudness)`, clamped to `0..=MAX_TWINKLES`
pub fn twinkle_count(loudness: f32, per_loudness: f32) -> usize {
    let raw = (loudness * per_loudness).floor();
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, MAX_TWINKLES as f32) as usize
}

/// Regenerates `points` in place for this frame
pub fn scatter<R: Rng + ?Sized>(
    points: &mut Vec<Vec2>,
    count: usize,
    viewport: &Viewport,
    rng: &mut R,
) {
    points.clear();
    points.extend((0..count).map(|_| viewport.random_pixel(rng)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_floors() {
        assert_eq!(twinkle_count(0.0, 0.3), 0);
        assert_eq!(twinkle_count(3.0, 0.3), 0);
        assert_eq!(twinkle_count(3.34, 0.3), 1);
        assert_eq!(twinkle_count(100.0, 0.3), 30);
    }

    #[test]
    fn test_count_bounded_for_runaway_loudness() {
        assert_eq!(twinkle_count(f32::INFINITY, 0.3), MAX_TWINKLES);
        assert_eq!(twinkle_count(f32::NAN, 0.3), 0);
        assert_eq!(twinkle_count(f32::NEG_INFINITY, 0.3), 0);
    }

    #[test]
    fn test_scatter_replaces_previous_frame() {
        let vp = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut points = Vec::new();

        scatter(&mut points, 12, &vp, &mut rng);
        assert_eq!(points.len(), 12);
        let first = points.clone();

        scatter(&mut points, 3, &vp, &mut rng);
        assert_eq!(points.len(), 3);
        assert_ne!(&first[..3], &points[..]);
        assert!(points.iter().all(|p| vp.contains(*p)));
    }
}
