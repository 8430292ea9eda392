//! Spawning, moving and pruning the shape particles.

use glam::{vec2, Vec2};
use rand::Rng;

use crate::audio::Band;
use crate::color::Rgb;
use crate::viewport::Viewport;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Triangle,
    Circle,
    Square,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Triangle, ShapeKind::Circle, ShapeKind::Square];

    /// Frequency band whose energy drives this kind
    pub fn band(self) -> Band {
        match self {
            ShapeKind::Triangle => Band::Low,
            ShapeKind::Circle => Band::Mid,
            ShapeKind::Square => Band::High,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            ShapeKind::Triangle => Rgb::RED,
            ShapeKind::Circle => Rgb::CYAN,
            ShapeKind::Square => Rgb::EMERALD,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub kind: ShapeKind,
    pub color: Rgb,
    pub position: Vec2,
    /// Each axis in `(-1, 1)`; not normalized
    pub direction: Vec2,
    pub speed: f32,
    /// Seconds on the app clock
    pub spawned_at: f32,
}

impl Particle {
    pub fn new(kind: ShapeKind, position: Vec2, direction: Vec2, speed: f32, now: f32) -> Self {
        Self {
            kind,
            color: kind.color(),
            position,
            direction,
            speed,
            spawned_at: now,
        }
    }

    pub fn advance(&mut self) {
        self.position += self.direction * self.speed;
    }

    pub fn age(&self, now: f32) -> f32 {
        now - self.spawned_at
    }

    pub fn is_expired(&self, viewport: &Viewport, now: f32, ttl: f32) -> bool {
        !viewport.contains(self.position) || self.age(now) > ttl
    }
}

/// Random sign per axis, scaled by an independent magnitude in `[0, 1)`
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let mut axis = || {
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        sign * rng.random::<f32>()
    };
    let x = axis();
    let y = axis();
    vec2(x, y)
}

#[derive(Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Adds `count` particles of `kind` at `origin`, each with its own direction
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        kind: ShapeKind,
        count: usize,
        origin: Vec2,
        speed: f32,
        now: f32,
        rng: &mut R,
    ) {
        self.particles.reserve(count);
        for _ in 0..count {
            let direction = random_direction(rng);
            self.particles
                .push(Particle::new(kind, origin, direction, speed, now));
        }
    }

    /// Moves every particle, then drops the ones that left the viewport or
    /// outlived `ttl`. Returns how many were dropped.
    pub fn update(&mut self, viewport: &Viewport, now: f32, ttl: f32) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|p| {
            p.advance();
            !p.is_expired(viewport, now, ttl)
        });
        before - self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VP: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_kind_band_and_color() {
        assert_eq!(ShapeKind::Triangle.band(), Band::Low);
        assert_eq!(ShapeKind::Circle.band(), Band::Mid);
        assert_eq!(ShapeKind::Square.band(), Band::High);
        assert_eq!(ShapeKind::Circle.color(), Rgb::CYAN);
    }

    #[test]
    fn test_random_direction_covers_all_quadrants() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let d = random_direction(&mut rng);
            assert!(d.x > -1.0 && d.x < 1.0);
            assert!(d.y > -1.0 && d.y < 1.0);
            let quadrant = (d.x >= 0.0) as usize * 2 + (d.y >= 0.0) as usize;
            seen[quadrant] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_spawn_at_origin_with_shared_speed() {
        let mut field = ParticleField::new();
        let mut rng = StdRng::seed_from_u64(1);
        field.spawn(ShapeKind::Square, 5, VP.center(), 3.0, 1.5, &mut rng);

        assert_eq!(field.len(), 5);
        for p in field.particles() {
            assert_eq!(p.position, vec2(400.0, 300.0));
            assert_eq!(p.speed, 3.0);
            assert_eq!(p.spawned_at, 1.5);
            assert_eq!(p.color, Rgb::EMERALD);
        }
    }

    #[test]
    fn test_removed_on_first_frame_outside() {
        // Moves 10px right per frame from x=770: 780, 790, 800 (on edge), 810
        let mut field = ParticleField::new();
        field.push(Particle::new(
            ShapeKind::Circle,
            vec2(770.0, 300.0),
            vec2(1.0, 0.0),
            10.0,
            0.0,
        ));

        for frame in 1..=3 {
            assert_eq!(field.update(&VP, frame as f32 / 60.0, 2.0), 0);
            assert_eq!(field.len(), 1);
        }
        assert_eq!(field.particles()[0].position.x, 800.0);
        assert_eq!(field.update(&VP, 4.0 / 60.0, 2.0), 1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_removed_on_first_frame_past_ttl() {
        // Stationary particle: only age can remove it
        let mut field = ParticleField::new();
        field.push(Particle::new(ShapeKind::Triangle, VP.center(), Vec2::ZERO, 2.0, 1.0));

        assert_eq!(field.update(&VP, 2.5, 2.0), 0);
        assert_eq!(field.update(&VP, 3.0, 2.0), 0);
        assert_eq!(field.update(&VP, 3.01, 2.0), 1);
    }

    #[test]
    fn test_position_updated_before_bounds_check() {
        // Starts inside, one step takes it out: removed in that same update
        let mut field = ParticleField::new();
        field.push(Particle::new(
            ShapeKind::Square,
            vec2(1.0, 300.0),
            vec2(-1.0, 0.0),
            2.0,
            0.0,
        ));
        assert_eq!(field.update(&VP, 0.0, 2.0), 1);
    }

    proptest! {
        #[test]
        fn prop_position_after_n_updates(
            dx in -1.0f32..1.0,
            dy in -1.0f32..1.0,
            speed in 2.0f32..10.0,
            n in 0usize..200,
        ) {
            let start = vec2(400.0, 300.0);
            let mut p = Particle::new(ShapeKind::Circle, start, vec2(dx, dy), speed, 0.0);
            for _ in 0..n {
                p.advance();
            }
            let expected = start + vec2(dx, dy) * speed * n as f32;
            let tolerance = 1e-4 * (1.0 + speed * n as f32);
            prop_assert!((p.position - expected).length() < tolerance);
        }
    }
}
