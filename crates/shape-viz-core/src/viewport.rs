//! Screen-space viewport.
//!
//! The simulation works in screen coordinates: origin at the top-left corner,
//! y growing downward. `to_centered` maps into the window's center-origin,
//! y-up space for drawing.

use glam::{vec2, Vec2};
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive on every edge: a point exactly on the border is still inside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Uniform integer pixel position in `[0, width) x [0, height)`
    pub fn random_pixel<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let w = self.width as u32;
        let h = self.height as u32;
        if w == 0 || h == 0 {
            return Vec2::ZERO;
        }
        vec2(rng.random_range(0..w) as f32, rng.random_range(0..h) as f32)
    }

    pub fn to_centered(&self, p: Vec2) -> Vec2 {
        vec2(p.x - self.width / 2.0, self.height / 2.0 - p.y)
    }
}
