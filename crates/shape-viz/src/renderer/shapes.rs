//! Per-kind shape geometry, in screen coordinates before conversion.

use nannou::prelude::*;
use shape_viz_core::{Particle, ShapeKind, Vec2 as ScenePoint, Viewport};

use super::{to_color, to_window};

const TRIANGLE_HALF: f32 = 10.0;
const CIRCLE_RADIUS: f32 = 10.0;
const SQUARE_SIDE: f32 = 20.0;

pub fn draw_particle(draw: &Draw, viewport: &Viewport, particle: &Particle) {
    let p = particle.position;
    let color = to_color(particle.color);

    match particle.kind {
        ShapeKind::Triangle => {
            let apex = ScenePoint::new(p.x, p.y - TRIANGLE_HALF);
            let left = ScenePoint::new(p.x - TRIANGLE_HALF, p.y + TRIANGLE_HALF);
            let right = ScenePoint::new(p.x + TRIANGLE_HALF, p.y + TRIANGLE_HALF);
            draw.tri()
                .points(
                    to_window(viewport, apex),
                    to_window(viewport, left),
                    to_window(viewport, right),
                )
                .color(color);
        }
        ShapeKind::Circle => {
            draw.ellipse()
                .xy(to_window(viewport, p))
                .w_h(CIRCLE_RADIUS * 2.0, CIRCLE_RADIUS * 2.0)
                .color(color);
        }
        ShapeKind::Square => {
            // Anchored at the top-left corner
            let half = SQUARE_SIDE / 2.0;
            let center = ScenePoint::new(p.x + half, p.y + half);
            draw.rect()
                .xy(to_window(viewport, center))
                .w_h(SQUARE_SIDE, SQUARE_SIDE)
                .color(color);
        }
    }
}
