//! Drawing the scene with nannou.
//!
//! Layer order: background, shapes, twinkles, the dark disc behind the
//! center image, then the image itself.

mod shapes;

use nannou::prelude::*;
use shape_viz_core::color::{self, Rgb};
use shape_viz_core::{Scene, Vec2 as ScenePoint, Viewport};

pub use shapes::draw_particle;

pub fn draw_scene(draw: &Draw, scene: &Scene, center_image: &wgpu::Texture) {
    let viewport = scene.viewport();
    let settings = scene.settings();

    draw.background().color(to_color(color::BACKGROUND));

    for particle in scene.particles() {
        draw_particle(draw, viewport, particle);
    }

    let twinkle_size = settings.twinkle_radius * 2.0;
    for &point in scene.twinkles() {
        draw.ellipse()
            .xy(to_window(viewport, point))
            .w_h(twinkle_size, twinkle_size)
            .color(to_color(color::TWINKLE));
    }

    draw_center_image(draw, center_image, settings.image_scale);
}

fn draw_center_image(draw: &Draw, texture: &wgpu::Texture, scale: f32) {
    let [w, h] = texture.size();
    let (w, h) = ((w as f32 * scale).floor(), (h as f32 * scale).floor());

    let backdrop = (w / 5.0).floor() * 2.0;
    draw.ellipse()
        .x_y(0.0, 0.0)
        .w_h(backdrop, backdrop)
        .color(to_color(color::IMAGE_BACKDROP));

    draw.texture(texture).x_y(0.0, 0.0).w_h(w, h);
}

/// Screen coordinates (top-left origin, y down) to window coordinates
pub(crate) fn to_window(viewport: &Viewport, p: ScenePoint) -> Point2 {
    let c = viewport.to_centered(p);
    pt2(c.x, c.y)
}

pub(crate) fn to_color(c: Rgb) -> Rgba {
    let [r, g, b] = c.to_f32();
    rgba(r, g, b, 1.0)
}
