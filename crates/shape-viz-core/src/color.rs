//! Palette shared by the simulation and the renderer.

/// 8-bit sRGB color
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const EMERALD: Rgb = Rgb::new(80, 200, 120);

    /// Channels as 0.0-1.0 floats
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

pub const BACKGROUND: Rgb = Rgb::BLACK;
/// Disc drawn behind the center image so its transparent corners stay dark
pub const IMAGE_BACKDROP: Rgb = Rgb::BLACK;
pub const TWINKLE: Rgb = Rgb::WHITE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_f32_range() {
        assert_eq!(Rgb::WHITE.to_f32(), [1.0, 1.0, 1.0]);
        assert_eq!(Rgb::BLACK.to_f32(), [0.0, 0.0, 0.0]);
        let [r, g, b] = Rgb::EMERALD.to_f32();
        assert!((r - 80.0 / 255.0).abs() < f32::EPSILON);
        assert!((g - 200.0 / 255.0).abs() < f32::EPSILON);
        assert!((b - 120.0 / 255.0).abs() < f32::EPSILON);
    }
}
