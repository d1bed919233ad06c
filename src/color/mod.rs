//! Color sampling for triangle fills
//!
//! A tessellation carries no color of its own; fills are a deterministic
//! function of canvas position. The default sampler feeds the position
//! through three decorrelated Perlin channels to produce the hue,
//! saturation and lightness washes of the reference artwork.

mod perlin;

pub use perlin::{sample_perlin_2d, sample_perlin_fbm, PerlinConfig};

use glam::Vec2;
use std::fmt;

/// An HSL color, formatted for SVG as `hsl(h, s%, l%)`
///
/// The hue wraps modulo 360 degrees (negative hues use their absolute
/// value); saturation and lightness clamp to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    /// Hue in degrees
    pub hue: f32,
    /// Saturation percentage
    pub saturation: f32,
    /// Lightness percentage
    pub lightness: f32,
}

impl HslColor {
    /// Create a color from raw channel values
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Format as a CSS/SVG color string
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hue = self.hue.abs() % 360.0;
        let saturation = self.saturation.clamp(0.0, 100.0);
        let lightness = self.lightness.clamp(0.0, 100.0);
        write!(f, "hsl({:.1}, {:.1}%, {:.1}%)", hue, saturation, lightness)
    }
}

/// Trait for mapping a canvas position to a fill color
pub trait ColorSampler {
    /// Sample the color at a canvas position
    fn sample(&self, position: Vec2) -> HslColor;
}

/// Default color sampler backed by a smooth 2D noise field
///
/// The canvas is mapped onto `noise_scale` noise units in each axis (so the
/// whole image spans a few smooth features), then each HSL channel samples
/// the field at a large fixed offset from the others:
/// hue spans the full back half of the wheel, saturation stays in the
/// 60-100% band and lightness in the 40-100% band.
pub struct PerlinColorField {
    /// Seed for the noise field
    pub seed: u32,
    /// Canvas width the positions are normalized against
    pub canvas_width: f32,
    /// Canvas height the positions are normalized against
    pub canvas_height: f32,
    /// Noise units the canvas spans per axis (default 4.0)
    pub noise_scale: f32,
    /// Perlin noise configuration
    pub config: PerlinConfig,
}

impl PerlinColorField {
    /// Create a color field for a canvas with the given seed
    pub fn new(seed: u32, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            seed,
            canvas_width,
            canvas_height,
            noise_scale: 4.0,
            config: PerlinConfig::default(),
        }
    }

    /// Create a color field with a custom noise configuration
    pub fn with_config(seed: u32, canvas_width: f32, canvas_height: f32, config: PerlinConfig) -> Self {
        Self {
            config,
            ..Self::new(seed, canvas_width, canvas_height)
        }
    }

    fn noise(&self, p: Vec2) -> f32 {
        sample_perlin_fbm(
            p * self.config.base_frequency,
            self.seed,
            self.config.octaves,
            self.config.persistence,
            self.config.lacunarity,
        )
    }
}

impl ColorSampler for PerlinColorField {
    fn sample(&self, position: Vec2) -> HslColor {
        let m = Vec2::new(
            position.x / self.canvas_width,
            position.y / self.canvas_height,
        ) * self.noise_scale;

        // Large fixed offsets decorrelate the three channels
        let hue = self.noise(m) * 180.0 + 180.0;
        let saturation = self.noise(m + Vec2::new(0.0, self.canvas_height)) * 20.0 + 80.0;
        let lightness = self.noise(m + Vec2::new(self.canvas_width, 0.0)) * 30.0 + 70.0;

        HslColor::new(hue, saturation, lightness)
    }
}
