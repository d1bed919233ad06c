//! Tessellation configuration and builder
//!
//! This module provides configuration types for deterministic tessellation
//! generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TessellationError};

/// Canvas size presets for the tessellated region
///
/// Each preset maps to a square canvas; `Custom` allows arbitrary rectangles.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasSize {
    /// 512 x 512 canvas, suitable for quick previews
    Small,
    /// 1024 x 1024 canvas (default, matches the reference artwork size)
    Medium,
    /// 2048 x 2048 canvas for print-quality output
    Large,
    /// Custom canvas dimensions in user units
    Custom {
        /// Canvas width
        width: f32,
        /// Canvas height
        height: f32,
    },
}

impl CanvasSize {
    /// Get the canvas width for this size
    pub fn width(self) -> f32 {
        match self {
            CanvasSize::Small => 512.0,
            CanvasSize::Medium => 1024.0,
            CanvasSize::Large => 2048.0,
            CanvasSize::Custom { width, .. } => width,
        }
    }

    /// Get the canvas height for this size
    pub fn height(self) -> f32 {
        match self {
            CanvasSize::Small => 512.0,
            CanvasSize::Medium => 1024.0,
            CanvasSize::Large => 2048.0,
            CanvasSize::Custom { height, .. } => height,
        }
    }

    /// Get a human-readable name for this canvas size
    pub fn name(self) -> &'static str {
        match self {
            CanvasSize::Small => "Small",
            CanvasSize::Medium => "Medium",
            CanvasSize::Large => "Large",
            CanvasSize::Custom { .. } => "Custom",
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        CanvasSize::Medium
    }
}

/// Configuration for deterministic tessellation generation
///
/// The same configuration will always produce the identical tessellation:
/// generation is a pure function of the ChaCha random stream seeded below.
///
/// # Example
///
/// ```rust
/// use rust_circle_tessellation::*;
///
/// let config = TessellationConfigBuilder::new()
///     .seed(42)
///     .canvas_size(CanvasSize::Small)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed, 42);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationConfig {
    /// Random seed for deterministic generation
    ///
    /// The same seed (with the same canvas and radii) always produces the
    /// exact same disks and triangles in the same order.
    pub seed: u32,

    /// Canvas size preset (the rectangle the packing fills)
    pub canvas_size: CanvasSize,

    /// Smallest disk radius the engine will place
    pub min_radius: f32,

    /// Largest disk radius the engine will place
    ///
    /// Also the bucket side of the internal spatial grid.
    pub max_radius: f32,

    /// How many times a frontier edge may be deferred before it is declared
    /// unresolvable and handed to the loop closer
    pub retry_budget: u8,

    /// Random seed for the color noise field (separate from `seed`)
    ///
    /// This allows the same geometry with different color washes.
    pub color_seed: u32,
}

impl TessellationConfig {
    /// Get the canvas width for this configuration
    #[inline]
    pub fn width(&self) -> f32 {
        self.canvas_size.width()
    }

    /// Get the canvas height for this configuration
    #[inline]
    pub fn height(&self) -> f32 {
        self.canvas_size.height()
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        TessellationConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating a [`TessellationConfig`] with validation
///
/// # Example
///
/// ```rust
/// use rust_circle_tessellation::*;
///
/// let config = TessellationConfigBuilder::new()
///     .seed(12345)
///     .canvas_size(CanvasSize::Medium)
///     .radius_range(16.0, 64.0)
///     .unwrap()
///     .retry_budget(10)
///     .unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TessellationConfigBuilder {
    seed: Option<u32>,
    canvas_size: CanvasSize,
    min_radius: f32,
    max_radius: f32,
    retry_budget: u8,
    color_seed: Option<u32>,
}

impl TessellationConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random (generated from thread_rng)
    /// - canvas_size: Medium (1024 x 1024)
    /// - radii: 16.0 to 64.0
    /// - retry_budget: 10
    /// - color_seed: same as seed
    pub fn new() -> Self {
        Self {
            seed: None,
            canvas_size: CanvasSize::default(),
            min_radius: 16.0,
            max_radius: 64.0,
            retry_budget: 10,
            color_seed: None,
        }
    }

    /// Set the random seed for geometry generation
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the canvas size preset
    pub fn canvas_size(mut self, size: CanvasSize) -> Self {
        self.canvas_size = size;
        self
    }

    /// Set the disk radius range
    ///
    /// Every placed disk draws its radius uniformly from `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min` is not positive or `max < min`.
    pub fn radius_range(mut self, min: f32, max: f32) -> Result<Self> {
        if min <= 0.0 {
            return Err(TessellationError::InvalidConfig(format!(
                "minimum radius must be positive (got {})",
                min
            )));
        }
        if max < min {
            return Err(TessellationError::InvalidConfig(format!(
                "maximum radius {} is smaller than minimum radius {}",
                max, min
            )));
        }
        self.min_radius = min;
        self.max_radius = max;
        Ok(self)
    }

    /// Set the per-edge retry budget
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the budget is zero; every edge must be
    /// allowed at least one deferral before it is declared dead.
    pub fn retry_budget(mut self, budget: u8) -> Result<Self> {
        if budget == 0 {
            return Err(TessellationError::InvalidConfig(
                "retry budget must be at least 1".to_string(),
            ));
        }
        self.retry_budget = budget;
        Ok(self)
    }

    /// Set a separate color seed
    ///
    /// If not set, the color seed will match the geometry seed.
    pub fn color_seed(mut self, seed: u32) -> Self {
        self.color_seed = Some(seed);
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either canvas dimension is smaller than
    /// four maximum radii; below that the packing cannot be guaranteed to
    /// terminate with a sensible frontier.
    pub fn build(self) -> Result<TessellationConfig> {
        let min_extent = self.canvas_size.width().min(self.canvas_size.height());
        if min_extent < 4.0 * self.max_radius {
            return Err(TessellationError::InvalidConfig(format!(
                "canvas must be at least 4 x max_radius ({}) on each side, got {} x {}",
                4.0 * self.max_radius,
                self.canvas_size.width(),
                self.canvas_size.height()
            )));
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        let color_seed = self.color_seed.unwrap_or(seed);

        Ok(TessellationConfig {
            seed,
            canvas_size: self.canvas_size,
            min_radius: self.min_radius,
            max_radius: self.max_radius,
            retry_budget: self.retry_budget,
            color_seed,
        })
    }
}

impl Default for TessellationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_dimensions() {
        assert_eq!(CanvasSize::Small.width(), 512.0);
        assert_eq!(CanvasSize::Medium.width(), 1024.0);
        assert_eq!(CanvasSize::Large.height(), 2048.0);

        let custom = CanvasSize::Custom {
            width: 640.0,
            height: 480.0,
        };
        assert_eq!(custom.width(), 640.0);
        assert_eq!(custom.height(), 480.0);
        assert_eq!(custom.name(), "Custom");
    }

    #[test]
    fn test_builder_defaults() {
        let config = TessellationConfigBuilder::new().build().unwrap();
        assert_eq!(config.canvas_size, CanvasSize::Medium);
        assert_eq!(config.min_radius, 16.0);
        assert_eq!(config.max_radius, 64.0);
        assert_eq!(config.retry_budget, 10);
    }

    #[test]
    fn test_builder_custom() {
        let config = TessellationConfigBuilder::new()
            .seed(42)
            .canvas_size(CanvasSize::Small)
            .radius_range(8.0, 32.0)
            .unwrap()
            .retry_budget(5)
            .unwrap()
            .color_seed(99)
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.canvas_size, CanvasSize::Small);
        assert_eq!(config.min_radius, 8.0);
        assert_eq!(config.max_radius, 32.0);
        assert_eq!(config.retry_budget, 5);
        assert_eq!(config.color_seed, 99);
    }

    #[test]
    fn test_color_seed_defaults_to_seed() {
        let config = TessellationConfigBuilder::new().seed(42).build().unwrap();
        assert_eq!(config.color_seed, 42);
    }

    #[test]
    fn test_invalid_radius_range() {
        assert!(TessellationConfigBuilder::new()
            .radius_range(0.0, 10.0)
            .is_err());
        assert!(TessellationConfigBuilder::new()
            .radius_range(-4.0, 10.0)
            .is_err());
        assert!(TessellationConfigBuilder::new()
            .radius_range(20.0, 10.0)
            .is_err());
    }

    #[test]
    fn test_invalid_retry_budget() {
        assert!(TessellationConfigBuilder::new().retry_budget(0).is_err());
    }

    #[test]
    fn test_canvas_too_small_for_radii() {
        let result = TessellationConfigBuilder::new()
            .canvas_size(CanvasSize::Custom {
                width: 100.0,
                height: 100.0,
            })
            .build();
        assert!(result.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = TessellationConfigBuilder::new()
            .seed(12345)
            .canvas_size(CanvasSize::Small)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: TessellationConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.seed, restored.seed);
        assert_eq!(config.canvas_size, restored.canvas_size);
    }
}
