//! # Rust Circle Tessellation
//!
//! A deterministic circle-packing triangulation engine for generative line
//! art. An advancing front of tangency edges grows a packing of
//! non-overlapping disks outward from the canvas center; every placement
//! emits a triangle over the three disk centers involved, and a second pass
//! closes the polygonal holes left behind into fans of extra triangles.
//!
//! ## Features
//!
//! - **Deterministic generation**: the same seed always produces a
//!   bit-identical tessellation
//! - **Configurable canvas and disk radii** via a validating builder
//! - **Perlin-noise color fields** for painting the triangles
//! - **SVG output** with solid or per-triangle gradient fills and debug
//!   overlays
//! - **Optional KD-tree index** for nearest-disk queries (feature
//!   `spatial-index`, enabled by default)
//!
//! ## Quick start
//!
//! ```
//! use rust_circle_tessellation::*;
//!
//! let config = TessellationConfigBuilder::new()
//!     .seed(42)
//!     .canvas_size(CanvasSize::Small)
//!     .build()
//!     .unwrap();
//!
//! let tess = Tessellation::generate(config).unwrap();
//!
//! let field = PerlinColorField::new(config.color_seed, config.width(), config.height());
//! let doc = render(&tess, &field, &RenderOptions::default());
//!
//! assert!(tess.triangle_count() > 0);
//! assert!(doc.to_svg_string().contains("<polygon"));
//! ```

pub mod color;
pub mod config;
pub mod disk;
pub mod error;
pub mod grid;
pub mod svg;
pub mod tessellation;

mod generation;

#[cfg(feature = "spatial-index")]
pub mod spatial;

pub use color::{
    sample_perlin_2d, sample_perlin_fbm, ColorSampler, HslColor, PerlinColorField, PerlinConfig,
};
pub use config::{CanvasSize, TessellationConfig, TessellationConfigBuilder};
pub use disk::{Disk, DiskGraph, Triangle};
pub use error::{Result, TessellationError};
pub use svg::{render, Document, FillMode, LinearGradient, RenderOptions, Shape};
pub use tessellation::Tessellation;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export the vector type used throughout the public API
pub use glam::Vec2;
