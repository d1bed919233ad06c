//! Finished tessellation and its query surface

use glam::Vec2;

use crate::config::TessellationConfig;
use crate::disk::{Disk, DiskGraph, Triangle};
use crate::error::{Result, TessellationError};
use crate::generation;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete circle-packing triangulation of a canvas
///
/// Downstream collaborators (color sampling, SVG serialization) treat this
/// as a read-only snapshot: the triangle list in emission order, the full
/// disk set for debug overlays, and the dead-edge loops the closer filled.
///
/// # Examples
///
/// ```
/// use rust_circle_tessellation::*;
///
/// let config = TessellationConfigBuilder::new()
///     .seed(42)
///     .canvas_size(CanvasSize::Small)
///     .build()
///     .unwrap();
///
/// let tess = Tessellation::generate(config).unwrap();
/// assert!(tess.triangle_count() > 0);
///
/// let first = tess.triangles()[0];
/// let centroid = tess.triangle_centroid(&first);
/// assert!(centroid.x >= -2.0 * config.max_radius);
/// ```
#[derive(Clone)]
pub struct Tessellation {
    /// Configuration used to generate this tessellation
    config: TessellationConfig,

    /// All placed disks, keyed by handle
    disks: DiskGraph,

    /// Triangles in emission order (frontier first, loop closures after)
    triangles: Vec<Triangle>,

    /// Edge lists of the closed dead-edge loops
    loops: Vec<Vec<(usize, usize)>>,

    /// Dead edges that never joined a closed loop
    unclosed: Vec<(usize, usize)>,

    /// KD-tree over disk centers for nearest-disk queries
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Tessellation {
    /// Generate a tessellation from a configuration
    ///
    /// Deterministic: the same configuration always produces bit-identical
    /// output.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if the loop closer detects a broken
    /// invariant (see [`TessellationError`]); this signals a logic defect,
    /// not a recoverable condition.
    pub fn generate(config: TessellationConfig) -> Result<Self> {
        let raw = generation::tessellate(&config)?;

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<Vec2> = raw.disks.iter().map(|d| d.center).collect();
            SpatialIndex::new(&centers)
        };

        Ok(Self {
            config,
            disks: raw.disks,
            triangles: raw.triangles,
            loops: raw.loops,
            unclosed: raw.unclosed,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this tessellation
    #[inline]
    pub fn config(&self) -> &TessellationConfig {
        &self.config
    }

    /// The full disk graph
    #[inline]
    pub fn disks(&self) -> &DiskGraph {
        &self.disks
    }

    /// Number of placed disks
    #[inline]
    pub fn disk_count(&self) -> usize {
        self.disks.len()
    }

    /// The triangles in emission order
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of emitted triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Edge lists of the dead-edge loops the closer filled
    #[inline]
    pub fn loops(&self) -> &[Vec<(usize, usize)>] {
        &self.loops
    }

    /// Dead edges that never joined a closed loop (diagnostics only)
    #[inline]
    pub fn unclosed_edges(&self) -> &[(usize, usize)] {
        &self.unclosed
    }

    /// Look up a disk by handle
    #[inline]
    pub fn get_disk(&self, id: usize) -> Option<&Disk> {
        self.disks.get(id)
    }

    /// Look up a disk by handle, with an error for bad handles
    pub fn try_disk(&self, id: usize) -> Result<&Disk> {
        self.disks.get(id).ok_or(TessellationError::DiskNotFound(id))
    }

    /// Resolve a triangle's vertex positions
    #[inline]
    pub fn triangle_vertices(&self, tri: &Triangle) -> [Vec2; 3] {
        tri.vertices(&self.disks)
    }

    /// Resolve a triangle's centroid
    #[inline]
    pub fn triangle_centroid(&self, tri: &Triangle) -> Vec2 {
        tri.centroid(&self.disks)
    }

    /// Find the disk whose center is nearest to a position
    ///
    /// O(log n) KD-tree lookup. Only available with the `spatial-index`
    /// feature (enabled by default).
    #[cfg(feature = "spatial-index")]
    pub fn find_nearest_disk(&self, position: Vec2) -> usize {
        self.spatial_index.find_nearest(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CanvasSize, TessellationConfigBuilder};

    fn reference_config() -> TessellationConfig {
        // The reference artwork scenario: 1024x1024, radii 16/64
        TessellationConfigBuilder::new()
            .seed(77)
            .canvas_size(CanvasSize::Medium)
            .radius_range(16.0, 64.0)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_reference_scenario_fills_the_canvas() {
        let tess = Tessellation::generate(reference_config()).unwrap();

        assert!(
            tess.triangle_count() >= 50,
            "expected at least 50 triangles, got {}",
            tess.triangle_count()
        );
        assert!(tess.disk_count() >= 50);

        // Every dead edge either joined a closed loop or the run had none;
        // nothing may be left dangling
        assert!(
            tess.unclosed_edges().is_empty(),
            "{} dead edges never joined a loop",
            tess.unclosed_edges().len()
        );

        // Every triangle references valid handles
        for tri in tess.triangles() {
            assert!(tess.get_disk(tri.a).is_some());
            assert!(tess.get_disk(tri.b).is_some());
            assert!(tess.get_disk(tri.c).is_some());
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = reference_config();
        let t1 = Tessellation::generate(config).unwrap();
        let t2 = Tessellation::generate(config).unwrap();

        assert_eq!(t1.triangles(), t2.triangles());
        assert_eq!(t1.disk_count(), t2.disk_count());
        assert_eq!(t1.loops(), t2.loops());
        assert_eq!(t1.unclosed_edges(), t2.unclosed_edges());
        for (d1, d2) in t1.disks().iter().zip(t2.disks().iter()) {
            assert_eq!(d1.center, d2.center);
            assert_eq!(d1.radius, d2.radius);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let c1 = TessellationConfigBuilder::new()
            .seed(1)
            .canvas_size(CanvasSize::Small)
            .build()
            .unwrap();
        let c2 = TessellationConfigBuilder::new()
            .seed(2)
            .canvas_size(CanvasSize::Small)
            .build()
            .unwrap();

        let t1 = Tessellation::generate(c1).unwrap();
        let t2 = Tessellation::generate(c2).unwrap();

        let d1 = t1.disks().disk(1);
        let d2 = t2.disks().disk(1);
        assert!(
            d1.center != d2.center || d1.radius != d2.radius,
            "different seeds should place the second disk differently"
        );
    }

    #[test]
    fn test_loop_triangles_are_appended() {
        let tess = Tessellation::generate(reference_config()).unwrap();

        let loop_triangles: usize = tess.loops().iter().map(|l| l.len() - 2).sum();
        assert!(tess.triangle_count() > loop_triangles);
    }

    #[test]
    fn test_try_disk_bad_handle() {
        let tess = Tessellation::generate(reference_config()).unwrap();
        let missing = tess.disk_count() + 10;
        assert!(matches!(
            tess.try_disk(missing),
            Err(TessellationError::DiskNotFound(id)) if id == missing
        ));
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_nearest_disk() {
        let tess = Tessellation::generate(reference_config()).unwrap();

        // The nearest disk to any disk's own center is that disk
        let probe = tess.disks().disk(3);
        assert_eq!(tess.find_nearest_disk(probe.center), 3);
    }
}
