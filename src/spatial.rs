//! Spatial indexing for fast position-to-disk lookups
//!
//! This module is only available with the `spatial-index` feature. It serves
//! consumers of a finished tessellation (hit testing, interactive tooling);
//! the engine itself uses the incremental bucket grid in [`crate::grid`].

use glam::Vec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around a KD-tree over disk centers
///
/// Provides O(log n) nearest-neighbor lookups to convert a canvas position
/// into a disk handle. Built once after generation; disks never move, so an
/// immutable tree fits.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
}

impl SpatialIndex {
    /// Build a spatial index from disk centers
    ///
    /// # Example
    ///
    /// ```
    /// use rust_circle_tessellation::SpatialIndex;
    /// use glam::Vec2;
    ///
    /// let centers = vec![
    ///     Vec2::new(10.0, 10.0),
    ///     Vec2::new(100.0, 10.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&centers);
    /// assert_eq!(index.find_nearest(Vec2::new(12.0, 8.0)), 0);
    /// ```
    pub fn new(centers: &[Vec2]) -> Self {
        let points: Vec<[f32; 2]> = centers.iter().map(|c| [c.x, c.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the disk whose center is nearest to a position
    pub fn find_nearest(&self, position: Vec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item
    }
}
