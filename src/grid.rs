//! Uniform bucket index over the canvas
//!
//! The frontier engine needs "who is near this point" many thousands of
//! times per run. Because no disk is larger than `max_radius`, a uniform
//! grid with buckets of that side length answers the question with a small
//! constant number of cell lookups. Queries over-approximate: callers must
//! still do exact distance checks on the returned handles.

use glam::Vec2;

/// Uniform spatial bucket grid over disk centers
///
/// Buckets hold disk handles in insertion order; together with the fixed
/// cell iteration order this keeps every query deterministic. Disks are
/// permanent once placed, so no deletion is supported. Queries outside the
/// canvas are clamped to the border cells, never an error.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Create a grid covering `width` x `height` with square buckets of
    /// side `cell_size`
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
        }
    }

    /// Number of bucket columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of bucket rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn bucket_coords(&self, p: Vec2) -> (usize, usize) {
        let cx = ((p.x / self.cell_size) as isize).clamp(0, self.cols as isize - 1) as usize;
        let cy = ((p.y / self.cell_size) as isize).clamp(0, self.rows as isize - 1) as usize;
        (cx, cy)
    }

    /// Insert a disk handle at its center position
    pub fn insert(&mut self, id: usize, center: Vec2) {
        let (cx, cy) = self.bucket_coords(center);
        self.buckets[cy * self.cols + cx].push(id);
    }

    /// All disk handles in the (2*ring+1)^2 block of cells around `p`
    ///
    /// The block is clamped at the grid edges. The result is a conservative
    /// superset of "disks within `ring * cell_size` of `p`".
    pub fn neighbors(&self, p: Vec2, ring: usize) -> Vec<usize> {
        let (cx, cy) = self.bucket_coords(p);
        let ring = ring as isize;

        let x0 = (cx as isize - ring).max(0) as usize;
        let x1 = (cx as isize + ring).min(self.cols as isize - 1) as usize;
        let y0 = (cy as isize - ring).max(0) as usize;
        let y1 = (cy as isize + ring).min(self.rows as isize - 1) as usize;

        let mut out = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                out.extend_from_slice(&self.buckets[y * self.cols + x]);
            }
        }
        out
    }
}
