//! Disk graph data model
//!
//! Disks are the atomic unit of the packing: circles that are placed once and
//! never moved or removed. The graph stores them in a growable arena keyed by
//! a stable `usize` handle, and tracks for every linked pair how many
//! triangles already reference it (the share count, 0 to 2).

use glam::Vec2;
use std::collections::BTreeMap;

/// A placed disk: center, radius and its link map
///
/// The link map records every neighboring disk this one has been connected
/// to, along with the share count of that pair. A planar edge is shared by at
/// most two triangles; a count of 2 means the edge is interior and must not
/// be reused.
#[derive(Debug, Clone)]
pub struct Disk {
    /// Stable handle of this disk in its [`DiskGraph`] (0 to disk_count-1)
    pub id: usize,
    /// Center position on the canvas
    pub center: Vec2,
    /// Disk radius, always positive
    pub radius: f32,
    /// Neighbor handle -> share count, ordered for deterministic iteration
    pub links: BTreeMap<usize, u8>,
}

impl Disk {
    /// Number of disks this one is linked to
    #[inline]
    pub fn degree(&self) -> usize {
        self.links.len()
    }

    /// Squared distance from this disk's center to a point
    #[inline]
    pub fn dist2(&self, p: Vec2) -> f32 {
        self.center.distance_squared(p)
    }
}

/// An ordered triple of disk handles, emitted once and immutable
///
/// The output of the whole engine is the sequence of triangles in insertion
/// order (frontier triangles first, loop-closure triangles appended after).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    /// First vertex handle
    pub a: usize,
    /// Second vertex handle
    pub b: usize,
    /// Third vertex handle
    pub c: usize,
}

impl Triangle {
    /// Create a triangle from three disk handles
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    /// Resolve the three vertex positions against a graph
    pub fn vertices(&self, graph: &DiskGraph) -> [Vec2; 3] {
        [
            graph.disk(self.a).center,
            graph.disk(self.b).center,
            graph.disk(self.c).center,
        ]
    }

    /// Centroid of the triangle (the position its fill color is sampled at)
    pub fn centroid(&self, graph: &DiskGraph) -> Vec2 {
        let [a, b, c] = self.vertices(graph);
        (a + b + c) / 3.0
    }
}

/// Arena of placed disks plus their pairwise link bookkeeping
///
/// Handles returned by [`DiskGraph::add`] are dense indices and stay valid
/// for the lifetime of the graph; disks are never removed.
#[derive(Debug, Clone, Default)]
pub struct DiskGraph {
    disks: Vec<Disk>,
}

impl DiskGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self { disks: Vec::new() }
    }

    /// Place a new disk and return its handle
    pub fn add(&mut self, center: Vec2, radius: f32) -> usize {
        let id = self.disks.len();
        self.disks.push(Disk {
            id,
            center,
            radius,
            links: BTreeMap::new(),
        });
        id
    }

    /// Number of placed disks
    #[inline]
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Check whether the graph holds no disks
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Look up a disk by handle
    #[inline]
    pub fn get(&self, id: usize) -> Option<&Disk> {
        self.disks.get(id)
    }

    /// Look up a disk by handle, panicking on a bad handle
    ///
    /// Internal callers only ever hold handles produced by [`DiskGraph::add`].
    #[inline]
    pub fn disk(&self, id: usize) -> &Disk {
        &self.disks[id]
    }

    /// Iterate over all disks in placement order
    pub fn iter(&self) -> impl Iterator<Item = &Disk> {
        self.disks.iter()
    }

    /// Link two disks with a share count of zero
    ///
    /// Idempotent: an existing link (and its count) is left untouched.
    pub fn establish_link(&mut self, a: usize, b: usize) {
        self.disks[a].links.entry(b).or_insert(0);
        self.disks[b].links.entry(a).or_insert(0);
    }

    /// Record a new triangle on all three pairs of a triple
    ///
    /// Bumps the share count of a-b, b-c and c-a in both directions,
    /// creating the link entries if they are missing.
    pub fn increment_links(&mut self, a: usize, b: usize, c: usize) {
        self.bump(a, b);
        self.bump(b, c);
        self.bump(c, a);
    }

    fn bump(&mut self, a: usize, b: usize) {
        *self.disks[a].links.entry(b).or_insert(0) += 1;
        *self.disks[b].links.entry(a).or_insert(0) += 1;
    }

    /// Share count of the pair (a, b), or `None` if they are not linked
    #[inline]
    pub fn link_count(&self, a: usize, b: usize) -> Option<u8> {
        self.disks[a].links.get(&b).copied()
    }

    /// Check whether two disks are linked
    #[inline]
    pub fn is_linked(&self, a: usize, b: usize) -> bool {
        self.disks[a].links.contains_key(&b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut graph = DiskGraph::new();
        let a = graph.add(Vec2::new(10.0, 20.0), 5.0);
        let b = graph.add(Vec2::new(30.0, 20.0), 7.0);

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.disk(a).radius, 5.0);
        assert_eq!(graph.disk(b).center, Vec2::new(30.0, 20.0));
        assert!(graph.get(2).is_none());
    }

    #[test]
    fn test_establish_link_is_idempotent() {
        let mut graph = DiskGraph::new();
        let a = graph.add(Vec2::ZERO, 1.0);
        let b = graph.add(Vec2::X, 1.0);

        graph.establish_link(a, b);
        assert_eq!(graph.link_count(a, b), Some(0));
        assert_eq!(graph.link_count(b, a), Some(0));

        let c = graph.add(Vec2::Y, 1.0);
        graph.increment_links(a, b, c);
        graph.establish_link(a, b);
        assert_eq!(
            graph.link_count(a, b),
            Some(1),
            "re-establishing a link must not reset its share count"
        );
    }

    #[test]
    fn test_increment_links_is_symmetric() {
        let mut graph = DiskGraph::new();
        let a = graph.add(Vec2::ZERO, 1.0);
        let b = graph.add(Vec2::X, 1.0);
        let c = graph.add(Vec2::Y, 1.0);

        graph.increment_links(a, b, c);

        for (x, y) in [(a, b), (b, c), (c, a)] {
            assert_eq!(graph.link_count(x, y), Some(1));
            assert_eq!(graph.link_count(y, x), Some(1));
        }

        graph.increment_links(a, b, c);
        assert_eq!(graph.link_count(a, b), Some(2));
    }

    #[test]
    fn test_unlinked_pair() {
        let mut graph = DiskGraph::new();
        let a = graph.add(Vec2::ZERO, 1.0);
        let b = graph.add(Vec2::X, 1.0);

        assert!(!graph.is_linked(a, b));
        assert_eq!(graph.link_count(a, b), None);
    }

    #[test]
    fn test_triangle_centroid() {
        let mut graph = DiskGraph::new();
        let a = graph.add(Vec2::new(0.0, 0.0), 1.0);
        let b = graph.add(Vec2::new(3.0, 0.0), 1.0);
        let c = graph.add(Vec2::new(0.0, 3.0), 1.0);

        let tri = Triangle::new(a, b, c);
        assert_eq!(tri.centroid(&graph), Vec2::new(1.0, 1.0));
        assert_eq!(tri.vertices(&graph)[1], Vec2::new(3.0, 0.0));
    }
}
