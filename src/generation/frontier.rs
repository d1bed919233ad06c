//! Advancing-front circle packing
//!
//! The engine grows a frontier of exposed edges outward from a seed pair of
//! tangent disks. Each edge is resolved by one of three branches: merging
//! with a disk that already sits where the new one would go, deferring when
//! every placement overlaps, or placing a fresh tangent disk and emitting a
//! triangle. Edges that exhaust their retry budget are parked on the dead
//! list for the loop closer.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::TessellationConfig;
use crate::disk::{DiskGraph, Triangle};
use crate::generation::geom::{in_canvas, outward_tangent_point, TangentSolution};
use crate::grid::SpatialGrid;

/// Slack subtracted from the sum of radii in the overlap test
///
/// Two disks whose gap is smaller than this are treated as non-overlapping,
/// which lets tangent placements survive floating point jitter.
pub(crate) const OVERLAP_TOLERANCE: f32 = 2.0;

/// One boundary edge of the not-yet-triangulated region
///
/// Directed: the triangle implied by this edge always lies on the same
/// rotational side of a->b, which keeps the frontier outward-facing.
/// `attempts` counts how many deferrals the edge has left before it is
/// declared dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExposedEdge {
    pub a: usize,
    pub b: usize,
    pub attempts: u8,
}

impl ExposedEdge {
    fn new(a: usize, b: usize, attempts: u8) -> Self {
        Self { a, b, attempts }
    }
}

pub(crate) struct FrontierEngine {
    width: f32,
    height: f32,
    min_radius: f32,
    max_radius: f32,
    retry_budget: u8,
    rng: ChaCha8Rng,
    graph: DiskGraph,
    grid: SpatialGrid,
    edges: VecDeque<ExposedEdge>,
    dead: Vec<ExposedEdge>,
    triangles: Vec<Triangle>,
}

impl FrontierEngine {
    pub fn new(config: &TessellationConfig) -> Self {
        let width = config.width();
        let height = config.height();
        Self {
            width,
            height,
            min_radius: config.min_radius,
            max_radius: config.max_radius,
            retry_budget: config.retry_budget,
            rng: ChaCha8Rng::seed_from_u64(config.seed as u64),
            graph: DiskGraph::new(),
            grid: SpatialGrid::new(width, height, config.max_radius),
            edges: VecDeque::new(),
            dead: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Run the frontier to exhaustion
    ///
    /// Returns the disk graph, the triangles in emission order, and the
    /// dead edges for the loop closer.
    pub fn run(mut self) -> (DiskGraph, Vec<Triangle>, Vec<ExposedEdge>) {
        self.bootstrap();
        self.drain();
        (self.graph, self.triangles, self.dead)
    }

    /// Seed the frontier: one disk at the canvas center, a second tangent to
    /// it at a random angle, and both directed edges between them
    fn bootstrap(&mut self) {
        let first_radius = self.random_radius();
        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        let first = self.add_disk(center, first_radius);

        let second_radius = self.random_radius();
        let angle: f32 = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let offset = Vec2::new(angle.cos(), angle.sin()) * (first_radius + second_radius);
        let second = self.add_disk(center + offset, second_radius);

        self.graph.establish_link(first, second);
        self.edges
            .push_back(ExposedEdge::new(first, second, self.retry_budget));
        self.edges
            .push_back(ExposedEdge::new(second, first, self.retry_budget));
    }

    /// Consume frontier edges until none remain
    fn drain(&mut self) {
        while let Some(edge) = self.edges.pop_front() {
            self.advance(edge);
        }
    }

    /// Resolve a single frontier edge
    fn advance(&mut self, edge: ExposedEdge) {
        // A pair that already carries two triangles is interior; a queued
        // edge for it is stale and must not spawn a third.
        if self.graph.link_count(edge.a, edge.b) == Some(2) {
            return;
        }

        let new_radius = self.random_radius();
        let (a, b) = (self.graph.disk(edge.a), self.graph.disk(edge.b));
        let candidate = match outward_tangent_point(
            a.center,
            a.radius,
            b.center,
            b.radius,
            new_radius,
        ) {
            TangentSolution::Point(p) => p,
            // The endpoints are too far apart for this draw; a bigger radius
            // may still span the gap, so retry like an overlapped placement
            TangentSolution::OutOfReach => {
                self.defer(edge);
                return;
            }
            // Degenerate edge: skip it, no triangle
            TangentSolution::Degenerate => return,
        };

        if self.try_merge_existing(&edge, candidate) {
            return;
        }

        if self.overlaps_existing(candidate, new_radius) {
            self.defer(edge);
            return;
        }

        self.place_new_disk(&edge, candidate, new_radius);
    }

    /// Requeue an unresolvable edge at the back, or dead-list it once its
    /// retry budget is spent
    fn defer(&mut self, edge: ExposedEdge) {
        if edge.attempts > 0 {
            self.edges
                .push_back(ExposedEdge::new(edge.a, edge.b, edge.attempts - 1));
        } else {
            self.dead.push(edge);
        }
    }

    /// Close the edge against a disk that already sits at the candidate spot
    ///
    /// First match wins; the grid's bucket-then-insertion order is the only
    /// tie-break.
    fn try_merge_existing(&mut self, edge: &ExposedEdge, candidate: Vec2) -> bool {
        let near2 = self.min_radius * self.min_radius;
        for p in self.grid.neighbors(candidate, 1) {
            if self.graph.disk(p).dist2(candidate) >= near2 {
                continue;
            }
            if self.shareable(edge.a, p) {
                // p already touches a; the surviving exposed side is p->b
                self.graph.establish_link(p, edge.b);
                self.finish_merge(p, edge, (p, edge.b));
                return true;
            }
            if self.shareable(edge.b, p) {
                // p already touches b; the surviving exposed side is a->p
                self.graph.establish_link(p, edge.a);
                self.finish_merge(p, edge, (edge.a, p));
                return true;
            }
        }
        false
    }

    /// Whether the pair (x, p) is linked and still has room for a triangle
    fn shareable(&self, x: usize, p: usize) -> bool {
        matches!(self.graph.link_count(x, p), Some(count) if count < 2)
    }

    fn finish_merge(&mut self, p: usize, edge: &ExposedEdge, exposed: (usize, usize)) {
        self.graph.increment_links(p, edge.a, edge.b);
        self.triangles.push(Triangle::new(p, edge.a, edge.b));

        if in_canvas(self.width, self.height, self.graph.disk(p).center) {
            // Both sides of the new triangle that became interior
            self.remove_frontier_edge(p, edge.a);
            self.remove_frontier_edge(edge.b, p);
            // The corrected still-exposed edge
            self.edges
                .push_back(ExposedEdge::new(exposed.0, exposed.1, self.retry_budget));
        }
    }

    fn remove_frontier_edge(&mut self, a: usize, b: usize) {
        self.edges.retain(|e| !(e.a == a && e.b == b));
    }

    /// Whether a disk of `radius` at `candidate` would overlap a placed disk
    fn overlaps_existing(&self, candidate: Vec2, radius: f32) -> bool {
        for p in self.grid.neighbors(candidate, 2) {
            let disk = self.graph.disk(p);
            let clearance = disk.radius + radius - OVERLAP_TOLERANCE;
            if disk.dist2(candidate) < clearance * clearance {
                return true;
            }
        }
        false
    }

    /// Place the candidate disk, emit its triangle and grow the frontier
    fn place_new_disk(&mut self, edge: &ExposedEdge, candidate: Vec2, radius: f32) {
        let id = self.add_disk(candidate, radius);
        self.graph.establish_link(id, edge.a);
        self.graph.establish_link(id, edge.b);
        self.graph.increment_links(id, edge.a, edge.b);
        self.triangles.push(Triangle::new(id, edge.a, edge.b));

        if !in_canvas(self.width, self.height, candidate) {
            // Out-of-canvas disks seal the rim; their edges never re-enter
            // the frontier.
            return;
        }

        self.edges
            .push_back(ExposedEdge::new(edge.a, id, self.retry_budget));
        self.edges
            .push_back(ExposedEdge::new(id, edge.b, self.retry_budget));

        // Pre-emptively link any other in-canvas disk close enough to
        // plausibly triangulate with the new one. This seeds future closures
        // and keeps the front from folding onto itself.
        for p in self.grid.neighbors(candidate, 3) {
            if p == id || self.graph.is_linked(id, p) {
                continue;
            }
            let disk = self.graph.disk(p);
            if !in_canvas(self.width, self.height, disk.center) {
                continue;
            }
            let reach = disk.radius + radius + self.min_radius;
            if disk.dist2(candidate) < reach * reach {
                self.graph.establish_link(p, id);
                self.edges
                    .push_back(ExposedEdge::new(p, id, self.retry_budget));
                self.edges
                    .push_back(ExposedEdge::new(id, p, self.retry_budget));
            }
        }
    }

    fn add_disk(&mut self, center: Vec2, radius: f32) -> usize {
        let id = self.graph.add(center, radius);
        self.grid.insert(id, center);
        id
    }

    fn random_radius(&mut self) -> f32 {
        self.rng.gen_range(self.min_radius..=self.max_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CanvasSize, TessellationConfigBuilder};

    fn small_config(seed: u32) -> TessellationConfig {
        TessellationConfigBuilder::new()
            .seed(seed)
            .canvas_size(CanvasSize::Small)
            .build()
            .unwrap()
    }

    #[test]
    fn test_bootstrap_seeds_two_tangent_disks() {
        let config = small_config(7);
        let mut engine = FrontierEngine::new(&config);
        engine.bootstrap();

        assert_eq!(engine.graph.len(), 2);
        assert_eq!(engine.edges.len(), 2);

        let a = engine.graph.disk(0);
        let b = engine.graph.disk(1);
        assert_eq!(a.center, Vec2::new(256.0, 256.0));
        let gap = a.center.distance(b.center) - (a.radius + b.radius);
        assert!(gap.abs() < 1e-3, "seed disks must be tangent, gap {}", gap);
        assert_eq!(engine.graph.link_count(0, 1), Some(0));
    }

    #[test]
    fn test_frontier_terminates_and_produces_triangles() {
        let config = small_config(42);
        let (graph, triangles, _dead) = FrontierEngine::new(&config).run();

        assert!(
            triangles.len() >= 50,
            "expected a filled canvas, got {} triangles",
            triangles.len()
        );
        assert!(graph.len() > triangles.len() / 3);
    }

    #[test]
    fn test_no_disk_pair_overlaps() {
        let config = small_config(1234);
        let (graph, _, _) = FrontierEngine::new(&config).run();

        let disks: Vec<_> = graph.iter().collect();
        for i in 0..disks.len() {
            for j in (i + 1)..disks.len() {
                let clearance =
                    disks[i].radius + disks[j].radius - OVERLAP_TOLERANCE;
                let dist = disks[i].center.distance(disks[j].center);
                assert!(
                    dist >= clearance - 1e-3,
                    "disks {} and {} overlap: dist {} < clearance {}",
                    disks[i].id,
                    disks[j].id,
                    dist,
                    clearance
                );
            }
        }
    }

    #[test]
    fn test_share_counts_never_exceed_two() {
        let config = small_config(99);
        let (_, triangles, _) = FrontierEngine::new(&config).run();

        let mut pair_uses = std::collections::HashMap::new();
        for tri in &triangles {
            for (x, y) in [(tri.a, tri.b), (tri.b, tri.c), (tri.c, tri.a)] {
                let key = (x.min(y), x.max(y));
                *pair_uses.entry(key).or_insert(0u32) += 1;
            }
        }
        for (pair, uses) in pair_uses {
            assert!(
                uses <= 2,
                "pair {:?} is referenced by {} triangles",
                pair,
                uses
            );
        }
    }

    #[test]
    fn test_identical_seeds_replay_identically() {
        let config = small_config(2024);
        let (graph1, tris1, dead1) = FrontierEngine::new(&config).run();
        let (graph2, tris2, dead2) = FrontierEngine::new(&config).run();

        assert_eq!(tris1, tris2);
        assert_eq!(dead1, dead2);
        assert_eq!(graph1.len(), graph2.len());
        for (d1, d2) in graph1.iter().zip(graph2.iter()) {
            assert_eq!(d1.center, d2.center);
            assert_eq!(d1.radius, d2.radius);
        }
    }

    #[test]
    fn test_too_wide_edge_survives_to_the_dead_list() {
        let config = TessellationConfigBuilder::new()
            .seed(12)
            .canvas_size(CanvasSize::Custom {
                width: 400.0,
                height: 400.0,
            })
            .retry_budget(3)
            .unwrap()
            .build()
            .unwrap();

        let mut engine = FrontierEngine::new(&config);

        // Two disks whose gap no drawn radius can span: the grown circles
        // reach at most 2 * (16 + 64) = 160 across a 200 unit gap. The edge
        // must cycle through its retries and land on the dead list, never
        // silently disappear.
        let a = engine.add_disk(Vec2::new(100.0, 200.0), 16.0);
        let b = engine.add_disk(Vec2::new(300.0, 200.0), 16.0);
        engine.graph.establish_link(a, b);

        engine
            .edges
            .push_back(ExposedEdge::new(a, b, engine.retry_budget));
        engine.drain();

        assert!(engine.edges.is_empty());
        assert_eq!(
            engine.dead.len(),
            1,
            "unreachable edge must be kept for the loop closer"
        );
        assert_eq!(engine.dead[0].a, a);
        assert_eq!(engine.dead[0].b, b);
        assert_eq!(engine.dead[0].attempts, 0);
        assert_eq!(engine.graph.len(), 2);
        assert!(engine.triangles.is_empty());
    }

    #[test]
    fn test_blocked_edge_dies_after_exhausting_retries() {
        let config = TessellationConfigBuilder::new()
            .seed(5)
            .canvas_size(CanvasSize::Custom {
                width: 400.0,
                height: 400.0,
            })
            .retry_budget(3)
            .unwrap()
            .build()
            .unwrap();

        let mut engine = FrontierEngine::new(&config);

        // Two tangent disks with a cluster of fat blockers covering every
        // candidate spot on either side of the edge between them.
        let a = engine.add_disk(Vec2::new(200.0, 200.0), 16.0);
        let b = engine.add_disk(Vec2::new(232.0, 200.0), 16.0);
        engine.graph.establish_link(a, b);
        engine.add_disk(Vec2::new(216.0, 150.0), 40.0);
        engine.add_disk(Vec2::new(216.0, 250.0), 40.0);

        engine
            .edges
            .push_back(ExposedEdge::new(a, b, engine.retry_budget));
        engine.drain();

        assert!(engine.edges.is_empty());
        assert_eq!(engine.dead.len(), 1, "edge must land on the dead list");
        assert_eq!(engine.dead[0].a, a);
        assert_eq!(engine.dead[0].b, b);
        assert_eq!(
            engine.dead[0].attempts, 0,
            "edge must only die once its retry budget is spent"
        );
        assert_eq!(engine.graph.len(), 4, "no disk may be placed while blocked");
        assert!(engine.triangles.is_empty());
    }
}
