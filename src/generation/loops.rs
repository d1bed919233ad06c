//! Closing leftover boundary gaps
//!
//! Frontier edges that exhausted their retry budget bound pockets the
//! engine could not fill with new disks. This pass groups those dead edges
//! by origin, hunts for simple cycles through them, validates each cycle as
//! a proper polygon via its interior angle sum, and triangulates every
//! accepted polygon by iterative ear removal.

use std::collections::{BTreeMap, VecDeque};

use crate::disk::{DiskGraph, Triangle};
use crate::error::{Result, TessellationError};
use crate::generation::geom::{direction_angle, turn_angle};

/// Tolerance on the interior-angle sum of an accepted polygon, in radians
const ANGLE_SUM_TOLERANCE: f32 = 1e-3;

/// A dead edge stripped down to its directed handle pair
pub(crate) type DeadEdge = (usize, usize);

/// Result of the loop-closing pass
pub(crate) struct LoopClosure {
    /// Edge lists of the accepted loops, in acceptance order
    pub loops: Vec<Vec<DeadEdge>>,
    /// Dead edges that never joined an accepted loop
    pub leftover: Vec<DeadEdge>,
}

/// Find cycles among the dead edges and triangulate each one
///
/// Triangles are appended to `triangles`; every accepted loop of n edges
/// contributes exactly n-2 of them.
pub(crate) fn close_loops(
    graph: &mut DiskGraph,
    dead: Vec<DeadEdge>,
    triangles: &mut Vec<Triangle>,
) -> Result<LoopClosure> {
    let mut edge_map: BTreeMap<usize, Vec<DeadEdge>> = BTreeMap::new();
    for edge in dead {
        edge_map.entry(edge.0).or_default().push(edge);
    }

    let origins: Vec<usize> = edge_map.keys().copied().collect();
    let mut loops = Vec::new();

    for origin in origins {
        if let Some(found) = find_loop_from(graph, &edge_map, origin) {
            for edge in &found {
                if let Some(outgoing) = edge_map.get_mut(&edge.0) {
                    outgoing.retain(|e| e != edge);
                    if outgoing.is_empty() {
                        edge_map.remove(&edge.0);
                    }
                }
            }
            loops.push(found);
        }
    }

    for l in &loops {
        triangulate_loop(graph, l, triangles)?;
    }

    let leftover = edge_map.into_values().flatten().collect();
    Ok(LoopClosure { loops, leftover })
}

/// Search for one valid cycle starting at `origin`
///
/// Breadth-first over a queue of partial paths. A path may not revisit any
/// of its intermediate vertices, may not close with only two edges, and a
/// closure is only accepted if it passes the polygon check. One accepted
/// loop per origin; remaining edges at that origin stay for later origins.
fn find_loop_from(
    graph: &DiskGraph,
    edge_map: &BTreeMap<usize, Vec<DeadEdge>>,
    origin: usize,
) -> Option<Vec<DeadEdge>> {
    let starts = edge_map.get(&origin)?;
    let mut paths: VecDeque<Vec<DeadEdge>> = starts.iter().map(|e| vec![*e]).collect();

    while let Some(path) = paths.pop_front() {
        let tail = path.last().expect("paths are never empty").1;
        let options = match edge_map.get(&tail) {
            Some(options) => options,
            None => continue,
        };

        for &next in options {
            if next.1 == origin {
                if path.len() == 1 {
                    // A 2-cycle is the same edge walked both ways
                    continue;
                }
                let mut candidate = path.clone();
                candidate.push(next);
                if polygon_winding(graph, &candidate).is_some() {
                    return Some(candidate);
                }
                // Failed the polygon check; keep searching
                continue;
            }
            if path.iter().any(|e| e.0 == next.1) {
                // Extending here would cross our own path
                continue;
            }
            let mut longer = path.clone();
            longer.push(next);
            paths.push_back(longer);
        }
    }

    None
}

/// Validate a closed edge cycle as a simple polygon and return its winding
///
/// Sums the signed turns between consecutive directed edges. A simple loop
/// turns through exactly one full revolution, which is equivalent to its
/// signed interior angles summing to (n-2)*pi; self-crossing cycles cancel
/// their turns out and fail. Returns `1.0` or `-1.0` (the winding sign used
/// by ear removal), or `None` if the cycle is not a simple polygon.
fn polygon_winding(graph: &DiskGraph, cycle: &[DeadEdge]) -> Option<f32> {
    let n = cycle.len();
    let mut total = 0.0;
    for i in 0..n {
        let (a, b) = cycle[i];
        let (c, d) = cycle[(i + 1) % n];
        let cur = direction_angle(graph.disk(a).center, graph.disk(b).center);
        let next = direction_angle(graph.disk(c).center, graph.disk(d).center);
        total += turn_angle(cur, next);
    }

    if (total.abs() - std::f32::consts::TAU).abs() <= ANGLE_SUM_TOLERANCE {
        Some(total.signum())
    } else {
        None
    }
}

/// Reduce an accepted loop to triangles by iterative ear removal
///
/// While more than three edges remain, the adjacent edge pair with the
/// shortest diagonal whose shared vertex is convex is clipped into a
/// triangle and spliced out of the ring. Convexity is judged with a cross
/// product against the loop's own winding, so concave corners are never
/// clipped regardless of orientation.
fn triangulate_loop(
    graph: &mut DiskGraph,
    loop_edges: &[DeadEdge],
    triangles: &mut Vec<Triangle>,
) -> Result<()> {
    if loop_edges.len() < 3 {
        return Err(TessellationError::GenerationFailed(format!(
            "loop of {} edges cannot be triangulated",
            loop_edges.len()
        )));
    }

    let winding = polygon_winding(graph, loop_edges).ok_or_else(|| {
        TessellationError::GenerationFailed(
            "loop closer accepted a non-simple polygon".to_string(),
        )
    })?;

    let mut ring: Vec<DeadEdge> = loop_edges.to_vec();
    while ring.len() > 3 {
        let mut best: Option<usize> = None;
        let mut best_diag2 = f32::INFINITY;

        for i in 0..ring.len() {
            let j = (i + 1) % ring.len();
            let dir_i = graph.disk(ring[i].1).center - graph.disk(ring[i].0).center;
            let dir_j = graph.disk(ring[j].1).center - graph.disk(ring[j].0).center;
            if winding * dir_i.perp_dot(dir_j) <= 0.0 {
                // Reflex or collinear corner; clipping it would cut into
                // the polygon
                continue;
            }
            let diag2 = graph
                .disk(ring[i].0)
                .dist2(graph.disk(ring[j].1).center);
            if diag2 < best_diag2 {
                best_diag2 = diag2;
                best = Some(i);
            }
        }

        let i = best.ok_or_else(|| {
            TessellationError::GenerationFailed(
                "no convex corner left in a loop larger than 3 edges".to_string(),
            )
        })?;
        let j = (i + 1) % ring.len();
        let (a, b) = ring[i];
        let c = ring[j].1;

        triangles.push(Triangle::new(a, b, c));
        graph.establish_link(a, c);
        graph.increment_links(a, b, c);

        // Splice the two clipped edges into the new diagonal edge
        ring[i] = (a, c);
        ring.remove(j);
    }

    let (a, b) = ring[0];
    let c = ring[1].1;
    triangles.push(Triangle::new(a, b, c));
    graph.increment_links(a, b, c);
    Ok(())
}
