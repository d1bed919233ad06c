//! Core tessellation pipeline
//!
//! Runs the advancing-front engine until the frontier is exhausted, then
//! hands the dead edges to the loop closer and appends its triangles to the
//! same output list.

mod frontier;
mod geom;
mod loops;

use crate::config::TessellationConfig;
use crate::disk::{DiskGraph, Triangle};
use crate::error::Result;

/// Raw output of the generation pipeline (geometry only, no colors)
pub(crate) struct RawTessellation {
    pub disks: DiskGraph,
    pub triangles: Vec<Triangle>,
    /// Edge lists of the closed dead-edge loops, for debug overlays
    pub loops: Vec<Vec<(usize, usize)>>,
    /// Dead edges that never joined a closed loop
    pub unclosed: Vec<(usize, usize)>,
}

/// Generate the full triangulation for a configuration
pub(crate) fn tessellate(config: &TessellationConfig) -> Result<RawTessellation> {
    let (mut disks, mut triangles, dead) = frontier::FrontierEngine::new(config).run();

    let dead_pairs: Vec<(usize, usize)> = dead.iter().map(|e| (e.a, e.b)).collect();
    let closure = loops::close_loops(&mut disks, dead_pairs, &mut triangles)?;

    Ok(RawTessellation {
        disks,
        triangles,
        loops: closure.loops,
        unclosed: closure.leftover,
    })
}
