//! Grid and job constants shared by the topology builder, vertex job and
//! configuration layer.
//!
//! # Grid Layout
//!
//! ```text
//! Vertex index (row-major, cols = 4):
//!
//!   row 0:   0 ── 1 ── 2 ── 3        open lattice: column 3 is an edge
//!            │ ╲  │ ╲  │ ╲  │
//!   row 1:   4 ── 5 ── 6 ── 7        closed tunnel: column 3 connects back
//!            │ ╲  │ ╲  │ ╲  │        to column 0 (one extra cell per row)
//!   row 2:   8 ── 9 ── 10 ─ 11
//!
//! index = row * cols + col
//! ```
//!
//! Each cell is split along the top-left / bottom-right diagonal into
//! `(i, i + cols, i + 1)` and `(i + 1, i + cols, i + cols + 1)`.

/// Minimum columns / rows of an open lattice.
pub const MIN_LATTICE_RESOLUTION: u32 = 3;

/// Minimum columns / rows of a closed tunnel.
pub const MIN_TUNNEL_RESOLUTION: u32 = 8;

/// Vertices handed to a single rayon work item.
///
/// Granularity hint only: any batch size produces identical output.
pub const BATCH_SIZE: usize = 64;

/// Triangles handed to a single rayon work item in faceted layouts.
pub const TRIANGLE_BATCH_SIZE: usize = BATCH_SIZE / 3;

/// Largest vertex count addressable with 16-bit indices.
pub const MAX_U16_VERTICES: usize = u16::MAX as usize + 1;

/// Finite-difference step as a fraction of one noise repeat in parametric
/// space (`epsilon = FD_EPSILON_FRACTION / repeat`).
pub const FD_EPSILON_FRACTION: f32 = 1.0 / 64.0;

/// Noise-space step for finite-difference gradients of non-analytic noise.
pub const NOISE_GRADIENT_STEP: f64 = 1.0e-3;

/// Edge length of the fixed lattice bounding box.
pub const LATTICE_BOUNDS_SIZE: f32 = 1000.0;

/// Tunnel bounding box width as a multiple of the radius.
pub const TUNNEL_BOUNDS_RADIUS_SCALE: f32 = 5.0;

/// Convert grid coordinates to a row-major vertex index.
#[inline(always)]
pub const fn coord_to_index(col: u32, row: u32, cols: u32) -> u32 {
  row * cols + col
}

/// Convert a row-major vertex index to `(col, row)`.
#[inline(always)]
pub const fn index_to_coord(index: u32, cols: u32) -> (u32, u32) {
  (index % cols, index / cols)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
