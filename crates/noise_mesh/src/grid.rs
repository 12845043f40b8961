//! Grid layout: vertex/triangle counts and index arithmetic.
//!
//! A [`GridLayout`] captures everything that determines topology. Two layouts
//! comparing equal produce byte-identical index buffers, so the buffer
//! manager compares layouts to decide between an in-place update and a
//! rebuild.
//!
//! ```text
//! Cell (col, row), i = row * cols + col, r = right neighbour of i:
//!
//!   i ─────── r          triangle 2k     = (i, i + cols, r)
//!   │      ╱  │          triangle 2k + 1 = (r, i + cols, r + cols)
//!   │    ╱    │
//!   │  ╱      │          open:   r = i + 1,            cols - 1 cells per row
//!  i+cols ── r+cols      closed: r wraps to column 0,  cols cells per row
//! ```

use crate::constants::{coord_to_index, index_to_coord, MAX_U16_VERTICES};
use crate::error::{MeshError, Result};

/// Topology-defining parameters of a grid mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridLayout {
  /// Vertices per row (u axis).
  pub cols: u32,

  /// Number of rows (v axis).
  pub rows: u32,

  /// Wrap the last column back to column 0 (tunnel).
  pub closed: bool,

  /// Three private vertices per triangle instead of shared grid vertices.
  pub faceted: bool,
}

impl GridLayout {
  /// Create a layout, rejecting grids whose counts overflow 32-bit indices.
  pub fn new(cols: u32, rows: u32, closed: bool, faceted: bool) -> Result<Self> {
    let layout = Self {
      cols,
      rows,
      closed,
      faceted,
    };
    let cells = layout.cells_per_row() as u64 * rows.saturating_sub(1) as u64;
    let indices = 6 * cells;
    let vertices = if faceted {
      indices
    } else {
      cols as u64 * rows as u64
    };
    if vertices > u32::MAX as u64 || indices > u32::MAX as u64 {
      return Err(MeshError::GridTooLarge {
        cols,
        rows,
        vertices,
        indices,
      });
    }
    Ok(layout)
  }

  /// Cells (quads) per row.
  #[inline]
  pub fn cells_per_row(&self) -> u32 {
    if self.closed {
      self.cols
    } else {
      self.cols.saturating_sub(1)
    }
  }

  /// Number of grid points (shared vertices).
  #[inline]
  pub fn grid_point_count(&self) -> usize {
    self.cols as usize * self.rows as usize
  }

  #[inline]
  pub fn triangle_count(&self) -> usize {
    2 * self.cells_per_row() as usize * self.rows.saturating_sub(1) as usize
  }

  /// Number of output vertices.
  #[inline]
  pub fn vertex_count(&self) -> usize {
    if self.faceted {
      3 * self.triangle_count()
    } else {
      self.grid_point_count()
    }
  }

  #[inline]
  pub fn index_count(&self) -> usize {
    3 * self.triangle_count()
  }

  /// True when every vertex index fits in 16 bits.
  #[inline]
  pub fn fits_u16(&self) -> bool {
    self.vertex_count() <= MAX_U16_VERTICES
  }

  /// Row-major grid point index of `(col, row)`.
  #[inline]
  pub fn grid_index(&self, col: u32, row: u32) -> u32 {
    coord_to_index(col, row, self.cols)
  }

  /// `(col, row)` of a grid point index.
  #[inline]
  pub fn grid_coord(&self, index: u32) -> (u32, u32) {
    index_to_coord(index, self.cols)
  }

  /// Parametric coordinate of a grid point.
  ///
  /// `u` covers [0, 1) when closed (column 0 is also u = 1) and [0, 1] when
  /// open; `v` always covers [0, 1].
  #[inline]
  pub fn uv(&self, col: u32, row: u32) -> (f32, f32) {
    let u_span = if self.closed {
      self.cols
    } else {
      self.cols.saturating_sub(1)
    };
    let u = col as f32 / u_span.max(1) as f32;
    let v = row as f32 / self.rows.saturating_sub(1).max(1) as f32;
    (u, v)
  }

  /// Grid point indices of triangle `t`, wound counter-clockwise as seen
  /// from the surface normal.
  #[inline]
  pub fn triangle_corners(&self, t: u32) -> [u32; 3] {
    let cells = self.cells_per_row();
    let cell = t / 2;
    let row = cell / cells;
    let col = cell % cells;

    let i = self.grid_index(col, row);
    let right = self.grid_index((col + 1) % self.cols, row);
    let below = i + self.cols;
    let below_right = right + self.cols;

    if t % 2 == 0 {
      [i, below, right]
    } else {
      [right, below, below_right]
    }
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
