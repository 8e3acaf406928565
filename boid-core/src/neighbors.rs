//! Neighbor discovery.
//!
//! A boid's neighbors are every *other* boid whose distance to it is at most the
//! view range. Implementations differ only in cost; for the same snapshot they
//! must return the same indices, in ascending order.

use alloc::vec::Vec;

use crate::boid::Boid;
use crate::vector::ceil;

/// A pluggable neighbor query that can be swapped without touching the rules.
pub trait NeighborQuery: Send + Sync {
    /// Rebuild internal structures from the current tick's snapshot.
    fn rebuild(&mut self, boids: &[Boid], view_range: f64);

    /// Append the indices of `index`'s neighbors to `out` in ascending order.
    fn neighbors_into(&self, boids: &[Boid], index: usize, view_range: f64, out: &mut Vec<usize>);

    fn neighbors(&self, boids: &[Boid], index: usize, view_range: f64) -> Vec<usize> {
        let mut out = Vec::new();
        self.neighbors_into(boids, index, view_range, &mut out);
        out
    }

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

#[inline]
fn within_view(boids: &[Boid], index: usize, other: usize, view_range_sq: f64) -> bool {
    other != index
        && boids[index].position.distance_squared(&boids[other].position) <= view_range_sq
}

/// Checks every pair: O(n²) per tick, no setup.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl NeighborQuery for BruteForce {
    fn rebuild(&mut self, _boids: &[Boid], _view_range: f64) {}

    fn neighbors_into(&self, boids: &[Boid], index: usize, view_range: f64, out: &mut Vec<usize>) {
        let view_range_sq = view_range * view_range;
        out.extend((0..boids.len()).filter(|&j| within_view(boids, index, j, view_range_sq)));
    }

    fn name(&self) -> &'static str {
        "brute-force"
    }
}

/// Upper bound on grid cells per boid.
const CELLS_PER_BOID: usize = 16;

/// Uniform grid over the arena with cells at least one view range wide, so a
/// query only visits the 3x3 block of cells around the boid.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    width: f64,
    height: f64,
    cell_size: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            cell_size: 0.0,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[inline]
    fn cell_coords(&self, boid: &Boid) -> (usize, usize) {
        let col = (boid.position.x / self.cell_size).clamp(0.0, (self.cols - 1) as f64) as usize;
        let row = (boid.position.y / self.cell_size).clamp(0.0, (self.rows - 1) as f64) as usize;
        (col, row)
    }
}

impl NeighborQuery for SpatialGrid {
    fn rebuild(&mut self, boids: &[Boid], view_range: f64) {
        // Cells are never narrower than one pixel.
        let mut cell_size = view_range.max(1.0);
        let max_cells = boids.len().saturating_mul(CELLS_PER_BOID).max(1) as f64;
        while ceil(self.width / cell_size) * ceil(self.height / cell_size) > max_cells {
            cell_size *= 2.0;
        }
        self.cell_size = cell_size;
        let cols = (ceil(self.width / cell_size) as usize).max(1);
        let rows = (ceil(self.height / cell_size) as usize).max(1);

        if cols != self.cols || rows != self.rows {
            self.cols = cols;
            self.rows = rows;
            self.cells = (0..cols * rows).map(|_| Vec::new()).collect();
        } else {
            for cell in &mut self.cells {
                cell.clear();
            }
        }

        for (i, boid) in boids.iter().enumerate() {
            let (col, row) = self.cell_coords(boid);
            self.cells[row * self.cols + col].push(i);
        }
    }

    fn neighbors_into(&self, boids: &[Boid], index: usize, view_range: f64, out: &mut Vec<usize>) {
        debug_assert!(
            view_range <= self.cell_size,
            "grid was built for a smaller view range"
        );
        let view_range_sq = view_range * view_range;
        let (col, row) = self.cell_coords(&boids[index]);
        let start = out.len();

        for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                out.extend(
                    self.cells[r * self.cols + c]
                        .iter()
                        .copied()
                        .filter(|&j| within_view(boids, index, j, view_range_sq)),
                );
            }
        }

        out[start..].sort_unstable();
    }

    fn name(&self) -> &'static str {
        "spatial-grid"
    }
}
