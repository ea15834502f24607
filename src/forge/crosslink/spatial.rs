//! Spatial binning for radius pair search.
//!
//! This module provides a simple grid-based spatial index for finding
//! bead pairs closer than a cutoff radius.

use std::collections::HashMap;

/// Grid-based spatial index for 2D point queries.
///
/// Divides the plane into uniform square cells and stores bead indices
/// in each cell. With a cell size no smaller than the cutoff, every pair
/// within range lies in the same or an adjacent cell.
#[derive(Debug)]
pub struct SpatialGrid {
    /// Inverse cell size for fast coordinate-to-cell conversion.
    inv_cell_size: f64,
    /// Map from cell coordinates to bead indices.
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    /// Creates an empty grid. `cell_size` must be positive; callers validate it.
    pub fn new(cell_size: f64) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        }
    }

    /// Creates a spatial grid and populates it with bead positions.
    pub fn from_positions(positions: &[[f64; 2]], cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, pos) in positions.iter().enumerate() {
            grid.insert(idx, *pos);
        }
        grid
    }

    /// Cell of `pos`. The float-to-int cast saturates for far-out cells,
    /// which keeps neighbouring beads in neighbouring cells.
    fn cell_coords(&self, pos: [f64; 2]) -> (i64, i64) {
        (
            (pos[0] * self.inv_cell_size).floor() as i64,
            (pos[1] * self.inv_cell_size).floor() as i64,
        )
    }

    pub fn insert(&mut self, idx: usize, pos: [f64; 2]) {
        let cell = self.cell_coords(pos);
        self.cells.entry(cell).or_default().push(idx);
    }

    /// Finds every unordered pair of beads within `cutoff` of each other.
    ///
    /// # Arguments
    ///
    /// * `positions` — Full position array the grid was built from
    /// * `cutoff` — Maximum distance to include (at most the cell size)
    ///
    /// # Returns
    ///
    /// `(i, j, distance)` triples with `i < j`, sorted by `(i, j)`.
    pub fn pairs_within(&self, positions: &[[f64; 2]], cutoff: f64) -> Vec<(usize, usize, f64)> {
        let cutoff_sq = cutoff * cutoff;
        let mut pairs = Vec::new();

        for (&(cx, cy), members) in &self.cells {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let (Some(nx), Some(ny)) = (cx.checked_add(dx), cy.checked_add(dy)) else {
                        continue;
                    };
                    let Some(neighbors) = self.cells.get(&(nx, ny)) else {
                        continue;
                    };
                    for &i in members {
                        for &j in neighbors {
                            if j <= i {
                                continue;
                            }
                            let a = positions[i];
                            let b = positions[j];
                            let dist_sq = (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2);
                            if dist_sq <= cutoff_sq {
                                pairs.push((i, j, dist_sq.sqrt()));
                            }
                        }
                    }
                }
            }
        }

        pairs.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        pairs
    }
}
