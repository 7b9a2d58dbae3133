//! The population lattice: cell records plus 4-neighbor adjacency
//!
//! Cells are stored row-major in a flat `Vec`; neighbor lookups are pure
//! index arithmetic truncated at the grid boundary (no wraparound, no
//! diagonals).

pub mod factory;
pub mod sampler;

pub use factory::{build_from_strategy, build_random};

use serde::{Deserialize, Serialize};

/// The four susceptibility levels a cell can be assigned, in the order the
/// configured weights refer to them
pub const SUSCEPTIBILITY_LEVELS: [f64; 4] = [1.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];

/// Lattice dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Von Neumann neighbors of (row, col), truncated at the boundary
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        const OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row as isize + dr;
            let c = col as isize + dc;
            if r >= 0 && r < self.rows as isize && c >= 0 && c < self.cols as isize {
                Some((r as usize, c as usize))
            } else {
                None
            }
        })
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
        }
    }
}

/// One lattice position
///
/// `exists` and `susceptibility` are fixed at construction; the three
/// counters evolve as the simulation steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Whether a person occupies this position
    pub exists: bool,
    /// Probability weight used in the decision phase, one of
    /// [`SUSCEPTIBILITY_LEVELS`]
    pub susceptibility: f64,
    /// Spread events received in the current iteration; reset at the start
    /// of every step
    pub heard_count: u32,
    /// Iterations remaining before this cell may spread again; equal to the
    /// configured limit while the cell is actively spreading
    pub cooldown: u32,
    /// Cumulative times this cell has been notified by a spreading neighbor
    pub reached_count: u32,
}

impl Cell {
    /// Whether this cell has ever been notified by a spreading neighbor
    #[inline]
    pub fn has_heard(&self) -> bool {
        self.reached_count > 0
    }
}

/// Fixed-size 2-D array of cells, row-major addressable by (row, col)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    shape: Shape,
    cells: Vec<Cell>,
}

impl Lattice {
    /// Create a lattice of default (vacant, zeroed) cells
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            cells: vec![Cell::default(); shape.cell_count()],
        }
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.shape.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.shape.rows && col < self.shape.cols {
            Some(&self.cells[self.idx(row, col)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row < self.shape.rows && col < self.shape.cols {
            let idx = self.idx(row, col);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.shape.rows && col < self.shape.cols {
            let idx = self.idx(row, col);
            self.cells[idx] = cell;
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to all cells in row-major order
    ///
    /// Intended for strategy functions populating a fresh lattice before a
    /// simulation starts. Mutating cells mid-run bypasses the update rule
    /// and its invariants; that is the caller's risk.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Number of occupied cells that have heard the rumor at least once
    pub fn count_reached(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.exists && c.has_heard())
            .count()
    }

    /// Number of occupied cells
    pub fn count_existing(&self) -> usize {
        self.cells.iter().filter(|c| c.exists).count()
    }
}
