use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use super::{CellState, Rule};
use crate::error::{Error, Result};

/// Life-like automaton on a toroidal grid.
///
/// Holds two equally sized cell buffers. Each generation reads only from
/// `current` and writes only to `next`, then the two are swapped, so a scan
/// never sees cells that have already advanced.
pub struct Life {
    width: usize,
    height: usize,
    rule: Rule,
    current: Vec<CellState>,
    next: Vec<CellState>,
}

impl Life {
    /// Create an all-dead grid of `width` x `height` cells.
    pub fn new(width: usize, height: usize, rule: Rule) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            rule,
            current: vec![CellState::DEAD; len],
            next: vec![CellState::DEAD; len],
        })
    }

    /// Create from birth/survival digit strings, e.g. `Life::with_rule_strings(20, 20, "3", "23")`
    pub fn with_rule_strings(
        width: usize,
        height: usize,
        birth: &str,
        survival: &str,
    ) -> Result<Self> {
        Self::new(width, height, Rule::new(birth, survival)?)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn rule(&self) -> &Rule {
        &self.rule
    }

    #[inline]
    const fn index(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }

    /// Raw state byte at (`col`, `row`): 0 when dead, otherwise the
    /// neighbour count the cell was born with. `None` outside the grid.
    pub fn cell_state(&self, col: usize, row: usize) -> Option<CellState> {
        (col < self.width && row < self.height).then(|| self.current[self.index(col, row)])
    }

    /// Set a single cell alive or dead.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.current[idx] = alive.into();
        Ok(())
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.current.fill(CellState::DEAD);
    }

    /// Randomly repopulate from the thread-local generator. See [`Life::seed_with`].
    pub fn seed(&mut self, percent: u32) {
        self.seed_with(percent, &mut rand::rng());
    }

    /// Set every cell alive with probability `percent`/100, independently.
    /// Percentages above 100 behave as 100.
    pub fn seed_with<R: Rng>(&mut self, percent: u32, rng: &mut R) {
        let p = f64::from(percent.min(100)) / 100.0;
        self.current.iter_mut().for_each(|cell| {
            *cell = if rng.random_bool(p) {
                CellState::SEEDED
            } else {
                CellState::DEAD
            };
        });
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.current.iter().filter(|c| c.is_alive()).count()
    }

    /// Count live cells among the 8 wrapped neighbours of (`row`, `col`).
    ///
    /// On grids narrower or shorter than 3 a wrapped neighbour can land on
    /// the cell itself; such positions are skipped, others that coincide are
    /// counted once per direction. Coordinates past the edge wrap as well.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        live_neighbors(&self.current, self.width, self.height, row % self.height, col % self.width)
    }

    /// Advance one generation.
    ///
    /// Returns `false` when the new generation is identical to the previous
    /// one (fixed point) or has no live cells (extinction), `true` otherwise.
    pub fn step(&mut self) -> bool {
        let (width, height) = (self.width, self.height);
        let (current, rule) = (&self.current, &self.rule);
        for (row, next_row) in self.next.chunks_mut(width).enumerate() {
            for (col, cell) in next_row.iter_mut().enumerate() {
                let neighbours = live_neighbors(current, width, height, row, col);
                *cell = rule.evolve(current[row * width + col], neighbours);
            }
        }
        self.swap_generations()
    }

    /// Same contract as [`Life::step`], rows are computed in parallel with rayon.
    /// Worth it for grids > 100x100
    pub fn step_parallel(&mut self) -> bool {
        let (width, height) = (self.width, self.height);
        let (current, rule) = (&self.current, &self.rule);
        self.next
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, next_row)| {
                for (col, cell) in next_row.iter_mut().enumerate() {
                    let neighbours = live_neighbors(current, width, height, row, col);
                    *cell = rule.evolve(current[row * width + col], neighbours);
                }
            });
        self.swap_generations()
    }

    fn swap_generations(&mut self) -> bool {
        let unchanged = self.current == self.next;
        let extinct = !self.next.iter().any(|c| c.is_alive());
        std::mem::swap(&mut self.current, &mut self.next);

        if unchanged {
            debug!("Update did not change state -- pattern is stable");
        }
        if extinct {
            debug!("All cells dead -- pattern is stable");
        }
        !(unchanged || extinct)
    }

    /// Iterate over all cells with their positions, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.current
            .iter()
            .enumerate()
            .map(|(i, &cell)| (i % self.width, i / self.width, cell))
    }
}

#[inline]
fn live_neighbors(cells: &[CellState], width: usize, height: usize, row: usize, col: usize) -> u8 {
    let wrap = |i: usize, len: usize| {
        [
            if i == 0 { len - 1 } else { i - 1 },
            i,
            if i + 1 >= len { 0 } else { i + 1 },
        ]
    };
    let (rows, cols) = (wrap(row, height), wrap(col, width));

    let mut count = 0;
    for (dr, &r) in rows.iter().enumerate() {
        for (dc, &c) in cols.iter().enumerate() {
            if (dr == 1 && dc == 1) || (r == row && c == col) {
                continue;
            }
            if cells[r * width + c].is_alive() {
                count += 1;
            }
        }
    }
    count
}
