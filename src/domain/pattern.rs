use super::Life;
use crate::error::Result;

/// A fixed arrangement of live cells used as a deterministic seed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>, // Relative coordinates of alive cells
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let width = cells.iter().map(|(x, _)| *x).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|(_, y)| *y).max().unwrap_or(0) + 1;
        Self { name, width, height, cells }
    }

    /// Place pattern with its top-left corner at (`x`, `y`), wrapping around
    /// the grid edges like the automaton itself does.
    pub fn place_on(&self, life: &mut Life, x: usize, y: usize) -> Result<()> {
        let (w, h) = (life.width(), life.height());
        for (dx, dy) in &self.cells {
            life.set_cell((x % w + dx) % w, (y % h + dy) % h, true)?;
        }
        Ok(())
    }

    /// Clear `life` and place the pattern in the middle of it.
    pub fn centre_on(&self, life: &mut Life) -> Result<()> {
        life.clear();
        let x = life.width().saturating_sub(self.width) / 2;
        let y = life.height().saturating_sub(self.height) / 2;
        self.place_on(life, x, y)
    }
}

/// Small seed patterns
pub mod presets {
    use super::*;

    /// Block - 2x2 still life
    pub fn block() -> Pattern {
        Pattern::new(
            "block",
            vec![
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
        )
    }

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new("blinker", vec![(0, 1), (1, 1), (2, 1)])
    }

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "glider",
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Look a pattern up by name, ignoring case.
    pub fn by_name(name: &str) -> Option<Pattern> {
        [block(), blinker(), glider()]
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}
