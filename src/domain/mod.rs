mod cell;
mod life;
mod pattern;
mod rules;

pub use cell::CellState;
pub use life::Life;
pub use pattern::{Pattern, presets as patterns};
pub use rules::{NeighbourSet, Rule, presets};
