/// State byte of a single cell.
///
/// Zero means dead. A live cell remembers how many live neighbours it had
/// when it was (re)born, 1..=8; seeded cells carry [`CellState::SEEDED`].
/// Only "zero or not" matters to the transition rule, the magnitude is
/// there for display effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CellState(pub u8);

impl CellState {
    pub const DEAD: Self = Self(0);

    /// Value written for cells set alive by random seeding.
    pub const SEEDED: Self = Self(8);

    /// Value written by [`crate::Life::set_cell`].
    pub const SET: Self = Self(1);

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        self.0 != 0
    }

    /// State a cell takes when it ends a generation alive with `neighbours`
    /// live neighbours. A live result with zero neighbours (B0/S0 rules)
    /// still has to read as alive, so it is clamped to 1.
    pub const fn live_with(neighbours: u8) -> Self {
        if neighbours == 0 { Self(1) } else { Self(neighbours) }
    }

    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { Self::SET } else { Self::DEAD }
    }
}
