use crate::domain::Life;

use super::{Region, Rgb};

/// Colours used to paint live cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellStyle {
    pub fill: Rgb,
    pub border: Rgb,
    pub background: Rgb,
}

/// Paint the automaton onto `region`, one `cell_size` square per cell.
///
/// The region is erased to the background first. Each live cell gets a
/// one-pixel border in `style.border` and a filled interior; the last two
/// pixel rows and columns of every square stay background, which leaves a
/// visible gap between neighbouring cells.
pub fn draw_life(region: &mut Region, life: &Life, cell_size: usize, style: &CellStyle) {
    region.clear(style.background);

    let size = cell_size as i64;
    for (col, row, state) in life.iter_cells() {
        if !state.is_alive() {
            continue;
        }
        let x = col as i64 * size;
        let y = row as i64 * size;
        if size < 3 {
            // Too small for a border
            region.fill_rect(x, y, x + size, y + size, style.fill);
            continue;
        }
        region.draw_rect(x, y, x + size - 2, y + size - 2, style.border);
        // At sizes 3 and 4 the interior is empty; only the border shows
        if size > 4 {
            region.fill_rect(x + 1, y + 1, x + size - 3, y + size - 3, style.fill);
        }
    }
}
