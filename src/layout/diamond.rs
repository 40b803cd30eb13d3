//! Enumeration of the playable diamond.
//!
//! The diamond is walked in two halves. The top half starts with a single
//! cell on row 0 and widens by one cell on each side per row. The bottom half
//! keeps the widest band while the footprint is taller than it is wide, then
//! narrows back to a single cell on the last row.

use crate::board::GridPos;
use crate::transform::{ScreenPoint, TileSize};

/// Which half of the enumeration produced a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiamondHalf {
    /// Rows `0..playable_width`.
    Top,
    /// Rows `playable_width..playable_width + playable_height - 1`.
    Bottom,
}

/// One cell of the playable diamond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiamondSlot {
    /// Where the cell lives in the board array.
    pub pos: GridPos,
    /// Half that produced it.
    pub half: DiamondHalf,
    /// Enumeration line (counts down from `playable_width` in the top half,
    /// up from 1 in the bottom half).
    pub line: u16,
    /// Index of the cell along its line.
    pub k: u16,
}

impl DiamondSlot {
    /// Canonical top-vertex position of this slot.
    #[must_use]
    pub fn screen_position(&self, tile: TileSize, offset: ScreenPoint) -> ScreenPoint {
        let line = f64::from(self.line);
        let k = f64::from(self.k);
        let half_w = tile.width / 2.0;
        let half_h = tile.height / 2.0;
        match self.half {
            DiamondHalf::Top => ScreenPoint {
                x: tile.width * line + half_w * k + offset.x,
                y: half_h * k + offset.y,
            },
            DiamondHalf::Bottom => ScreenPoint {
                x: half_w * k + tile.width + offset.x,
                y: half_h * k + tile.height * line + offset.y,
            },
        }
    }
}

/// Number of cells on a top-half line.
const fn top_count(playable_width: u16, line: u16) -> u16 {
    2 * (playable_width - line) + 1
}

/// Number of cells on a bottom-half line.
const fn bottom_count(playable_width: u16, playable_height: u16, line: u16) -> u16 {
    if line <= playable_height - playable_width {
        2 * (playable_width - 1) + 1
    } else {
        2 * (playable_height - line - 1) + 1
    }
}

const fn is_supported(playable_width: u16, playable_height: u16) -> bool {
    playable_width >= 1 && playable_height >= playable_width
}

/// Walk every cell of the diamond, top half first.
///
/// Yields nothing unless `1 <= playable_width <= playable_height`; see
/// [`BoardShape::validate`](crate::BoardShape::validate).
pub fn diamond_slots(playable_width: u16, playable_height: u16) -> impl Iterator<Item = DiamondSlot> {
    let (playable_width, playable_height) = if is_supported(playable_width, playable_height) {
        (playable_width, playable_height)
    } else {
        (0, 0)
    };
    // Midline of the widest band. Top-half rows are centered on it.
    let center = i32::from(playable_width) - 1;

    let top = (1..=playable_width).rev().flat_map(move |line| {
        let count = top_count(playable_width, line);
        let row = i32::from(playable_width - line);
        let first_col = center - i32::from(count / 2);
        (0..count).map(move |k| DiamondSlot {
            pos: GridPos::new(row, first_col + i32::from(k)),
            half: DiamondHalf::Top,
            line,
            k,
        })
    });

    let bottom = (1..playable_height).flat_map(move |line| {
        let count = bottom_count(playable_width, playable_height, line);
        let row = i32::from(line) + i32::from(playable_width) - 1;
        (0..count).map(move |k| DiamondSlot {
            pos: GridPos::new(row, i32::from(k) + 1),
            half: DiamondHalf::Bottom,
            line,
            k,
        })
    });

    top.chain(bottom)
}

/// Closed-form size of the diamond.
///
/// Top half is a triangle of `pw²` cells; the bottom half is a plateau of
/// `ph - pw` full-width lines followed by a triangle of `(pw - 1)²` cells.
#[must_use]
pub const fn diamond_cell_count(playable_width: u16, playable_height: u16) -> usize {
    if !is_supported(playable_width, playable_height) {
        return 0;
    }
    let pw = playable_width as usize;
    let ph = playable_height as usize;
    pw * pw + (ph - pw) * (2 * pw - 1) + (pw - 1) * (pw - 1)
}
