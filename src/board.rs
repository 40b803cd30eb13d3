//! The board: a fixed square array of cells with a diamond-shaped playable region.
//!
//! Cells are stored row-major in one contiguous vector sized at construction.
//! Accessors hand out copies or shared borrows; every mutation goes through a
//! bounds-checked setter that reports whether it did anything.

mod cell;

pub use cell::{Cell, CellType};

use crate::error::BoardError;
use crate::transform::{GridBounds, TileSize, Viewport};
use std::fmt;

/// A grid index. `row` is the first array index (`gridX`), `col` the second (`gridY`).
///
/// Signed so that out-of-range requests such as `(-1, 5)` can be expressed
/// and rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPos {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub col: i32,
}

impl GridPos {
    /// Create a new grid position.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fixed dimensions of a board and its playable footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardShape {
    /// Columns in the cell array.
    pub width: u16,
    /// Rows in the cell array.
    pub height: u16,
    /// Width of the playable footprint, in tiles, before isometric skew.
    pub playable_width: u16,
    /// Height of the playable footprint, in tiles, before isometric skew.
    pub playable_height: u16,
    /// Tile width divided by tile height.
    pub iso_ratio: f64,
}

impl BoardShape {
    /// 33x33 array holding a 15x19 playable diamond of 2:1 tiles.
    pub const REFERENCE: BoardShape = BoardShape {
        width: 33,
        height: 33,
        playable_width: 15,
        playable_height: 19,
        iso_ratio: 2.0,
    };

    /// Check that a layout pass over this shape stays inside the array.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.width == 0 || self.height == 0 || self.playable_width == 0 || self.playable_height == 0 {
            return Err(BoardError::ZeroDimension);
        }
        if !self.iso_ratio.is_finite() || self.iso_ratio <= 0.0 {
            return Err(BoardError::InvalidIsoRatio(self.iso_ratio));
        }
        if self.playable_width > self.width || self.playable_height > self.height {
            return Err(BoardError::PlayableExceedsBoard {
                width: self.width,
                height: self.height,
                playable_width: self.playable_width,
                playable_height: self.playable_height,
            });
        }
        if self.playable_height < self.playable_width {
            return Err(BoardError::WiderThanTall {
                playable_width: self.playable_width,
                playable_height: self.playable_height,
            });
        }

        let rows_needed = self.rows_needed();
        let cols_needed = self.cols_needed();
        if rows_needed > u32::from(self.height) || cols_needed > u32::from(self.width) {
            return Err(BoardError::DiamondDoesNotFit {
                rows_needed,
                cols_needed,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Rows spanned by the diamond: the top half plus the bottom half.
    #[must_use]
    pub fn rows_needed(&self) -> u32 {
        u32::from(self.playable_width) + u32::from(self.playable_height) - 1
    }

    /// Columns spanned by the diamond. The bottom half is shifted one column right.
    #[must_use]
    pub fn cols_needed(&self) -> u32 {
        2 * u32::from(self.playable_width)
    }

    /// Index bounds of the cell array.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        GridBounds::new(self.height, self.width)
    }

    /// Number of cells in the array.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for BoardShape {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Tile size and display size recorded by a completed layout pass.
///
/// Kept as one value so the two can never disagree about which pass they
/// came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalMetrics {
    /// Tile size used to compute canonical positions.
    pub tile: TileSize,
    /// Display size the canonical positions are relative to.
    pub reference_viewport: Viewport,
}

/// A square array of cells plus the metadata needed to rescale their positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    shape: BoardShape,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
    metrics: Option<CanonicalMetrics>,
}

impl Board {
    /// Create an empty board: every cell `NotRendered`, no canonical metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is invalid.
    pub fn new(shape: BoardShape) -> Result<Self, BoardError> {
        shape.validate()?;
        Ok(Self {
            shape,
            cells: vec![Cell::default(); shape.cell_count()],
            metrics: None,
        })
    }

    /// Empty board with the reference shape.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            shape: BoardShape::REFERENCE,
            cells: vec![Cell::default(); BoardShape::REFERENCE.cell_count()],
            metrics: None,
        }
    }

    /// Assemble a board from decoded parts. `cells` must be row-major and complete.
    pub(crate) fn from_parts(
        shape: BoardShape,
        cells: Vec<Cell>,
        metrics: Option<CanonicalMetrics>,
    ) -> Result<Self, BoardError> {
        shape.validate()?;
        debug_assert_eq!(cells.len(), shape.cell_count());
        Ok(Self {
            shape,
            cells,
            metrics,
        })
    }

    /// Dimensions of this board.
    #[must_use]
    pub const fn shape(&self) -> &BoardShape {
        &self.shape
    }

    /// Columns in the cell array.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.shape.width
    }

    /// Rows in the cell array.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.shape.height
    }

    /// Canonical tile and viewport size, if a layout pass has completed.
    #[must_use]
    pub const fn metrics(&self) -> Option<&CanonicalMetrics> {
        self.metrics.as_ref()
    }

    pub(crate) fn set_metrics(&mut self, metrics: CanonicalMetrics) {
        self.metrics = Some(metrics);
    }

    /// Check if a position is within the array.
    #[must_use]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        self.shape.bounds().contains(pos)
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * usize::from(self.shape.width) + pos.col as usize)
        } else {
            None
        }
    }

    /// Copy of the cell at `pos`, or `None` when out of bounds.
    #[must_use]
    pub fn get_cell(&self, pos: GridPos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Replace the cell at `pos`.
    ///
    /// Returns `false` without changing anything if `pos` is out of bounds or
    /// the cell claims to be occupied without being walkable.
    pub fn set_cell(&mut self, pos: GridPos, cell: Cell) -> bool {
        if !cell.is_consistent() {
            return false;
        }
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Change the type of the cell at `pos`, keeping its position.
    ///
    /// Switching away from `Walkable` clears `occupied`. Returns `false` if
    /// `pos` is out of bounds.
    pub fn set_cell_type(&mut self, pos: GridPos, cell_type: CellType) -> bool {
        match self.index(pos) {
            Some(idx) => {
                let cell = &mut self.cells[idx];
                cell.cell_type = cell_type;
                if cell_type != CellType::Walkable {
                    cell.occupied = false;
                }
                true
            }
            None => false,
        }
    }

    /// Mark the cell at `pos` as occupied or free.
    ///
    /// Returns `false` if `pos` is out of bounds, or if asked to occupy a
    /// cell that is not walkable.
    pub fn set_occupied(&mut self, pos: GridPos, occupied: bool) -> bool {
        match self.index(pos) {
            Some(idx) => {
                let cell = &mut self.cells[idx];
                if occupied && cell.cell_type != CellType::Walkable {
                    return false;
                }
                cell.occupied = occupied;
                true
            }
            None => false,
        }
    }

    /// Reset every cell to `NotRendered` and forget the canonical metrics.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.metrics = None;
    }

    /// Raw row-major cell slice.
    #[must_use]
    #[inline]
    pub fn raw_cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over every position and cell in row-major order.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn cells(&self) -> impl Iterator<Item = (GridPos, &Cell)> {
        let width = usize::from(self.shape.width);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            let row = (idx / width) as i32;
            let col = (idx % width) as i32;
            (GridPos::new(row, col), cell)
        })
    }

    /// Iterate over cells that are part of the drawn board.
    pub fn playable_cells(&self) -> impl Iterator<Item = (GridPos, &Cell)> {
        self.cells().filter(|(_, cell)| cell.cell_type.is_rendered())
    }

    /// Count cells of a given type.
    #[must_use]
    pub fn count_of(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|c| c.cell_type == cell_type).count()
    }
}
