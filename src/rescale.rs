//! Render-time rescaling of canonical coordinates.
//!
//! Canonical positions are computed once for the reference viewport. When the
//! display changes size, positions and tile size are stretched by the ratio of
//! current to reference size instead of rerunning the layout. The result is
//! not re-centered for the new aspect ratio, but each frame costs O(1) per cell.

use crate::board::{Board, CellType, GridPos};
use crate::error::LayoutError;
use crate::transform::{ScreenPoint, TileSize, Viewport};

/// Per-axis stretch from the reference viewport to the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportScale {
    /// Horizontal factor.
    pub x: f64,
    /// Vertical factor.
    pub y: f64,
}

impl ViewportScale {
    /// Scale that leaves coordinates unchanged.
    pub const IDENTITY: ViewportScale = ViewportScale { x: 1.0, y: 1.0 };

    /// Scale mapping `reference` onto `current`.
    ///
    /// A current size equal to the reference yields exactly [`Self::IDENTITY`].
    ///
    /// # Errors
    ///
    /// Returns an error if either viewport is not a positive finite size.
    pub fn between(reference: Viewport, current: Viewport) -> Result<Self, LayoutError> {
        for vp in [reference, current] {
            if !vp.is_valid() {
                return Err(LayoutError::InvalidViewport {
                    width: vp.width,
                    height: vp.height,
                });
            }
        }
        if reference == current {
            return Ok(Self::IDENTITY);
        }
        Ok(Self {
            x: current.width / reference.width,
            y: current.height / reference.height,
        })
    }

    /// Whether this scale leaves coordinates unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Apply to a point.
    #[must_use]
    pub fn point(&self, p: ScreenPoint) -> ScreenPoint {
        if self.is_identity() {
            return p;
        }
        ScreenPoint::new(p.x * self.x, p.y * self.y)
    }

    /// Apply to a tile size.
    #[must_use]
    pub fn tile(&self, t: TileSize) -> TileSize {
        if self.is_identity() {
            return t;
        }
        TileSize::new(t.width * self.x, t.height * self.y)
    }
}

/// Where and how large to draw one cell on the current display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCell {
    /// Board position of the cell.
    pub pos: GridPos,
    /// Type of the cell; never `NotRendered`.
    pub cell_type: CellType,
    /// Whether a unit stands on it.
    pub occupied: bool,
    /// Top vertex of the diamond on the current display.
    pub top: ScreenPoint,
    /// Diamond size on the current display.
    pub size: TileSize,
}

impl RenderCell {
    /// Center of the diamond.
    #[must_use]
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.top.x, self.top.y + self.size.height / 2.0)
    }

    /// Point-in-diamond test. Edges count as inside.
    #[must_use]
    pub fn contains(&self, p: ScreenPoint) -> bool {
        let half_w = self.size.width / 2.0;
        let half_h = self.size.height / 2.0;
        if half_w <= 0.0 || half_h <= 0.0 {
            return false;
        }
        let c = self.center();
        (p.x - c.x).abs() / half_w + (p.y - c.y).abs() / half_h <= 1.0
    }
}

/// Positions and sizes of every rendered cell for a display of size `current`.
///
/// Cells come out in row-major order. `NotRendered` cells are skipped.
///
/// # Errors
///
/// Returns an error if the board has never been laid out, or if `current` is
/// not a positive finite size.
pub fn render_cells(board: &Board, current: Viewport) -> Result<Vec<RenderCell>, LayoutError> {
    let metrics = board.metrics().ok_or(LayoutError::NoCanonicalLayout)?;
    let scale = ViewportScale::between(metrics.reference_viewport, current)?;
    let size = scale.tile(metrics.tile);

    Ok(board
        .playable_cells()
        .map(|(pos, cell)| RenderCell {
            pos,
            cell_type: cell.cell_type,
            occupied: cell.occupied,
            top: scale.point(cell.position),
            size,
        })
        .collect())
}

impl Board {
    /// Find the rendered cell under a point of the current display.
    ///
    /// Uses the same rescaled diamonds that are drawn, so a pick always agrees
    /// with what is on screen. Where two diamonds share an edge the later one
    /// in row-major order wins, matching draw order.
    ///
    /// # Errors
    ///
    /// Same as [`render_cells`].
    pub fn pick(&self, point: ScreenPoint, current: Viewport) -> Result<Option<GridPos>, LayoutError> {
        let cells = render_cells(self, current)?;
        Ok(cells.iter().rev().find(|c| c.contains(point)).map(|c| c.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{TileSnap, generate_layout};

    fn laid_out() -> Board {
        let mut board = Board::reference();
        generate_layout(&mut board, Viewport::new(2000.0, 760.0), TileSnap::Exact).unwrap();
        board
    }

    #[test]
    fn test_identity_scale_reproduces_canonical() {
        let board = laid_out();
        let cells = render_cells(&board, Viewport::new(2000.0, 760.0)).unwrap();
        assert_eq!(cells.len(), 537);
        for rc in &cells {
            let cell = board.get_cell(rc.pos).unwrap();
            assert_eq!(rc.top, cell.position);
            assert_eq!(rc.size, TileSize::new(80.0, 40.0));
        }
    }

    #[test]
    fn test_half_size_scale() {
        let board = laid_out();
        let cells = render_cells(&board, Viewport::new(1000.0, 380.0)).unwrap();
        let apex = cells.iter().find(|c| c.pos == GridPos::new(0, 14)).unwrap();
        assert_eq!(apex.top, ScreenPoint::new(780.0, 0.0));
        assert_eq!(apex.size, TileSize::new(40.0, 20.0));
    }

    #[test]
    fn test_anisotropic_scale() {
        let scale = ViewportScale::between(Viewport::new(800.0, 400.0), Viewport::new(1600.0, 600.0)).unwrap();
        assert_eq!(scale, ViewportScale { x: 2.0, y: 1.5 });
        assert_eq!(scale.point(ScreenPoint::new(10.0, 10.0)), ScreenPoint::new(20.0, 15.0));
        assert_eq!(scale.tile(TileSize::new(8.0, 4.0)), TileSize::new(16.0, 6.0));
    }

    #[test]
    fn test_no_layout_is_an_error() {
        let board = Board::reference();
        assert_eq!(
            render_cells(&board, Viewport::new(800.0, 600.0)),
            Err(LayoutError::NoCanonicalLayout)
        );
    }

    #[test]
    fn test_invalid_current_viewport() {
        let board = laid_out();
        assert!(matches!(
            render_cells(&board, Viewport::new(800.0, 0.0)),
            Err(LayoutError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_pick_center_of_cell() {
        let board = laid_out();
        for pos in [GridPos::new(0, 14), GridPos::new(14, 0), GridPos::new(20, 5), GridPos::new(32, 1)] {
            let cell = board.get_cell(pos).unwrap();
            let center = ScreenPoint::new(cell.position.x, cell.position.y + 20.0);
            assert_eq!(board.pick(center, Viewport::new(2000.0, 760.0)).unwrap(), Some(pos));
        }
    }

    #[test]
    fn test_pick_after_resize() {
        let board = laid_out();
        let cell = board.get_cell(GridPos::new(10, 12)).unwrap();
        // Same cell, display shrunk to half width and height.
        let center = ScreenPoint::new(cell.position.x / 2.0, (cell.position.y + 20.0) / 2.0);
        assert_eq!(
            board.pick(center, Viewport::new(1000.0, 380.0)).unwrap(),
            Some(GridPos::new(10, 12))
        );
    }

    #[test]
    fn test_pick_outside_board() {
        let board = laid_out();
        assert_eq!(board.pick(ScreenPoint::new(5.0, 5.0), Viewport::new(2000.0, 760.0)).unwrap(), None);
    }

    #[test]
    fn test_render_cell_contains() {
        let rc = RenderCell {
            pos: GridPos::new(0, 0),
            cell_type: CellType::Walkable,
            occupied: false,
            top: ScreenPoint::new(100.0, 100.0),
            size: TileSize::new(80.0, 40.0),
        };
        assert!(rc.contains(ScreenPoint::new(100.0, 120.0)));
        assert!(rc.contains(ScreenPoint::new(100.0, 100.0)));
        assert!(rc.contains(ScreenPoint::new(139.0, 120.0)));
        assert!(!rc.contains(ScreenPoint::new(139.0, 101.0)));
        assert!(!rc.contains(ScreenPoint::new(100.0, 141.0)));
    }
}
