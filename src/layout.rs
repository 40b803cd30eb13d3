//! Layout generator: fits the playable diamond into a display area and stamps
//! canonical positions onto the board.
//!
//! A pass runs in three steps:
//! 1. [`fit_tiles`] picks the constraining axis and derives a tile size that
//!    keeps the `iso_ratio` aspect while the whole footprint fits the display.
//! 2. The footprint is centered. The horizontal offset is pulled back by half
//!    a tile because a cell's reference point is its top vertex.
//! 3. [`diamond_slots`] enumerates the playable cells, each of which becomes
//!    `Walkable` at its canonical position. Every other cell stays `NotRendered`.

mod diamond;

pub use diamond::{DiamondHalf, DiamondSlot, diamond_cell_count, diamond_slots};

use crate::board::{Board, BoardShape, CanonicalMetrics, Cell, CellType};
use crate::error::LayoutError;
use crate::transform::{ScreenPoint, TileSize, Viewport};
use serde::{Deserialize, Serialize};

/// Axis that limited the tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitAxis {
    /// Footprint spans the full display width.
    Width,
    /// Footprint spans the full display height.
    Height,
}

/// How the constraining tile side is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileSnap {
    /// Use the exact quotient of display size over footprint.
    #[default]
    Exact,
    /// Round the constraining side to whole pixels first, so tile edges land
    /// on pixel boundaries. The footprint may then overshoot by under half a
    /// pixel per tile.
    WholePixels,
}

/// Tile size and centering offset for one display size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileFit {
    /// Axis that limited the tile size.
    pub axis: FitAxis,
    /// Resulting tile size.
    pub tile: TileSize,
    /// Offset added to every canonical position.
    pub offset: ScreenPoint,
}

/// Outcome of a completed layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSummary {
    /// Tile size and offset that were used.
    pub fit: TileFit,
    /// Number of cells marked walkable.
    pub cells_stamped: usize,
}

/// Compute tile size and centering offset for `viewport`.
///
/// # Errors
///
/// Returns an error if the viewport is not a positive finite size, or if
/// whole-pixel snapping rounds the tile down to nothing.
pub fn fit_tiles(shape: &BoardShape, viewport: Viewport, snap: TileSnap) -> Result<TileFit, LayoutError> {
    if !viewport.is_valid() {
        return Err(LayoutError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let playable_width = f64::from(shape.playable_width);
    let playable_height = f64::from(shape.playable_height);
    let iso_ratio = shape.iso_ratio;

    let grid_ratio = playable_width / playable_height;
    let viewport_ratio = viewport.width / (viewport.height * iso_ratio);

    let snap_side = |side: f64| match snap {
        TileSnap::Exact => side,
        TileSnap::WholePixels => side.round(),
    };

    let (axis, tile) = if viewport_ratio <= grid_ratio {
        let width = snap_side(viewport.width / playable_width);
        (FitAxis::Width, TileSize::new(width, width / iso_ratio))
    } else {
        let height = snap_side(viewport.height / playable_height);
        (FitAxis::Height, TileSize::new(height * iso_ratio, height))
    };

    if tile.width <= 0.0 || tile.height <= 0.0 {
        return Err(LayoutError::DegenerateTile {
            width: tile.width,
            height: tile.height,
        });
    }

    let offset = ScreenPoint {
        x: (viewport.width - tile.width * playable_width) / 2.0 - tile.width / 2.0,
        y: (viewport.height - tile.height * playable_height) / 2.0,
    };

    Ok(TileFit { axis, tile, offset })
}

/// Run a full layout pass over `board` for a display of size `viewport`.
///
/// The board is cleared first, so a pass always starts from the empty state
/// and regenerating is the same operation as generating. On error the board
/// is left untouched.
///
/// # Errors
///
/// Returns an error if no tile size can be fitted; see [`fit_tiles`].
pub fn generate_layout(board: &mut Board, viewport: Viewport, snap: TileSnap) -> Result<LayoutSummary, LayoutError> {
    let shape = *board.shape();
    let fit = fit_tiles(&shape, viewport, snap)?;

    board.clear();

    let mut cells_stamped = 0;
    for slot in diamond_slots(shape.playable_width, shape.playable_height) {
        let position = slot.screen_position(fit.tile, fit.offset);
        if board.set_cell(slot.pos, Cell::new(CellType::Walkable, position)) {
            cells_stamped += 1;
        }
    }

    board.set_metrics(CanonicalMetrics {
        tile: fit.tile,
        reference_viewport: viewport,
    });

    tracing::debug!(
        axis = ?fit.axis,
        tile_width = fit.tile.width,
        tile_height = fit.tile.height,
        viewport_width = viewport.width,
        viewport_height = viewport.height,
        cells = cells_stamped,
        "layout pass complete"
    );

    Ok(LayoutSummary { fit, cells_stamped })
}
