//! Screen <-> grid coordinate transform for 2:1 isometric tiles.
//!
//! Screen space has its origin at the top-left of the display area with `y`
//! growing downwards. A grid index `(row, col)` projects to the top vertex of
//! its diamond:
//!
//! ```text
//! screen_x = (row - col) * tile_width / 2 + origin_x
//! screen_y = (row + col) * tile_height / 2 + origin_y
//! ```
//!
//! The inverse undoes the skew with the paired sum/difference of the two
//! half-tile ratios and rounds to the nearest index.

// Rounded projections are bounded by the i32 grid index range on purpose.
#![allow(clippy::cast_possible_truncation)]

use crate::board::GridPos;

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// Horizontal position, growing rightwards.
    pub x: f64,
    /// Vertical position, growing downwards.
    pub y: f64,
}

impl ScreenPoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of one tile's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileSize {
    /// Horizontal extent of the diamond.
    pub width: f64,
    /// Vertical extent of the diamond.
    pub height: f64,
}

impl TileSize {
    /// Create a new tile size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Size of a display area in pixels (or any screen unit).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Viewport {
    /// Create a new viewport.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides are finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Index range a picked position is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    /// Number of rows (first index).
    pub rows: u16,
    /// Number of columns (second index).
    pub cols: u16,
}

impl GridBounds {
    /// Create bounds of `rows x cols`.
    #[must_use]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Check whether `pos` lies in `[0, rows) x [0, cols)`.
    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < i32::from(self.rows) && pos.col < i32::from(self.cols)
    }
}

/// Result of inverting a screen point.
///
/// `pos` is reported even when it falls outside the board so callers can
/// tell how far off a click was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridHit {
    /// Nearest grid index.
    pub pos: GridPos,
    /// `pos` lies within the bounds used for the lookup.
    pub valid: bool,
}

/// Tile size plus origin offset: everything the transform is parameterized by.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projection {
    /// Size of one tile.
    pub tile: TileSize,
    /// Screen position of grid index `(0, 0)`.
    pub origin: ScreenPoint,
}

impl Projection {
    /// Create a projection.
    #[must_use]
    pub const fn new(tile: TileSize, origin: ScreenPoint) -> Self {
        Self { tile, origin }
    }

    /// Map a screen point to the nearest grid index.
    ///
    /// A projection with a zero tile side yields an invalid hit at `(0, 0)`.
    #[must_use]
    pub fn screen_to_grid(&self, point: ScreenPoint, bounds: GridBounds) -> GridHit {
        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;
        let half_w = self.tile.width / 2.0;
        let half_h = self.tile.height / 2.0;

        let u = (dx / half_w + dy / half_h) / 2.0;
        let v = (dy / half_h - dx / half_w) / 2.0;

        if !u.is_finite() || !v.is_finite() {
            return GridHit {
                pos: GridPos::new(0, 0),
                valid: false,
            };
        }

        let pos = GridPos::new(u.round() as i32, v.round() as i32);
        GridHit {
            pos,
            valid: bounds.contains(pos),
        }
    }

    /// Project a grid index to the top vertex of its diamond.
    #[must_use]
    pub fn grid_to_screen(&self, pos: GridPos) -> ScreenPoint {
        let row = f64::from(pos.row);
        let col = f64::from(pos.col);
        ScreenPoint {
            x: (row - col) * (self.tile.width / 2.0) + self.origin.x,
            y: (row + col) * (self.tile.height / 2.0) + self.origin.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> Projection {
        Projection::new(TileSize::new(64.0, 32.0), ScreenPoint::new(400.0, 100.0))
    }

    #[test]
    fn test_grid_to_screen_origin() {
        let p = projection().grid_to_screen(GridPos::new(0, 0));
        assert_eq!(p, ScreenPoint::new(400.0, 100.0));
    }

    #[test]
    fn test_grid_to_screen_axes() {
        let proj = projection();
        // Moving along rows goes down-right, along columns down-left.
        assert_eq!(proj.grid_to_screen(GridPos::new(1, 0)), ScreenPoint::new(432.0, 116.0));
        assert_eq!(proj.grid_to_screen(GridPos::new(0, 1)), ScreenPoint::new(368.0, 116.0));
    }

    #[test]
    fn test_screen_to_grid_inverts() {
        let proj = projection();
        let bounds = GridBounds::new(33, 33);
        for row in 0..33 {
            for col in 0..33 {
                let pos = GridPos::new(row, col);
                let hit = proj.screen_to_grid(proj.grid_to_screen(pos), bounds);
                assert_eq!(hit, GridHit { pos, valid: true });
            }
        }
    }

    #[test]
    fn test_screen_to_grid_rounds_inside_tile() {
        let proj = projection();
        let top = proj.grid_to_screen(GridPos::new(3, 4));
        // A few pixels off the reference vertex still resolves to the same index.
        let hit = proj.screen_to_grid(ScreenPoint::new(top.x + 5.0, top.y + 3.0), GridBounds::new(33, 33));
        assert_eq!(hit.pos, GridPos::new(3, 4));
        assert!(hit.valid);
    }

    #[test]
    fn test_screen_to_grid_out_of_bounds() {
        let proj = projection();
        let hit = proj.screen_to_grid(ScreenPoint::new(400.0, 0.0), GridBounds::new(33, 33));
        assert!(!hit.valid);
        assert!(hit.pos.row < 0 && hit.pos.col < 0);
    }

    #[test]
    fn test_screen_to_grid_zero_tile() {
        let proj = Projection::new(TileSize::new(0.0, 0.0), ScreenPoint::default());
        let hit = proj.screen_to_grid(ScreenPoint::new(10.0, 10.0), GridBounds::new(33, 33));
        assert!(!hit.valid);
    }

    #[test]
    fn test_viewport_validity() {
        assert!(Viewport::new(800.0, 600.0).is_valid());
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(800.0, -1.0).is_valid());
        assert!(!Viewport::new(f64::NAN, 600.0).is_valid());
        assert!(!Viewport::new(f64::INFINITY, 600.0).is_valid());
    }
}
