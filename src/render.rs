//! Render adapter seam.
//!
//! The core never draws anything itself. It rescales the board for the
//! current display and hands each rendered cell to a [`QuadSink`], which owns
//! the actual drawing primitives (a terminal canvas, a GPU batch, a test log).

use crate::board::{Board, CellType};
use crate::error::LayoutError;
use crate::rescale::{RenderCell, render_cells};
use crate::transform::Viewport;

/// Drawing primitives the core needs from a renderer.
///
/// Quads are diamonds whose top vertex is `cell.top` and whose bounding box
/// is `cell.size`.
pub trait QuadSink {
    /// Draw a filled diamond.
    fn fill_quad(&mut self, cell: &RenderCell);
    /// Draw a diamond outline.
    fn outline_quad(&mut self, cell: &RenderCell);
}

/// A recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    /// [`QuadSink::fill_quad`] was called.
    Fill(RenderCell),
    /// [`QuadSink::outline_quad`] was called.
    Outline(RenderCell),
}

/// Records every call, for headless use and tests.
impl QuadSink for Vec<DrawCall> {
    fn fill_quad(&mut self, cell: &RenderCell) {
        self.push(DrawCall::Fill(*cell));
    }

    fn outline_quad(&mut self, cell: &RenderCell) {
        self.push(DrawCall::Outline(*cell));
    }
}

/// Draw every rendered cell: fill first, then outline, in row-major order.
///
/// Returns the number of cells drawn.
///
/// # Errors
///
/// Returns an error if the board has no layout or `current` is invalid.
pub fn draw_board<S: QuadSink + ?Sized>(board: &Board, current: Viewport, sink: &mut S) -> Result<usize, LayoutError> {
    let cells = render_cells(board, current)?;
    for cell in &cells {
        sink.fill_quad(cell);
        sink.outline_quad(cell);
    }
    Ok(cells.len())
}

/// An integer rectangle in window space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub height: u32,
}

impl PanelRect {
    /// Size of this rectangle as a viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Window split into the board panel and its three side panels.
///
/// ```text
/// +------+--------------------+------+
/// |      |                    |      |
/// | left |        main        | right|
/// | 15%  |      70% x 80%     | 15%  |
/// |      +--------------------+      |
/// |      |   bottom 70% x 20% |      |
/// +------+--------------------+------+
/// ```
///
/// Owned by whoever drives the window and recomputed on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelLayout {
    /// Board panel.
    pub main: PanelRect,
    /// Panel under the board.
    pub bottom: PanelRect,
    /// Left column.
    pub left: PanelRect,
    /// Right column.
    pub right: PanelRect,
}

impl PanelLayout {
    /// Split a window of `width x height`.
    #[must_use]
    pub fn compute(width: u32, height: u32) -> Self {
        let w = f64::from(width);
        let h = f64::from(height);
        let frac = |total: f64, share: f64| round_to_u32(total * share);

        Self {
            main: PanelRect {
                x: frac(w, 0.15),
                y: 0,
                width: frac(w, 0.70),
                height: frac(h, 0.80),
            },
            bottom: PanelRect {
                x: frac(w, 0.15),
                y: frac(h, 0.80),
                width: frac(w, 0.70),
                height: frac(h, 0.20),
            },
            left: PanelRect {
                x: 0,
                y: 0,
                width: frac(w, 0.15),
                height,
            },
            right: PanelRect {
                x: frac(w, 0.85),
                y: 0,
                width: frac(w, 0.15),
                height,
            },
        }
    }
}

// Inputs are products of u32 values with shares in [0, 1].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_u32(value: f64) -> u32 {
    value.round() as u32
}

/// Glyph for a cell in [`ascii_preview`].
#[must_use]
pub const fn cell_glyph(cell_type: CellType, occupied: bool) -> char {
    match cell_type {
        CellType::Walkable if occupied => '@',
        CellType::Walkable => '.',
        CellType::Empty => '_',
        CellType::Obstacle => '#',
        CellType::NotRendered => ' ',
    }
}

/// Array-space dump of the board, one text line per row.
///
/// ```text
///               .
///              ...
///             .....
/// ```
///
/// Legend: `.` walkable, `@` occupied, `_` empty, `#` obstacle, blank not rendered.
/// Trailing blanks are trimmed.
#[must_use]
pub fn ascii_preview(board: &Board) -> String {
    let width = usize::from(board.width());
    let mut output = String::with_capacity(board.raw_cells().len() + usize::from(board.height()));

    for row in board.raw_cells().chunks(width) {
        let line: String = row.iter().map(|c| cell_glyph(c.cell_type, c.occupied)).collect();
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GridPos;
    use crate::layout::{TileSnap, generate_layout};

    fn laid_out() -> Board {
        let mut board = Board::reference();
        generate_layout(&mut board, Viewport::new(2000.0, 760.0), TileSnap::Exact).unwrap();
        board
    }

    #[test]
    fn test_draw_board_fill_then_outline() {
        let board = laid_out();
        let mut calls: Vec<DrawCall> = Vec::new();
        let drawn = draw_board(&board, Viewport::new(2000.0, 760.0), &mut calls).unwrap();

        assert_eq!(drawn, 537);
        assert_eq!(calls.len(), 537 * 2);
        for pair in calls.chunks(2) {
            match (pair[0], pair[1]) {
                (DrawCall::Fill(a), DrawCall::Outline(b)) => assert_eq!(a, b),
                other => panic!("unexpected order: {other:?}"),
            }
        }
    }

    #[test]
    fn test_draw_board_skips_not_rendered() {
        let mut board = laid_out();
        board.set_cell_type(GridPos::new(0, 14), CellType::NotRendered);
        let mut calls: Vec<DrawCall> = Vec::new();
        let drawn = draw_board(&board, Viewport::new(2000.0, 760.0), &mut calls).unwrap();
        assert_eq!(drawn, 536);
        assert!(calls.iter().all(|c| match c {
            DrawCall::Fill(rc) | DrawCall::Outline(rc) => rc.cell_type != CellType::NotRendered,
        }));
    }

    #[test]
    fn test_draw_board_without_layout() {
        let board = Board::reference();
        let mut calls: Vec<DrawCall> = Vec::new();
        assert!(draw_board(&board, Viewport::new(800.0, 600.0), &mut calls).is_err());
        assert!(calls.is_empty());
    }

    #[test]
    fn test_panel_layout_reference_window() {
        let panels = PanelLayout::compute(1280, 720);
        assert_eq!(panels.main, PanelRect { x: 192, y: 0, width: 896, height: 576 });
        assert_eq!(panels.bottom, PanelRect { x: 192, y: 576, width: 896, height: 144 });
        assert_eq!(panels.left, PanelRect { x: 0, y: 0, width: 192, height: 720 });
        assert_eq!(panels.right, PanelRect { x: 1088, y: 0, width: 192, height: 720 });
        assert_eq!(panels.main.viewport(), Viewport::new(896.0, 576.0));
    }

    #[test]
    fn test_panel_layout_recomputes() {
        let small = PanelLayout::compute(640, 360);
        let large = PanelLayout::compute(1920, 1080);
        assert_eq!(small.main.width, 448);
        assert_eq!(large.main.width, 1344);
        assert_eq!(large.main.height, 864);
    }

    #[test]
    fn test_ascii_preview_shape() {
        let board = laid_out();
        let preview = ascii_preview(&board);
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 33);
        assert_eq!(lines[0].trim(), ".");
        assert_eq!(lines[0].len(), 15);
        assert_eq!(lines[14].len(), 29);
        assert_eq!(lines[32], " .");
    }

    #[test]
    fn test_cell_glyphs() {
        assert_eq!(cell_glyph(CellType::Walkable, false), '.');
        assert_eq!(cell_glyph(CellType::Walkable, true), '@');
        assert_eq!(cell_glyph(CellType::Obstacle, false), '#');
        assert_eq!(cell_glyph(CellType::NotRendered, false), ' ');
    }
}
