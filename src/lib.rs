// Allow unwrap and exact float comparison in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Isoboard: grid layout engine for an isometric tactics board.
//!
//! This crate provides:
//! - A fixed square cell array with a diamond-shaped playable region
//! - A layout pass that fits and centers the diamond in any display size
//! - Screen <-> grid picking for 2:1 isometric tiles
//! - JSON map persistence with atomic saves
//! - Render-time rescaling behind a small drawing seam
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / TUI viewer (isoboard bin)   │
//! ├─────────────────────────────────────┤
//! │  render (QuadSink)  │    codec      │
//! ├─────────────────────┴───────────────┤
//! │  layout  │  rescale  │  transform   │
//! ├─────────────────────────────────────┤
//! │            board (cells)            │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use isoboard::{Board, CellType, GridPos, TileSnap, Viewport, generate_layout};
//!
//! let mut board = Board::reference();
//! generate_layout(&mut board, Viewport::new(896.0, 576.0), TileSnap::Exact)?;
//!
//! assert_eq!(board.count_of(CellType::Walkable), 537);
//! assert!(board.get_cell(GridPos::new(-1, 5)).is_none());
//! # Ok::<(), isoboard::LayoutError>(())
//! ```

pub mod board;
pub mod codec;
pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod rescale;
pub mod transform;

pub use error::{BoardError, ConfigError, LayoutError, MapError};

// Re-export the core types at crate root for convenience
pub use board::{Board, BoardShape, CanonicalMetrics, Cell, CellType, GridPos};
pub use codec::{CellTypePolicy, LoadOptions, MapStore};
pub use config::GridConfig;
pub use layout::{FitAxis, LayoutSummary, TileFit, TileSnap, fit_tiles, generate_layout};
pub use render::{PanelLayout, QuadSink, draw_board};
pub use rescale::{RenderCell, ViewportScale, render_cells};
pub use transform::{GridBounds, GridHit, Projection, ScreenPoint, TileSize, Viewport};
