//! Map file persistence.
//!
//! A map is one pretty-printed JSON document:
//!
//! ```text
//! {
//!     "rows": 33, "cols": 33,
//!     "cellWidth": 80.0, "cellHeight": 40.0,
//!     "viewportWidth": 2000.0, "viewportHeight": 760.0,
//!     "playableWidth": 15, "playableHeight": 19, "isoRatio": 2.0,
//!     "cells": [[{"x": 0.0, "y": 0.0, "type": "NO_RENDER", "occupied": false}, ...], ...]
//! }
//! ```
//!
//! `cells` is row-major and always holds the full array, including
//! `NO_RENDER` slots. The four metric fields are written only for boards that
//! have been laid out. The playable footprint fields are optional on read and
//! default to the reference shape.
//!
//! Saving publishes atomically. Loading is all-or-nothing: it builds a new
//! board and never touches an existing one unless the whole file decoded.

mod atomic;
mod record;
mod store;

pub use store::MapStore;

use crate::board::{Board, BoardShape, CanonicalMetrics, Cell, CellType};
use crate::error::MapError;
use crate::transform::{ScreenPoint, TileSize, Viewport};
use record::{CellRecord, MapRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do with a cell type string outside the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellTypePolicy {
    /// Read it as `WALKABLE` and log a warning. Also drops an `occupied`
    /// flag on a non-walkable cell instead of failing.
    #[default]
    Lenient,
    /// Fail the load.
    Strict,
}

/// Options for decoding a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Handling of unrecognized cell types.
    pub unknown_cell_type: CellTypePolicy,
}

impl LoadOptions {
    /// Reject anything that is not exactly what this crate writes.
    pub const STRICT: LoadOptions = LoadOptions {
        unknown_cell_type: CellTypePolicy::Strict,
    };
}

/// Serialize a board to its JSON text.
///
/// # Errors
///
/// Returns [`MapError::Malformed`] if a cell position or a metric is not a
/// finite number (JSON has no spelling for those), or if the metrics could
/// not have come from a layout pass. Returns an error if serialization fails.
pub fn encode(board: &Board) -> Result<String, MapError> {
    let shape = board.shape();
    let metrics = board.metrics();
    let width = usize::from(shape.width);

    if let Some(m) = metrics {
        check_metrics(m)?;
    }
    if let Some((pos, cell)) = board
        .cells()
        .find(|(_, c)| !c.position.x.is_finite() || !c.position.y.is_finite())
    {
        return Err(MapError::Malformed(format!(
            "cell {pos} has a non-finite position ({}, {})",
            cell.position.x, cell.position.y
        )));
    }

    let cells = board
        .raw_cells()
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|cell| CellRecord {
                    x: cell.position.x,
                    y: cell.position.y,
                    cell_type: Some(cell.cell_type.as_str().to_string()),
                    occupied: cell.occupied,
                })
                .collect()
        })
        .collect();

    let record = MapRecord {
        rows: Some(shape.height),
        cols: Some(shape.width),
        cell_width: metrics.map(|m| m.tile.width),
        cell_height: metrics.map(|m| m.tile.height),
        viewport_width: metrics.map(|m| m.reference_viewport.width),
        viewport_height: metrics.map(|m| m.reference_viewport.height),
        playable_width: Some(shape.playable_width),
        playable_height: Some(shape.playable_height),
        iso_ratio: Some(shape.iso_ratio),
        cells: Some(cells),
    };

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    record.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| MapError::Malformed(e.to_string()))
}

/// Parse JSON text into a new board.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON, a required field is
/// missing, the cell array does not match `rows x cols`, the metric fields are
/// only partly present, the stored shape is invalid, or (strict only) a cell
/// is unrecognized or inconsistent.
pub fn decode(text: &str, options: LoadOptions) -> Result<Board, MapError> {
    let record: MapRecord = serde_json::from_str(text)?;

    let rows = record.rows.ok_or(MapError::MissingField("rows"))?;
    let cols = record.cols.ok_or(MapError::MissingField("cols"))?;
    let metrics = decode_metrics(&record)?;
    let rows_data = record.cells.ok_or(MapError::MissingField("cells"))?;

    let shape = BoardShape {
        width: cols,
        height: rows,
        playable_width: record.playable_width.unwrap_or(BoardShape::REFERENCE.playable_width),
        playable_height: record.playable_height.unwrap_or(BoardShape::REFERENCE.playable_height),
        iso_ratio: record.iso_ratio.unwrap_or(BoardShape::REFERENCE.iso_ratio),
    };
    shape.validate()?;

    if rows_data.len() != usize::from(rows) {
        return Err(MapError::Malformed(format!(
            "expected {rows} rows of cells, found {}",
            rows_data.len()
        )));
    }

    // Shape must match the data before sizing anything from the header.
    if let Some((row, row_data)) = rows_data
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != usize::from(cols))
    {
        return Err(MapError::Malformed(format!(
            "row {row}: expected {cols} cells, found {}",
            row_data.len()
        )));
    }

    let mut cells = Vec::with_capacity(shape.cell_count());
    for (row, row_data) in rows_data.into_iter().enumerate() {
        for (col, rec) in row_data.into_iter().enumerate() {
            cells.push(decode_cell(rec, row, col, options)?);
        }
    }

    Ok(Board::from_parts(shape, cells, metrics)?)
}

fn decode_metrics(record: &MapRecord) -> Result<Option<CanonicalMetrics>, MapError> {
    match (
        record.cell_width,
        record.cell_height,
        record.viewport_width,
        record.viewport_height,
    ) {
        (Some(w), Some(h), Some(vw), Some(vh)) => {
            let metrics = CanonicalMetrics {
                tile: TileSize::new(w, h),
                reference_viewport: Viewport::new(vw, vh),
            };
            check_metrics(&metrics)?;
            Ok(Some(metrics))
        }
        (None, None, None, None) => Ok(None),
        _ => Err(MapError::Malformed(
            "cellWidth, cellHeight, viewportWidth and viewportHeight must be given together".to_string(),
        )),
    }
}

/// Metrics must describe a real layout: a positive finite tile and a valid viewport.
fn check_metrics(metrics: &CanonicalMetrics) -> Result<(), MapError> {
    let tile = metrics.tile;
    let viewport = metrics.reference_viewport;
    let tile_ok = tile.width.is_finite() && tile.height.is_finite() && tile.width > 0.0 && tile.height > 0.0;
    if !tile_ok {
        return Err(MapError::Malformed(format!(
            "cell size {}x{} is not a positive finite size",
            tile.width, tile.height
        )));
    }
    if !viewport.is_valid() {
        return Err(MapError::Malformed(format!(
            "viewport {}x{} is not a positive finite size",
            viewport.width, viewport.height
        )));
    }
    Ok(())
}

fn decode_cell(rec: CellRecord, row: usize, col: usize, options: LoadOptions) -> Result<Cell, MapError> {
    let strict = options.unknown_cell_type == CellTypePolicy::Strict;

    let cell_type = match rec.cell_type.as_deref().and_then(CellType::from_name) {
        Some(t) => t,
        None if strict => {
            return Err(MapError::UnknownCellType {
                value: rec.cell_type.unwrap_or_default(),
                row,
                col,
            });
        }
        None => {
            tracing::warn!(row, col, value = ?rec.cell_type, "unrecognized cell type, reading as WALKABLE");
            CellType::Walkable
        }
    };

    let mut cell = Cell::new(cell_type, ScreenPoint::new(rec.x, rec.y));
    cell.occupied = rec.occupied;
    if !cell.is_consistent() {
        if strict {
            return Err(MapError::Malformed(format!(
                "cell ({row}, {col}) is occupied but {}",
                cell_type.as_str()
            )));
        }
        tracing::warn!(row, col, "occupied flag on non-walkable cell dropped");
        cell.occupied = false;
    }
    Ok(cell)
}

/// Write a board to `path`, replacing any existing file atomically.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails. The file
/// at `path` is then unchanged.
pub fn save(board: &Board, path: &Path) -> Result<(), MapError> {
    let text = encode(board)?;
    atomic::atomic_write(path, text.as_bytes())?;
    tracing::info!(path = %path.display(), bytes = text.len(), "map saved");
    Ok(())
}

/// Read a board from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode; see [`decode`].
pub fn load(path: &Path, options: LoadOptions) -> Result<Board, MapError> {
    let text = fs::read_to_string(path)?;
    let board = decode(&text, options)?;
    tracing::info!(
        path = %path.display(),
        rows = board.height(),
        cols = board.width(),
        laid_out = board.metrics().is_some(),
        "map loaded"
    );
    Ok(board)
}

/// Replace `board` with the contents of `path`.
///
/// `board` is only written once the whole file has decoded.
///
/// # Errors
///
/// Same as [`load`]; `board` is untouched on error.
pub fn load_into(board: &mut Board, path: &Path, options: LoadOptions) -> Result<(), MapError> {
    *board = load(path, options)?;
    Ok(())
}
