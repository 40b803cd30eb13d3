//! Generate command implementation.

use super::{CliError, SnapArg};
use isoboard::render::ascii_preview;
use isoboard::{Board, CellType, GridConfig, TileSnap, Viewport, codec, generate_layout};
use std::path::PathBuf;

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the configured shape is invalid, the layout cannot be
/// fitted, or the map cannot be written.
pub(crate) fn execute(
    config: &GridConfig,
    name: &str,
    output: Option<PathBuf>,
    viewport: Option<Viewport>,
    snap: Option<SnapArg>,
    preview: bool,
) -> Result<(), CliError> {
    let viewport = viewport.unwrap_or_else(|| config.board_viewport());
    let snap = snap.map_or(config.layout.tile_snap, TileSnap::from);

    let mut board = Board::new(config.shape())?;
    let summary = generate_layout(&mut board, viewport, snap)?;

    println!(
        "Generated {}x{} board: {} walkable cells, tile {:.2}x{:.2} ({:?}-constrained) for {}x{}",
        board.width(),
        board.height(),
        board.count_of(CellType::Walkable),
        summary.fit.tile.width,
        summary.fit.tile.height,
        summary.fit.axis,
        viewport.width,
        viewport.height,
    );

    if preview {
        print!("{}", ascii_preview(&board));
    }

    let path = match output {
        Some(path) => {
            codec::save(&board, &path)?;
            path
        }
        None => config.map_store().save(name, &board)?,
    };
    println!("Saved to {}", path.display());

    Ok(())
}
