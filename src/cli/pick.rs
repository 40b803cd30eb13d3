//! Pick command implementation.

use super::{CliError, open_map};
use isoboard::{GridConfig, ScreenPoint, Viewport};

/// Execute the pick command.
///
/// # Errors
///
/// Returns an error if the map cannot be loaded or has no layout.
pub(crate) fn execute(
    config: &GridConfig,
    map: &str,
    point: ScreenPoint,
    viewport: Option<Viewport>,
) -> Result<(), CliError> {
    let board = open_map(config, map)?;
    let metrics = board
        .metrics()
        .ok_or_else(|| CliError::new(format!("{map} has no layout; run generate first")))?;
    let current = viewport.unwrap_or(metrics.reference_viewport);

    match board.pick(point, current)? {
        Some(pos) => {
            // A pick only ever returns a rendered cell.
            let cell = board.get_cell(pos).ok_or_else(|| CliError::new("picked cell out of range"))?;
            let occupied = if cell.occupied { ", occupied" } else { "" };
            println!("{pos} {}{occupied}", cell.cell_type.as_str());
        }
        None => println!("no cell at ({:.2}, {:.2})", point.x, point.y),
    }
    Ok(())
}
