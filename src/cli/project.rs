//! Project command implementation - bare screen/grid conversion.

use super::CliError;
use isoboard::{GridBounds, GridPos, Projection, ScreenPoint, TileSize};

/// Execute the project command.
///
/// # Errors
///
/// Returns an error if a grid coordinate is not an integer.
pub(crate) fn execute(
    tile: TileSize,
    origin: ScreenPoint,
    rows: u16,
    cols: u16,
    inverse: bool,
    x: f64,
    y: f64,
) -> Result<(), CliError> {
    let projection = Projection::new(tile, origin);

    if inverse {
        let pos = GridPos::new(grid_index(x)?, grid_index(y)?);
        let point = projection.grid_to_screen(pos);
        println!("{pos} -> ({:.2}, {:.2})", point.x, point.y);
        return Ok(());
    }

    let hit = projection.screen_to_grid(ScreenPoint::new(x, y), GridBounds::new(rows, cols));
    let status = if hit.valid { "valid" } else { "out of bounds" };
    println!("({x:.2}, {y:.2}) -> {} [{status}]", hit.pos);
    Ok(())
}

// Range is checked before the cast.
#[allow(clippy::cast_possible_truncation)]
fn grid_index(value: f64) -> Result<i32, CliError> {
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(CliError::new(format!("grid index must be an integer, got {value}")));
    }
    Ok(value as i32)
}
