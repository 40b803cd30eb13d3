//! Inspect command implementation.

use super::{CliError, InspectFormat, open_map};
use isoboard::render::ascii_preview;
use isoboard::{Board, CellType, GridConfig};
use serde_json::json;

/// Execute the inspect command.
///
/// # Errors
///
/// Returns an error if the map cannot be loaded.
pub(crate) fn execute(config: &GridConfig, map: &str, format: InspectFormat, preview: bool) -> Result<(), CliError> {
    let board = open_map(config, map)?;

    match format {
        InspectFormat::Text => print_text(&board),
        InspectFormat::Json => {
            let text = serde_json::to_string_pretty(&summary_json(&board)).map_err(|e| CliError::new(e.to_string()))?;
            println!("{text}");
        }
    }

    if preview {
        print!("{}", ascii_preview(&board));
    }
    Ok(())
}

fn print_text(board: &Board) {
    let shape = board.shape();
    println!("Board:     {}x{} cells", shape.width, shape.height);
    println!(
        "Playable:  {}x{} tiles, iso ratio {}",
        shape.playable_width, shape.playable_height, shape.iso_ratio
    );
    match board.metrics() {
        Some(m) => {
            println!("Tile:      {:.2}x{:.2}", m.tile.width, m.tile.height);
            println!(
                "Viewport:  {}x{}",
                m.reference_viewport.width, m.reference_viewport.height
            );
        }
        None => println!("Layout:    none"),
    }
    for cell_type in CellType::ALL {
        println!("{:<10} {}", format!("{}:", cell_type.as_str()), board.count_of(cell_type));
    }
    let occupied = board.playable_cells().filter(|(_, c)| c.occupied).count();
    println!("{:<10} {occupied}", "OCCUPIED:");
}

fn summary_json(board: &Board) -> serde_json::Value {
    let shape = board.shape();
    let counts: serde_json::Map<String, serde_json::Value> = CellType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), json!(board.count_of(*t))))
        .collect();

    json!({
        "rows": shape.height,
        "cols": shape.width,
        "playableWidth": shape.playable_width,
        "playableHeight": shape.playable_height,
        "isoRatio": shape.iso_ratio,
        "layout": board.metrics().map(|m| json!({
            "cellWidth": m.tile.width,
            "cellHeight": m.tile.height,
            "viewportWidth": m.reference_viewport.width,
            "viewportHeight": m.reference_viewport.height,
        })),
        "counts": counts,
        "occupied": board.playable_cells().filter(|(_, c)| c.occupied).count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoboard::{TileSnap, Viewport, generate_layout};

    #[test]
    fn test_summary_json() {
        let mut board = Board::reference();
        assert!(summary_json(&board)["layout"].is_null());

        generate_layout(&mut board, Viewport::new(2000.0, 760.0), TileSnap::Exact).unwrap();
        let summary = summary_json(&board);
        assert_eq!(summary["counts"]["WALKABLE"], json!(537));
        assert_eq!(summary["layout"]["cellWidth"], json!(80.0));
        assert_eq!(summary["rows"], json!(33));
    }
}
