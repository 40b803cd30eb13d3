//! End-to-end scenarios on the reference 33x33 board.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use isoboard::codec::{load_into, save};
use isoboard::render::ascii_preview;
use isoboard::{
    Board, BoardShape, CellType, FitAxis, GridPos, LoadOptions, ScreenPoint, TileSize, TileSnap, Viewport,
    generate_layout, render_cells,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_generate_then_query() {
    // 2000 / (760 * 2) ~= 1.316 > 15 / 19, so the height limits the tile.
    let mut board = Board::reference();
    let summary = generate_layout(&mut board, Viewport::new(2000.0, 760.0), TileSnap::Exact).unwrap();

    assert_eq!(summary.fit.axis, FitAxis::Height);
    assert_eq!(summary.fit.tile, TileSize::new(80.0, 40.0));
    assert_eq!(summary.cells_stamped, 537);

    // Topmost diamond cell: first line of the top half, k = 0.
    let apex = board.get_cell(GridPos::new(0, 14)).unwrap();
    assert_eq!(apex.cell_type, CellType::Walkable);
    assert_eq!(apex.position.y, 0.0);
    assert!((0..33).filter(|&c| c != 14).all(|c| {
        board.get_cell(GridPos::new(0, c)).unwrap().cell_type == CellType::NotRendered
    }));

    let metrics = board.metrics().unwrap();
    assert_eq!(metrics.tile, TileSize::new(80.0, 40.0));
    assert_eq!(metrics.reference_viewport, Viewport::new(2000.0, 760.0));
}

#[test]
fn test_out_of_bounds_query() {
    let mut board = Board::reference();
    generate_layout(&mut board, Viewport::new(1280.0, 720.0), TileSnap::Exact).unwrap();

    assert!(board.get_cell(GridPos::new(-1, 5)).is_none());
    assert!(board.get_cell(GridPos::new(40, 40)).is_none());
    assert!(board.get_cell(GridPos::new(33, 0)).is_none());
    assert!(board.get_cell(GridPos::new(32, 32)).is_some());

    let before = board.clone();
    assert!(!board.set_cell_type(GridPos::new(-1, 5), CellType::Obstacle));
    assert!(!board.set_occupied(GridPos::new(40, 40), true));
    assert_eq!(board, before);
}

#[test]
fn test_malformed_load_keeps_board() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_rows.json");
    fs::write(&path, r#"{"cols": 33, "cells": []}"#).unwrap();

    let mut board = Board::reference();
    generate_layout(&mut board, Viewport::new(1280.0, 720.0), TileSnap::Exact).unwrap();
    board.set_cell_type(GridPos::new(20, 5), CellType::Obstacle);
    let before = board.clone();

    assert!(load_into(&mut board, &path, LoadOptions::default()).is_err());
    assert_eq!(board, before);
}

#[test]
fn test_resize_then_pick() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arena.json");

    let mut board = Board::reference();
    generate_layout(&mut board, Viewport::new(896.0, 576.0), TileSnap::Exact).unwrap();
    board.set_cell_type(GridPos::new(16, 16), CellType::Obstacle);
    save(&board, &path).unwrap();

    let mut loaded = Board::reference();
    load_into(&mut loaded, &path, LoadOptions::STRICT).unwrap();

    // Window doubled in size: positions and tiles double, no new layout pass.
    let resized = Viewport::new(1792.0, 1152.0);
    let cells = render_cells(&loaded, resized).unwrap();
    let target = cells.iter().find(|c| c.pos == GridPos::new(16, 16)).unwrap();
    let canonical = loaded.get_cell(GridPos::new(16, 16)).unwrap().position;
    assert_eq!(target.top, ScreenPoint::new(canonical.x * 2.0, canonical.y * 2.0));
    assert_eq!(target.cell_type, CellType::Obstacle);

    assert_eq!(loaded.pick(target.center(), resized).unwrap(), Some(GridPos::new(16, 16)));
    assert_eq!(loaded.pick(ScreenPoint::new(-10.0, -10.0), resized).unwrap(), None);
}

#[test]
fn test_regenerate_discards_edits() {
    let mut board = Board::reference();
    generate_layout(&mut board, Viewport::new(1280.0, 720.0), TileSnap::Exact).unwrap();
    board.set_cell_type(GridPos::new(10, 10), CellType::Obstacle);
    board.set_occupied(GridPos::new(12, 12), true);

    generate_layout(&mut board, Viewport::new(1280.0, 720.0), TileSnap::Exact).unwrap();
    assert_eq!(board.count_of(CellType::Obstacle), 0);
    assert!(board.cells().all(|(_, c)| !c.occupied));
}

#[test]
fn test_square_footprint_is_a_rhombus() {
    let shape = BoardShape {
        playable_width: 10,
        playable_height: 10,
        ..BoardShape::REFERENCE
    };
    let mut board = Board::new(shape).unwrap();
    let summary = generate_layout(&mut board, Viewport::new(800.0, 400.0), TileSnap::Exact).unwrap();
    assert_eq!(summary.cells_stamped, 100 + 81);

    let preview = ascii_preview(&board);
    let widths: Vec<usize> = preview.lines().map(|l| l.trim().len()).collect();
    let widest = widths.iter().copied().max().unwrap();
    assert_eq!(widest, 19);
    assert_eq!(widths.iter().filter(|&&w| w == widest).count(), 1);
}
