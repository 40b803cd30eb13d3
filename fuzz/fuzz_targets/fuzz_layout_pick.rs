#![no_main]

use arbitrary::Arbitrary;
use isoboard::{Board, BoardShape, ScreenPoint, TileSnap, Viewport, generate_layout, render_cells};
use libfuzzer_sys::fuzz_target;

/// Structured input for layout and picking.
#[derive(Arbitrary, Debug)]
struct LayoutInput {
    playable_width: u8,
    playable_height: u8,
    layout_width: f64,
    layout_height: f64,
    current_width: f64,
    current_height: f64,
    click_x: f64,
    click_y: f64,
    whole_pixels: bool,
}

fuzz_target!(|input: LayoutInput| {
    let shape = BoardShape {
        playable_width: u16::from(input.playable_width),
        playable_height: u16::from(input.playable_height),
        ..BoardShape::REFERENCE
    };
    let Ok(mut board) = Board::new(shape) else {
        return;
    };
    let snap = if input.whole_pixels {
        TileSnap::WholePixels
    } else {
        TileSnap::Exact
    };

    // Errors are fine; panics are not.
    if generate_layout(&mut board, Viewport::new(input.layout_width, input.layout_height), snap).is_err() {
        return;
    }

    let current = Viewport::new(input.current_width, input.current_height);
    let Ok(cells) = render_cells(&board, current) else {
        return;
    };
    if let Ok(Some(pos)) = board.pick(ScreenPoint::new(input.click_x, input.click_y), current) {
        assert!(cells.iter().any(|c| c.pos == pos));
    }
});
