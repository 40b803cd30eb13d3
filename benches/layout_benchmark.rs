//! Benchmarks for the layout pass and the per-frame render path.
//!
//! Layout runs once per session; rescale and picking run every frame, so those
//! are the numbers that matter.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use isoboard::render::DrawCall;
use isoboard::{Board, ScreenPoint, TileSnap, Viewport, codec, draw_board, generate_layout, render_cells};

fn laid_out() -> Board {
    let mut board = Board::reference();
    generate_layout(&mut board, Viewport::new(896.0, 576.0), TileSnap::Exact).unwrap();
    board
}

fn bench_generate_layout(c: &mut Criterion) {
    let mut board = Board::reference();

    c.bench_function("generate_layout_33x33", |b| {
        b.iter(|| {
            let summary = generate_layout(&mut board, black_box(Viewport::new(1280.0, 720.0)), TileSnap::Exact);
            black_box(summary)
        });
    });
}

fn bench_render_cells(c: &mut Criterion) {
    let board = laid_out();

    c.bench_function("render_cells_identity", |b| {
        b.iter(|| black_box(render_cells(black_box(&board), Viewport::new(896.0, 576.0))));
    });
    c.bench_function("render_cells_rescaled", |b| {
        b.iter(|| black_box(render_cells(black_box(&board), Viewport::new(1920.0, 1080.0))));
    });
}

fn bench_draw_board(c: &mut Criterion) {
    let board = laid_out();
    let mut calls: Vec<DrawCall> = Vec::with_capacity(2 * 537);

    c.bench_function("draw_board_recorded", |b| {
        b.iter(|| {
            calls.clear();
            let drawn = draw_board(black_box(&board), Viewport::new(1920.0, 1080.0), &mut calls);
            black_box(drawn)
        });
    });
}

fn bench_pick(c: &mut Criterion) {
    let board = laid_out();

    c.bench_function("pick_center", |b| {
        b.iter(|| black_box(board.pick(black_box(ScreenPoint::new(448.0, 288.0)), Viewport::new(896.0, 576.0))));
    });
}

fn bench_codec(c: &mut Criterion) {
    let board = laid_out();
    let text = codec::encode(&board).unwrap();

    c.bench_function("encode_33x33", |b| {
        b.iter(|| black_box(codec::encode(black_box(&board))));
    });
    c.bench_function("decode_33x33", |b| {
        b.iter(|| black_box(codec::decode(black_box(&text), isoboard::LoadOptions::default())));
    });
}

criterion_group!(benches, bench_generate_layout, bench_render_cells, bench_draw_board, bench_pick, bench_codec);
criterion_main!(benches);
