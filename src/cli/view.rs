//! View command implementation - Interactive TUI board viewer.

// Terminal geometry is u16; canvas geometry is f64 in braille dots
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use super::{CliError, SnapArg, open_map};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use isoboard::render::{PanelRect, cell_glyph};
use isoboard::{
    Board, CellType, GridConfig, GridPos, PanelLayout, QuadSink, RenderCell, ScreenPoint, TileSnap, Viewport,
    draw_board, generate_layout,
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Wrap,
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};
use std::io::stdout;
use std::time::Duration;

/// Braille dots per terminal cell.
const DOTS_X: f64 = 2.0;
const DOTS_Y: f64 = 4.0;

/// Execute the view command.
///
/// # Errors
///
/// Returns an error if the map cannot be loaded, the layout fails, or the
/// terminal cannot be driven.
pub(crate) fn execute(config: &GridConfig, map: Option<&str>, snap: Option<SnapArg>) -> Result<(), CliError> {
    let (board, title) = match map {
        Some(name) => (open_map(config, name)?, name.to_string()),
        None => {
            let mut board = Board::new(config.shape())?;
            let snap = snap.map_or(config.layout.tile_snap, TileSnap::from);
            generate_layout(&mut board, config.board_viewport(), snap)?;
            (board, "fresh layout".to_string())
        }
    };
    if board.metrics().is_none() {
        return Err(CliError::new(format!("{title} has no layout; run generate first")));
    }

    run_tui(App::new(board, title))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// App state for the TUI.
struct App {
    board: Board,
    title: String,
    selected: Option<GridPos>,
    /// Canvas viewport and its terminal rect from the last frame.
    canvas: Option<(Viewport, Rect)>,
    message: String,
}

impl App {
    fn new(board: Board, title: String) -> Self {
        Self {
            board,
            title,
            selected: None,
            canvas: None,
            message: "click a cell to select it".to_string(),
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let Some((viewport, area)) = self.canvas else {
            return;
        };
        if column < area.x || row < area.y || column >= area.x + area.width || row >= area.y + area.height {
            return;
        }
        // Center of the terminal cell, in canvas dots with y growing down.
        let point = ScreenPoint::new(
            (f64::from(column - area.x) + 0.5) * DOTS_X,
            (f64::from(row - area.y) + 0.5) * DOTS_Y,
        );
        match self.board.pick(point, viewport) {
            Ok(Some(pos)) => {
                self.selected = Some(pos);
                self.message = format!("selected {pos}");
            }
            Ok(None) => {
                self.selected = None;
                self.message = "no cell there".to_string();
            }
            Err(e) => self.message = e.to_string(),
        }
    }

    fn cycle_selected_type(&mut self) {
        let Some(pos) = self.selected else {
            return;
        };
        let Some(cell) = self.board.get_cell(pos) else {
            return;
        };
        let next = match cell.cell_type {
            CellType::Walkable => CellType::Obstacle,
            CellType::Obstacle => CellType::Empty,
            CellType::Empty | CellType::NotRendered => CellType::Walkable,
        };
        self.board.set_cell_type(pos, next);
        self.message = format!("{pos} is now {}", next.as_str());
    }

    fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
                KeyCode::Char('t') => self.cycle_selected_type(),
                KeyCode::Char('o') => self.toggle_selected_occupied(),
                KeyCode::Char('c') => {
                    self.selected = None;
                    self.message = "selection cleared".to_string();
                }
                _ => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.click(mouse.column, mouse.row);
            }
            // Next draw picks up the new size.
            Event::Resize(width, height) => tracing::debug!(width, height, "terminal resized"),
            _ => {}
        }
        Flow::Continue
    }

    fn toggle_selected_occupied(&mut self) {
        let Some(pos) = self.selected else {
            return;
        };
        let occupied = self.board.get_cell(pos).is_some_and(|c| c.occupied);
        self.message = if self.board.set_occupied(pos, !occupied) {
            format!("{pos} occupied: {}", !occupied)
        } else {
            format!("{pos} is not walkable")
        };
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    enable_raw_mode()?;
    let result = run_in_alternate_screen(&mut app);
    // Restore terminal whether or not the loop failed.
    restore_terminal();
    result
}

fn run_in_alternate_screen(app: &mut App) -> Result<(), CliError> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| CliError::new(e.to_string()))?;
    event_loop(&mut terminal, app)
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "failed to leave raw mode");
    }
    let mut out = stdout();
    if let Err(e) = execute!(out, LeaveAlternateScreen, DisableMouseCapture) {
        tracing::warn!(error = %e, "failed to leave alternate screen");
    }
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), CliError> {
    loop {
        terminal.draw(|f| ui(f, app)).map_err(|e| CliError::new(e.to_string()))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if app.handle(event::read()?) == Flow::Quit {
            return Ok(());
        }
    }
}

fn to_rect(origin: Rect, panel: PanelRect) -> Rect {
    // Rounded shares can overshoot the frame by one cell.
    Rect::new(
        origin.x + panel.x as u16,
        origin.y + panel.y as u16,
        panel.width as u16,
        panel.height as u16,
    )
    .intersection(origin)
}

fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let panels = PanelLayout::compute(u32::from(area.width), u32::from(area.height));

    render_board(f, to_rect(area, panels.main), app);
    render_status(f, to_rect(area, panels.bottom), app);
    render_legend(f, to_rect(area, panels.left));
    render_selection(f, to_rect(area, panels.right), app);
}

/// Draws rescaled quads onto a braille canvas. Canvas y grows upwards.
struct CanvasPainter<'a, 'b> {
    ctx: &'a mut Context<'b>,
    height: f64,
    selected: Option<GridPos>,
}

impl CanvasPainter<'_, '_> {
    fn line(&mut self, a: (f64, f64), b: (f64, f64), color: Color) {
        self.ctx.draw(&CanvasLine::new(a.0, self.height - a.1, b.0, self.height - b.1, color));
    }
}

impl QuadSink for CanvasPainter<'_, '_> {
    fn fill_quad(&mut self, cell: &RenderCell) {
        let color = fill_color(cell.cell_type, cell.occupied);
        let rows = fill_rows(cell.size.height, self.height);
        for i in 0..=rows {
            let t = i as f64 / rows as f64;
            let half = cell.size.width / 2.0 * (1.0 - (2.0 * t - 1.0).abs());
            let y = cell.top.y + t * cell.size.height;
            self.line((cell.top.x - half, y), (cell.top.x + half, y), color);
        }
    }

    fn outline_quad(&mut self, cell: &RenderCell) {
        let color = if self.selected == Some(cell.pos) {
            Color::Cyan
        } else {
            Color::Gray
        };
        let (w, h) = (cell.size.width / 2.0, cell.size.height / 2.0);
        let top = (cell.top.x, cell.top.y);
        let right = (cell.top.x + w, cell.top.y + h);
        let bottom = (cell.top.x, cell.top.y + 2.0 * h);
        let left = (cell.top.x - w, cell.top.y + h);
        self.line(top, right, color);
        self.line(right, bottom, color);
        self.line(bottom, left, color);
        self.line(left, top, color);
    }
}

/// Scanlines for a quad `height` dots tall. More lines than the canvas has dots draw nothing new.
fn fill_rows(height: f64, canvas_height: f64) -> usize {
    height.min(canvas_height).ceil().max(1.0) as usize
}

const fn fill_color(cell_type: CellType, occupied: bool) -> Color {
    match cell_type {
        CellType::Walkable if occupied => Color::Yellow,
        CellType::Walkable => Color::Green,
        CellType::Empty => Color::DarkGray,
        CellType::Obstacle => Color::Red,
        CellType::NotRendered => Color::Reset,
    }
}

fn render_board(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.title));
    let inner = block.inner(area);
    let viewport = Viewport::new(f64::from(inner.width) * DOTS_X, f64::from(inner.height) * DOTS_Y);

    if !viewport.is_valid() {
        app.canvas = None;
        f.render_widget(block, area);
        return;
    }
    app.canvas = Some((viewport, inner));

    let board = &app.board;
    let selected = app.selected;
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, viewport.width])
        .y_bounds([0.0, viewport.height])
        .paint(move |ctx| {
            let mut painter = CanvasPainter {
                ctx,
                height: viewport.height,
                selected,
            };
            if let Err(e) = draw_board(board, viewport, &mut painter) {
                tracing::warn!(error = %e, "board draw failed");
            }
        });

    f.render_widget(canvas, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(
            app.message.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(" click: select | t: cycle type | o: toggle occupied | c: clear | q: quit "),
    ];
    let status = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Status "))
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}

fn render_legend(f: &mut Frame, area: Rect) {
    let entries = [
        (CellType::Walkable, false),
        (CellType::Walkable, true),
        (CellType::Empty, false),
        (CellType::Obstacle, false),
    ];
    let lines: Vec<Line> = entries
        .iter()
        .map(|&(cell_type, occupied)| {
            let label = if occupied { "OCCUPIED" } else { cell_type.as_str() };
            Line::from(vec![
                Span::styled(
                    format!("{} ", cell_glyph(cell_type, occupied)),
                    Style::default().fg(fill_color(cell_type, occupied)),
                ),
                Span::raw(label),
            ])
        })
        .collect();
    let legend = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Legend "));
    f.render_widget(legend, area);
}

fn render_selection(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    match app.selected.and_then(|pos| app.board.get_cell(pos).map(|cell| (pos, cell))) {
        Some((pos, cell)) => {
            lines.push(Line::from(format!("Cell {pos}")));
            lines.push(Line::from(format!("Type: {}", cell.cell_type.as_str())));
            lines.push(Line::from(format!("Occupied: {}", cell.occupied)));
            lines.push(Line::from(format!("At: ({:.1}, {:.1})", cell.position.x, cell.position.y)));
        }
        None => lines.push(Line::from("nothing selected")),
    }
    if let Some(m) = app.board.metrics() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Tile: {:.1}x{:.1}", m.tile.width, m.tile.height)));
        lines.push(Line::from(format!(
            "Ref: {:.0}x{:.0}",
            m.reference_viewport.width, m.reference_viewport.height
        )));
    }
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Selection "))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
