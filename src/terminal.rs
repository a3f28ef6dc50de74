//! Console front-end built on crossterm.
//!
//! The world is scaled onto the character grid, with the bottom row kept for
//! a status line. Mouse capture turns left-button presses and drags into
//! pointer events.

use crate::error::AppError;
use crate::graphics::{Cell, CellBuffer};
use crate::input::{Flow, InputEvent};
use crate::math::Vec2;
use crate::render::{render_frame, Canvas, Rgba};
use crate::state::{ModeKind, SceneConfig, SceneState};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use log::{debug, info};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

const DISC_GLYPH: char = '█';
const RAY_GLYPH: char = '·';

/// Raw mode, alternate screen and mouse capture, undone on drop
struct TerminalSession;

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let session = TerminalSession;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Current terminal size as (columns, rows)
fn terminal_size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) => Ok((size.cols, size.rows)),
        None => terminal::size(),
    }
}

/// Maps between world units and character cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMapping {
    scale_x: f64,
    scale_y: f64,
}

impl CellMapping {
    pub fn new(cols: usize, rows: usize, config: &SceneConfig) -> Self {
        CellMapping {
            scale_x: cols as f64 / config.width,
            scale_y: rows as f64 / config.height,
        }
    }

    pub fn to_cell(&self, p: Vec2) -> (f64, f64) {
        (p.x * self.scale_x, p.y * self.scale_y)
    }

    /// World position at the centre of a cell
    pub fn to_world(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f64 + 0.5) / self.scale_x,
            (row as f64 + 0.5) / self.scale_y,
        )
    }
}

/// Canvas that rasterises into a cell buffer and flushes it to stdout
pub struct TerminalCanvas {
    buffer: CellBuffer,
    mapping: CellMapping,
    status: String,
    out: Stdout,
    error: Option<io::Error>,
}

impl TerminalCanvas {
    fn new(cols: u16, rows: u16, config: &SceneConfig) -> Self {
        let (width, height) = (cols as usize, rows.saturating_sub(1) as usize);
        TerminalCanvas {
            buffer: CellBuffer::new(width, height),
            mapping: CellMapping::new(width, height, config),
            status: String::new(),
            out: io::stdout(),
            error: None,
        }
    }

    fn resize(&mut self, cols: u16, rows: u16, config: &SceneConfig) {
        let (width, height) = (cols as usize, rows.saturating_sub(1) as usize);
        debug!("Terminal resized to {}x{}", cols, rows);
        self.buffer.resize(width, height);
        self.mapping = CellMapping::new(width, height, config);
    }

    /// Returns the first write error seen since the last call
    fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut current = None;
        for (row, cells) in self.buffer.rows().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                if current != Some(cell.color) {
                    let Rgba { r, g, b, .. } = cell.color;
                    queue!(self.out, SetForegroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(cell.color);
                }
                queue!(self.out, Print(cell.glyph))?;
            }
        }

        let status: String = self.status.chars().take(self.buffer.width()).collect();
        queue!(
            self.out,
            cursor::MoveTo(0, self.buffer.height() as u16),
            ResetColor,
            terminal::Clear(terminal::ClearType::CurrentLine),
            Print(status)
        )?;
        self.out.flush()
    }
}

impl Canvas for TerminalCanvas {
    fn clear(&mut self, color: Rgba) {
        self.buffer.fill(Cell { glyph: ' ', color });
    }

    fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Rgba) {
        let (x0, y0) = self.mapping.to_cell(p0);
        let (x1, y1) = self.mapping.to_cell(p1);
        self.buffer.draw_line(
            x0,
            y0,
            x1,
            y1,
            Cell {
                glyph: RAY_GLYPH,
                color,
            },
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        let (cx, cy) = self.mapping.to_cell(center);
        let edge = self.mapping.to_cell(Vec2::new(radius, radius));
        self.buffer.fill_ellipse(
            cx,
            cy,
            edge.0,
            edge.1,
            Cell {
                glyph: DISC_GLYPH,
                color,
            },
        );
    }

    fn present(&mut self) {
        if let Err(err) = self.flush() {
            if self.error.is_none() {
                self.error = Some(err);
            }
        }
    }
}

/// Maps a crossterm event to a scene event
pub fn translate_event(event: &Event, mapping: &CellMapping) -> Option<InputEvent> {
    match *event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                Some(InputEvent::SelectMode(ModeKind::Automatic))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => Some(InputEvent::SelectMode(ModeKind::Drag)),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
            _ => None,
        },
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => match kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown),
            MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                Some(InputEvent::PointerMove(mapping.to_world(column, row)))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Collects every event already queued without blocking
fn drain_events(canvas: &mut TerminalCanvas, config: &SceneConfig) -> io::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    while event::poll(Duration::ZERO)? {
        let event = event::read()?;
        if let Event::Resize(cols, rows) = event {
            canvas.resize(cols, rows, config);
        } else if let Some(input) = translate_event(&event, &canvas.mapping) {
            events.push(input);
        }
    }
    Ok(events)
}

fn status_line(state: &SceneState) -> String {
    format!(
        " {} {} | mode: {:?} | light: ({:.0}, {:.0}) | [a] automatic  [d] drag  [q] quit",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        state.mode.kind(),
        state.light_pos.x,
        state.light_pos.y
    )
}

/// Runs the frame loop until the user quits
pub fn run(config: &SceneConfig, initial_mode: ModeKind) -> Result<(), AppError> {
    let (cols, rows) = terminal_size()?;
    info!("Starting terminal front-end at {}x{}", cols, rows);

    let _session = TerminalSession::enter()?;
    let mut canvas = TerminalCanvas::new(cols, rows, config);
    let mut state = SceneState::with_mode(config, initial_mode);

    loop {
        let frame_start = Instant::now();

        let events = drain_events(&mut canvas, config)?;
        let flow = state.advance(config, events);

        canvas.status = status_line(&state);
        render_frame(&state, config, &mut canvas);
        canvas.take_error()?;

        if let Some(remaining) = config.frame_interval.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }

        // Quit takes effect once the current frame is on screen
        if flow == Flow::Quit {
            break;
        }
    }

    info!("Terminal front-end stopped");
    Ok(())
}
