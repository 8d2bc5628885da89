//! Crossterm terminal driver for pathviz.
//!
//! Provides a [`TerminalDriver`] that puts the terminal into raw mode on the
//! alternate screen, decodes keyboard and mouse input into [`Msg`]s, and
//! draws a [`Grid`] with only the cells that changed since the last frame.
//!
//! Each grid cell is two terminal columns wide and one row tall, so cells
//! come out roughly square.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{CellState, Color, Grid, GridError, Point, map_point_to_cell};

/// Terminal columns per grid cell.
pub const CELL_COLUMNS: i32 = 2;

/// A key press the application cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
}

/// Mouse button semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Left button pressed or dragged.
    Main,
    /// Right button pressed or dragged.
    Secondary,
}

/// Decoded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Key(Key),
    /// A mouse action over grid cell `cell`.
    Mouse { action: MouseAction, cell: Point },
    /// The terminal was resized; everything must be redrawn.
    Resize,
}

impl Msg {
    /// `q` or `Esc`.
    pub fn is_quit(&self) -> bool {
        matches!(self, Msg::Key(Key::Escape) | Msg::Key(Key::Char('q')))
    }
}

/// Maps a pathviz [`Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Map a terminal position to the grid cell drawn there.
///
/// The terminal is treated as a square pixel surface of `rows * 2` pixels a
/// side, with a terminal cell at column `c`, row `r` covering pixel
/// `(c, r * 2)`.
pub fn terminal_to_cell(pos: Point, rows: i32) -> Result<Point, GridError> {
    let pixel = Point::new(pos.x, pos.y * 2);
    map_point_to_cell(pixel, rows, rows * CELL_COLUMNS)
}

/// Decode one crossterm event for a grid of `rows` rows. Mouse events
/// outside the grid and unhandled keys yield `None`.
pub fn decode(ev: Event, rows: i32) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            to_key(code).map(Msg::Key)
        }
        Event::Mouse(me) => {
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    MouseAction::Main
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => MouseAction::Secondary,
                _ => return None,
            };
            let pos = Point::new(i32::from(me.column), i32::from(me.row));
            match terminal_to_cell(pos, rows) {
                Ok(cell) => Some(Msg::Mouse { action, cell }),
                Err(e) => {
                    log::debug!("input: ignoring click at {pos}: {e}");
                    None
                }
            }
        }
        Event::Resize(..) => Some(Msg::Resize),
        _ => None,
    }
}

/// A styled status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub fg: Color,
}

/// A terminal back-end for pathviz using crossterm.
///
/// Output goes to any [`Write`]r; only [`init`](Self::init) and
/// [`close`](Self::close) touch the real terminal modes.
pub struct TerminalDriver<W: Write = io::Stdout> {
    out: W,
    rows: i32,
    mouse_enabled: bool,
    drawn: Vec<Option<Color>>,
}

impl TerminalDriver<io::Stdout> {
    /// Create a driver drawing a `rows x rows` grid to stdout.
    pub fn new(rows: i32) -> Self {
        Self::with_writer(io::stdout(), rows)
    }
}

impl<W: Write> TerminalDriver<W> {
    pub fn with_writer(out: W, rows: i32) -> Self {
        Self {
            out,
            rows,
            mouse_enabled: true,
            drawn: Vec::new(),
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Enter raw mode and the alternate screen. If the screen cannot be
    /// set up, the terminal is restored before the error is returned.
    pub fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        if let Err(e) = self.enter_screen() {
            log::warn!("terminal: setup failed, restoring: {e}");
            self.close();
            return Err(e.into());
        }
        self.invalidate();
        Ok(())
    }

    fn enter_screen(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(self.out, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    /// Wait up to `timeout` for input, then drain everything queued.
    pub fn poll_msgs(
        &mut self,
        timeout: Duration,
        msgs: &mut Vec<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            if let Some(msg) = decode(event::read()?, self.rows) {
                if msg == Msg::Resize {
                    self.invalidate();
                }
                msgs.push(msg);
            }
        }
        Ok(())
    }

    /// Forget what is on screen so the next [`draw_grid`](Self::draw_grid)
    /// repaints every cell.
    pub fn invalidate(&mut self) {
        self.drawn.clear();
    }

    /// Draw the cells of `grid` whose colour changed since the last call.
    pub fn draw_grid<P>(&mut self, grid: &Grid, palette: P) -> Result<(), Box<dyn std::error::Error>>
    where
        P: Fn(CellState) -> Color,
    {
        if self.drawn.len() != grid.len() {
            self.drawn = vec![None; grid.len()];
            queue!(self.out, terminal::Clear(ClearType::All))?;
        }
        let mut changed = 0usize;
        for (i, (p, state)) in grid.iter().enumerate() {
            let color = palette(state);
            if self.drawn[i] == Some(color) {
                continue;
            }
            self.drawn[i] = Some(color);
            changed += 1;
            queue!(
                self.out,
                cursor::MoveTo((p.x * CELL_COLUMNS) as u16, p.y as u16),
                SetBackgroundColor(to_ct_color(color)),
                Print("  ")
            )?;
        }
        if changed > 0 {
            queue!(self.out, ResetColor)?;
            self.out.flush()?;
        }
        log::trace!("draw: {changed} cells changed");
        Ok(())
    }

    /// Draw status lines directly below the grid, clearing each line first.
    pub fn draw_status(&mut self, lines: &[StatusLine]) -> Result<(), Box<dyn std::error::Error>> {
        for (i, line) in lines.iter().enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(0, (self.rows + i as i32) as u16),
                terminal::Clear(ClearType::UntilNewLine),
                SetForegroundColor(to_ct_color(line.fg)),
                Print(&line.text),
                ResetColor
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn close(&mut self) {
        if self.mouse_enabled {
            let _ = execute!(self.out, event::DisableMouseCapture);
        }
        let _ = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
