use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event};
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use thiserror::Error;
use tracing::debug;

use crate::assets::Assets;
use crate::config::{CELL_COUNT, CELL_SIZE, OFFSET};
use crate::draw::{DrawCommand, PixelRect, Rgba, DARK_GREEN, GREEN};
use crate::input::{CommandQueue, InputHandler, KeyAction};

// Terminal position of board cell (0, 0). Each cell is two columns wide.
const ORIGIN_COL: i32 = 2;
const ORIGIN_ROW: i32 = 2;

pub const MIN_COLS: u16 = (ORIGIN_COL + 2 * CELL_COUNT + 1) as u16;
pub const MIN_ROWS: u16 = (ORIGIN_ROW + CELL_COUNT + 2) as u16;

const FILL_CHAR: char = '█';

#[derive(Debug, Error)]
pub enum TermError {
    #[error("terminal is {cols}x{rows}, the board needs at least {MIN_COLS}x{MIN_ROWS}", MIN_COLS = MIN_COLS, MIN_ROWS = MIN_ROWS)]
    TooSmall { cols: u16, rows: u16 },
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
}

fn to_col(px: i32) -> i32 {
    ORIGIN_COL + ((px - OFFSET) * 2).div_euclid(CELL_SIZE)
}

fn to_row(py: i32) -> i32 {
    ORIGIN_ROW + (py - OFFSET).div_euclid(CELL_SIZE)
}

/// Character grid that draw commands are rasterized onto.
pub struct Canvas {
    width: u16,
    height: u16,
    background: Rgba,
    cells: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        let blank = Glyph { ch: ' ', fg: DARK_GREEN, bg: GREEN };
        Canvas { width, height, background: GREEN, cells: vec![blank; width as usize * height as usize] }
    }

    pub fn glyph_at(&self, col: u16, row: u16) -> Option<Glyph> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[self.width as usize * row as usize + col as usize])
    }

    pub fn paint(&mut self, commands: &[DrawCommand], assets: &Assets) {
        for command in commands {
            match command {
                DrawCommand::Clear(color) => self.clear(*color),
                DrawCommand::Rect { rect, color, .. } => self.fill(*rect, *color),
                DrawCommand::Outline { rect, color, .. } => self.outline(*rect, *color),
                DrawCommand::Sprite { sprite, x, y } => {
                    // An unknown handle just draws nothing.
                    if let Some(glyph) = assets.sprite(*sprite) {
                        self.text(glyph, *x, *y, DARK_GREEN);
                    }
                }
                DrawCommand::Text { text, x, y, color, .. } => self.text(text, *x, *y, *color),
            }
        }
    }

    fn clear(&mut self, color: Rgba) {
        self.background = color;
        self.cells.fill(Glyph { ch: ' ', fg: color, bg: color });
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Rgba) {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return;
        }
        let i = self.width as usize * row as usize + col as usize;
        self.cells[i] = Glyph { ch, fg, bg: self.background };
    }

    fn fill(&mut self, rect: PixelRect, color: Rgba) {
        for row in to_row(rect.y)..=to_row(rect.y + rect.height - 1) {
            for col in to_col(rect.x)..=to_col(rect.x + rect.width - 1) {
                self.put(col, row, FILL_CHAR, color);
            }
        }
    }

    fn outline(&mut self, rect: PixelRect, color: Rgba) {
        let (left, right) = (to_col(rect.x), to_col(rect.x + rect.width - 1));
        let (top, bottom) = (to_row(rect.y), to_row(rect.y + rect.height - 1));

        for col in left + 1..right {
            self.put(col, top, '─', color);
            self.put(col, bottom, '─', color);
        }
        for row in top + 1..bottom {
            self.put(left, row, '│', color);
            self.put(right, row, '│', color);
        }
        self.put(left, top, '┌', color);
        self.put(right, top, '┐', color);
        self.put(left, bottom, '└', color);
        self.put(right, bottom, '┘', color);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: Rgba) {
        let (col, row) = (to_col(x), to_row(y));
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }
}

/// Owns the terminal: screen setup, keyboard polling and frame output.
pub struct TermManager {
    stdout: Stdout,
    input: InputHandler,
    canvas: Canvas,
    // What is currently on screen; `None` forces a repaint.
    front: Vec<Option<Glyph>>,
    close_requested: bool,
}

impl TermManager {
    pub fn new() -> Result<Self, TermError> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(TermError::TooSmall { cols, rows });
        }

        Ok(TermManager {
            stdout: stdout(),
            input: InputHandler::new(),
            canvas: Canvas::new(cols, rows),
            front: vec![None; cols as usize * rows as usize],
            close_requested: false,
        })
    }

    pub fn setup(&mut self) -> Result<(), TermError> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), TermError> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    /// Moves every pending key press into `commands` without blocking.
    pub fn poll_input(&mut self, commands: &mut CommandQueue) -> Result<(), TermError> {
        while poll(Duration::ZERO)? {
            match read()? {
                Event::Key(key) => match self.input.handle_key_event(key) {
                    KeyAction::Game(command) => commands.push(command),
                    KeyAction::Quit => self.close_requested = true,
                    KeyAction::None => {}
                },
                Event::Resize(cols, rows) => self.resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        debug!(cols, rows, "terminal resized");
        self.canvas = Canvas::new(cols, rows);
        self.front = vec![None; cols as usize * rows as usize];
    }

    /// Rasterizes `commands` and writes out the characters that changed.
    pub fn render(&mut self, commands: &[DrawCommand], assets: &Assets) -> Result<(), TermError> {
        self.canvas.paint(commands, assets);

        let width = self.canvas.width as usize;
        let mut colors: Option<(Rgba, Rgba)> = None;

        for (i, glyph) in self.canvas.cells.iter().enumerate() {
            if self.front[i] == Some(*glyph) {
                continue;
            }

            let (col, row) = ((i % width) as u16, (i / width) as u16);
            queue!(self.stdout, cursor::MoveTo(col, row))?;
            if colors != Some((glyph.fg, glyph.bg)) {
                queue!(
                    self.stdout,
                    SetForegroundColor(rgb(glyph.fg)),
                    SetBackgroundColor(rgb(glyph.bg))
                )?;
                colors = Some((glyph.fg, glyph.bg));
            }
            queue!(self.stdout, Print(glyph.ch))?;
            self.front[i] = Some(*glyph);
        }

        self.stdout.flush()?;
        Ok(())
    }
}

fn rgb(color: Rgba) -> Color {
    Color::Rgb { r: color.0, g: color.1, b: color.2 }
}
