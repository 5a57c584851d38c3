//! Terminal back end. All crossterm output lives here.
//!
//! The game thinks in an 800×600 pixel screen; [`Viewport`] maps that onto
//! whatever grid of character cells the terminal currently has.

use std::collections::HashMap;
use std::io::{self, stdout, Write};

use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Attribute, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use log::{debug, warn};

use super::{Color, Sprite, Surface};
use crate::geometry::{Rect, Vec2};

/// Text at or above this size is drawn bold.
const HEADLINE_SIZE: u16 = 48;
const PLACEHOLDER: &str = "▒";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Mapping between screen pixels and terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, width: f32, height: f32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            width,
            height,
        }
    }

    /// Viewport over the terminal's current size.
    pub fn current(width: f32, height: f32) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(cols, rows, width, height))
    }

    /// Cell containing `point`, or `None` when it is off screen.
    pub fn to_cell(&self, point: Vec2) -> Option<(u16, u16)> {
        let col = (point.x / self.width * f32::from(self.cols)).floor();
        let row = (point.y / self.height * f32::from(self.rows)).floor();
        if col < 0.0 || row < 0.0 || col >= f32::from(self.cols) || row >= f32::from(self.rows) {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Cells covered by `rect` as `(col0, row0, col1, row1)`, inclusive and
    /// clipped to the grid. `None` when nothing of it is on screen.
    pub fn cell_span(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        let (cols, rows) = (f32::from(self.cols), f32::from(self.rows));
        let col = |x: f32| x * cols / self.width;
        let row = |y: f32| y * rows / self.height;
        // The far edges are exclusive: a rect ending exactly on a cell
        // boundary does not spill into the next cell.
        let c0 = col(rect.x).floor().max(0.0);
        let r0 = row(rect.y).floor().max(0.0);
        let c1 = (col(rect.right()).ceil() - 1.0).min(cols - 1.0);
        let r1 = (row(rect.bottom()).ceil() - 1.0).min(rows - 1.0);
        if c1 < c0 || r1 < r0 {
            return None;
        }
        Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
    }

    /// Centre of the cell in screen pixels.
    pub fn to_point(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (f32::from(col) + 0.5) * self.width / f32::from(self.cols),
            (f32::from(row) + 0.5) * self.height / f32::from(self.rows),
        )
    }
}

// ── Sprite art ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Art {
    pub lines: Vec<&'static str>,
    pub color: Color,
}

fn builtin_art() -> HashMap<Sprite, Art> {
    HashMap::from([
        (
            // ▲      tip
            // /█\    fuselage + wings
            Sprite::Player,
            Art {
                lines: vec!["▲", "/█\\"],
                color: Color::WHITE,
            },
        ),
        (
            // «▼»    swept-back wings
            // ╚═╝    engine block
            Sprite::Enemy,
            Art {
                lines: vec!["«▼»", "╚═╝"],
                color: Color::LIGHT_GREEN,
            },
        ),
        (
            Sprite::Bullet,
            Art {
                lines: vec!["║"],
                color: Color::RED,
            },
        ),
        (
            Sprite::LifeIcon,
            Art {
                lines: vec!["♥"],
                color: Color::SOFT_RED,
            },
        ),
    ])
}

fn term_color(color: Color) -> style::Color {
    // Translucent fills are blended against the black background.
    let scale = |c: u8| (u16::from(c) * u16::from(color.a) / 255) as u8;
    style::Color::Rgb {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    viewport: Viewport,
    follow_terminal: bool,
    art: HashMap<Sprite, Art>,
}

impl TerminalSurface<io::BufWriter<io::Stdout>> {
    /// Surface over stdout that tracks terminal resizes.
    pub fn stdout(width: f32, height: f32) -> io::Result<Self> {
        let viewport = Viewport::current(width, height)?;
        let mut surface = Self::with_viewport(io::BufWriter::new(stdout()), viewport);
        surface.follow_terminal = true;
        Ok(surface)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Surface with a fixed grid, e.g. for writing into a buffer.
    pub fn with_viewport(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            viewport,
            follow_terminal: false,
            art: builtin_art(),
        }
    }

    /// Remove the art for `sprite`; it will be drawn as a placeholder.
    pub fn without_art(mut self, sprite: Sprite) -> Self {
        self.art.remove(&sprite);
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_centered(&mut self, text: &str, col: u16, row: u16) -> io::Result<()> {
        let half = (text.chars().count() as u16) / 2;
        self.out.queue(cursor::MoveTo(col.saturating_sub(half), row))?;
        self.out.queue(Print(text))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> io::Result<()> {
        if self.follow_terminal {
            let current = Viewport::current(self.viewport.width, self.viewport.height)?;
            if current != self.viewport {
                debug!("terminal resized to {}x{}", current.cols, current.rows);
                self.viewport = current;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()> {
        let Some((col, row)) = self.viewport.to_cell(rect.center()) else {
            return Ok(());
        };
        let (lines, color) = match self.art.get(&sprite) {
            Some(art) => (art.lines.clone(), art.color),
            None => {
                warn!("no art for {sprite:?}, drawing placeholder");
                (vec![PLACEHOLDER], Color::GREY)
            }
        };

        // Art is centred on the sprite's centre cell.
        let top = row.saturating_sub((lines.len() as u16).saturating_sub(1) / 2);
        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        for (i, line) in lines.iter().enumerate() {
            let r = top + i as u16;
            if r >= self.viewport.rows {
                break;
            }
            self.print_centered(line, col, r)?;
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, size: u16, anchor: Vec2, color: Color) -> io::Result<()> {
        let Some((col, row)) = self.viewport.to_cell(anchor) else {
            return Ok(());
        };
        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        if size >= HEADLINE_SIZE {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        self.print_centered(text, col, row)?;
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        let Some((c0, r0, c1, r1)) = self.viewport.cell_span(rect) else {
            return Ok(());
        };

        let blank = " ".repeat(usize::from(c1 - c0) + 1);
        self.out.queue(style::SetBackgroundColor(term_color(color)))?;
        for row in r0..=r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&blank))?;
        }
        self.out.queue(style::ResetColor)?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.viewport.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

// ── Terminal session ──────────────────────────────────────────────────────────

/// Puts the terminal into game mode and restores it on drop, including when
/// the game loop bails out with an error.
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(EnableMouseCapture)?;

        // Request key-release (and key-repeat) events from the terminal.
        // Kitty-protocol terminals support this; others fall back to the
        // hold window in `TerminalInput`.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        debug!("terminal ready, keyboard enhancement: {keyboard_enhanced}");
        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(DisableMouseCapture);
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
