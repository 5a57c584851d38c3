//! Rendering contract.
//!
//! The game draws through [`Surface`] only; it never knows whether pixels,
//! terminal cells or a test recorder sit behind it.

mod terminal;

pub use terminal::{TerminalGuard, TerminalSurface, Viewport};

use std::io;

use crate::geometry::{Rect, Vec2};

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const SOFT_RED: Color = Color::rgb(255, 100, 100);
    pub const GREEN: Color = Color::rgb(0, 155, 0);
    pub const LIGHT_GREEN: Color = Color::rgb(0, 255, 0);
    pub const GREY: Color = Color::rgb(200, 200, 200);
    pub const DARK_GREY: Color = Color::rgb(100, 100, 100);
    /// Translucent overlay for paused screens. Tinted so it still shows on
    /// a black background.
    pub const DIM: Color = Color::rgba(60, 60, 90, 150);
}

/// Images the game asks for. A surface without art for one must draw a
/// placeholder rather than fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Enemy,
    Bullet,
    /// Small ship used for the lives counter.
    LifeIcon,
}

pub trait Surface {
    fn clear(&mut self) -> io::Result<()>;
    /// Draw `sprite` scaled into `rect`.
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()>;
    /// Draw `text` horizontally centred on `anchor`, with its top at `anchor.y`.
    fn draw_text(&mut self, text: &str, size: u16, anchor: Vec2, color: Color) -> io::Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;
}
