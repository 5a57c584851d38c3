#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use spaceship_war::config::GameConfig;
use spaceship_war::display::{Color, Sprite, Surface};
use spaceship_war::entities::{Bullet, Enemy, Entity, Shape};
use spaceship_war::geometry::{Rect, Vec2};
use spaceship_war::input::{InputEvent, InputFrame, InputSource, Key};
use spaceship_war::session::GameSession;
use spaceship_war::spawn::SpawnManager;

/// A whole-millisecond step so timer arithmetic stays exact.
pub const STEP: Duration = Duration::from_millis(10);

pub fn config() -> GameConfig {
    GameConfig {
        seed: Some(42),
        ..GameConfig::default()
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn session() -> GameSession {
    let config = config();
    GameSession::with_spawner(&config, SpawnManager::with_rng(&config, seeded_rng()))
}

/// A session with no enemies, ready for hand-placed scenarios.
pub fn empty_session() -> GameSession {
    let mut s = session();
    s.enemies_mut().clear();
    s
}

pub fn still_enemy(x: f32, y: f32, shape: Shape) -> Enemy {
    Enemy::new(Entity::new(Vec2::new(x, y), shape))
}

pub fn box_enemy(x: f32, y: f32) -> Enemy {
    still_enemy(x, y, Shape::Box { width: 50.0, height: 40.0 })
}

pub fn bullet_at(x: f32, y: f32, vy: f32) -> Bullet {
    Bullet::new(
        Entity::new(Vec2::new(x, y), Shape::Box { width: 5.0, height: 15.0 })
            .with_velocity(Vec2::new(0.0, vy)),
    )
}

pub fn key(k: Key) -> InputEvent {
    InputEvent::KeyDown(k)
}

// ── Recording surface ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Sprite(Sprite, Rect),
    Text(String, u16, Vec2, Color),
    Fill(Rect, Color),
    Present,
}

#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Calls of the most recent frame only.
    pub fn last_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .unwrap_or(0);
        &self.calls[start..]
    }

    pub fn texts(&self) -> Vec<String> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t, ..) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn sprite_count(&self, sprite: Sprite) -> usize {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCall::Sprite(s, _) if *s == sprite))
            .count()
    }

    pub fn frames(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Present).count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) -> io::Result<()> {
        self.calls.push(DrawCall::Clear);
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()> {
        self.calls.push(DrawCall::Sprite(sprite, rect));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, size: u16, anchor: Vec2, color: Color) -> io::Result<()> {
        self.calls.push(DrawCall::Text(text.to_string(), size, anchor, color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        self.calls.push(DrawCall::Fill(rect, color));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }
}

// ── Scripted input ────────────────────────────────────────────────────────────

/// Replays queued frames, then reports empty ones.
#[derive(Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<InputFrame> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

/// Input source whose terminal went away.
pub struct BrokenInput;

impl InputSource for BrokenInput {
    fn poll(&mut self) -> io::Result<InputFrame> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
    }
}
