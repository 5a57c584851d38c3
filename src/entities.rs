//! Game entities: one positional core shared by the player, enemies and
//! bullets, plus the per-kind motion rules.

use std::time::Duration;

use rand::Rng;

use crate::display::Sprite;
use crate::geometry::{Rect, Vec2};
use crate::spawn::SpawnArea;

// ── Shape ─────────────────────────────────────────────────────────────────────

/// Collision shape, centred on the entity position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Box { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl Shape {
    pub fn size(&self) -> (f32, f32) {
        match *self {
            Shape::Box { width, height } => (width, height),
            Shape::Circle { radius } => (radius * 2.0, radius * 2.0),
        }
    }

    /// Radius of the smallest circle enclosing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Box { width, height } => 0.5 * width.hypot(height),
            Shape::Circle { radius } => radius,
        }
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Centre of the shape.
    pub pos: Vec2,
    /// Pixels per reference tick.
    pub vel: Vec2,
    shape: Shape,
}

impl Entity {
    pub fn new(pos: Vec2, shape: Shape) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            shape,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Axis-aligned bounds of the shape.
    pub fn bounds(&self) -> Rect {
        let (width, height) = self.shape.size();
        Rect::from_center(self.pos, width, height)
    }

    /// Advance by `dt` reference ticks.
    pub fn step(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Exact overlap between the two shapes. Boxes that merely touch along
    /// an edge do not overlap.
    pub fn overlaps(&self, other: &Entity) -> bool {
        match (self.shape, other.shape) {
            (
                Shape::Box {
                    width: w1,
                    height: h1,
                },
                Shape::Box {
                    width: w2,
                    height: h2,
                },
            ) => {
                let d = other.pos - self.pos;
                d.x.abs() < (w1 + w2) / 2.0 && d.y.abs() < (h1 + h2) / 2.0
            }
            (Shape::Circle { radius: r1 }, Shape::Circle { radius: r2 }) => {
                circles_touch(self.pos, r1, other.pos, r2)
            }
            (Shape::Box { .. }, Shape::Circle { radius }) => {
                box_touches_circle(self.bounds(), other.pos, radius)
            }
            (Shape::Circle { radius }, Shape::Box { .. }) => {
                box_touches_circle(other.bounds(), self.pos, radius)
            }
        }
    }

    /// Overlap of the bounding circles with both radii multiplied by `ratio`.
    pub fn overlaps_scaled(&self, other: &Entity, ratio: f32) -> bool {
        circles_touch(
            self.pos,
            self.shape.bounding_radius() * ratio,
            other.pos,
            other.shape.bounding_radius() * ratio,
        )
    }
}

fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    (b - a).length_squared() <= reach * reach
}

fn box_touches_circle(rect: Rect, center: Vec2, radius: f32) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.x, rect.right()),
        center.y.clamp(rect.y, rect.bottom()),
    );
    (center - closest).length_squared() <= radius * radius
}

/// Anything the renderer can draw.
pub trait Body {
    fn entity(&self) -> &Entity;
    fn sprite(&self) -> Sprite;
    fn is_visible(&self) -> bool {
        true
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// The ship. Timestamps are session time, see [`crate::session::GameSession`].
#[derive(Clone, Debug)]
pub struct Player {
    pub entity: Entity,
    pub lives: u32,
    /// Hidden players take no input, cannot shoot and cannot be hit.
    pub hidden: bool,
    pub hidden_at: Duration,
    pub last_shot: Duration,
}

impl Body for Player {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn sprite(&self) -> Sprite {
        Sprite::Player
    }

    fn is_visible(&self) -> bool {
        !self.hidden
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub entity: Entity,
}

impl Enemy {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    /// Move by `dt` ticks. An enemy that drifted out of the play area is
    /// recycled: it is moved to a fresh random spawn point above the screen
    /// with a fresh vertical speed, keeping its horizontal speed.
    ///
    /// Returns `true` when the enemy was recycled.
    pub fn step(&mut self, dt: f32, area: &SpawnArea, rng: &mut impl Rng) -> bool {
        self.entity.step(dt);
        if !area.has_exited(&self.entity.bounds()) {
            return false;
        }
        self.entity.pos = area.roll_position(rng, self.entity.shape());
        self.entity.vel.y = area.roll_speed_y(rng);
        true
    }
}

impl Body for Enemy {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn sprite(&self) -> Sprite {
        Sprite::Enemy
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub entity: Entity,
}

impl Bullet {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    /// Move by `dt` ticks. Returns `false` once the bullet is entirely above
    /// the top of the screen.
    pub fn step(&mut self, dt: f32) -> bool {
        self.entity.step(dt);
        self.entity.bounds().bottom() >= 0.0
    }
}

impl Body for Bullet {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn sprite(&self) -> Sprite {
        Sprite::Bullet
    }
}
