//! Enemy spawning.
//!
//! All randomness in a session flows through the [`SpawnManager`]'s RNG, so a
//! fixed `seed` in the config replays the same waves.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EnemyConfig, GameConfig, SpawnRange};
use crate::entities::{Enemy, Entity, Shape};
use crate::geometry::{Rect, Vec2};

// Out-of-bounds slack before an enemy is recycled.
const EXIT_MARGIN_BOTTOM: f32 = 10.0;
const EXIT_MARGIN_LEFT: f32 = 25.0;
const EXIT_MARGIN_RIGHT: f32 = 20.0;

fn roll(rng: &mut impl Rng, range: SpawnRange) -> f32 {
    rng.gen_range(range.min..range.max) as f32
}

/// Where enemies appear and when they count as having left the screen.
#[derive(Clone, Debug)]
pub struct SpawnArea {
    screen_width: f32,
    screen_height: f32,
    spawn_y: SpawnRange,
    speed_y: SpawnRange,
    speed_x: SpawnRange,
}

impl SpawnArea {
    pub fn new(config: &GameConfig) -> Self {
        let EnemyConfig {
            spawn_y,
            speed_y,
            speed_x,
            ..
        } = config.enemy;
        Self {
            screen_width: config.screen.width,
            screen_height: config.screen.height,
            spawn_y,
            speed_y,
            speed_x,
        }
    }

    /// A random centre for `shape`: left edge in `[0, width - shape width)`,
    /// top edge in the configured `spawn_y` range, both whole pixels.
    pub fn roll_position(&self, rng: &mut impl Rng, shape: Shape) -> Vec2 {
        let (width, height) = shape.size();
        // Config validation guarantees room for the configured enemy; shapes
        // wider than the screen still get the single column at x = 0.
        let span = ((self.screen_width - width) as i32).max(1);
        let left = rng.gen_range(0..span) as f32;
        let top = roll(rng, self.spawn_y);
        Vec2::new(left + width / 2.0, top + height / 2.0)
    }

    pub fn roll_speed_y(&self, rng: &mut impl Rng) -> f32 {
        roll(rng, self.speed_y)
    }

    pub fn roll_speed_x(&self, rng: &mut impl Rng) -> f32 {
        roll(rng, self.speed_x)
    }

    /// True once `bounds` is below the bottom or past either side.
    pub fn has_exited(&self, bounds: &Rect) -> bool {
        bounds.y > self.screen_height + EXIT_MARGIN_BOTTOM
            || bounds.x < -EXIT_MARGIN_LEFT
            || bounds.right() > self.screen_width + EXIT_MARGIN_RIGHT
    }
}

/// Creates enemies and moves the live ones.
#[derive(Debug)]
pub struct SpawnManager {
    area: SpawnArea,
    shape: Shape,
    rng: StdRng,
}

impl SpawnManager {
    /// Seeded from `config.seed`, or from the OS when unset.
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            area: SpawnArea::new(config),
            shape: Shape::Box {
                width: config.enemy.width,
                height: config.enemy.height,
            },
            rng,
        }
    }

    pub fn area(&self) -> &SpawnArea {
        &self.area
    }

    pub fn spawn_enemy(&mut self) -> Enemy {
        let pos = self.area.roll_position(&mut self.rng, self.shape);
        let vel = Vec2::new(
            self.area.roll_speed_x(&mut self.rng),
            self.area.roll_speed_y(&mut self.rng),
        );
        debug!("spawned enemy at ({:.0}, {:.0}) moving ({}, {})", pos.x, pos.y, vel.x, vel.y);
        Enemy::new(Entity::new(pos, self.shape).with_velocity(vel))
    }

    /// Push `count` fresh enemies.
    pub fn spawn_into(&mut self, enemies: &mut Vec<Enemy>, count: usize) {
        enemies.extend((0..count).map(|_| self.spawn_enemy()));
    }

    /// Step every enemy by `dt` ticks, recycling those that left the screen.
    /// Returns how many were recycled.
    pub fn step_enemies(&mut self, enemies: &mut [Enemy], dt: f32) -> usize {
        let mut recycled = 0;
        for enemy in enemies.iter_mut() {
            if enemy.step(dt, &self.area, &mut self.rng) {
                recycled += 1;
            }
        }
        if recycled > 0 {
            trace!("recycled {recycled} enemies");
        }
        recycled
    }
}
