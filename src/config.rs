//! Game configuration.
//!
//! Every tunable the simulation depends on lives here. Values are read from
//! an optional RON file where any missing field falls back to the defaults
//! below, so an empty `()` file is a valid configuration.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::ConfigError;

// ── Screen ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

// ── Spawn ranges ──────────────────────────────────────────────────────────────

/// Half-open integer range `[min, max)` sampled uniformly.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SpawnRange {
    pub min: i32,
    pub max: i32,
}

impl SpawnRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..self.max).contains(&value)
    }
}

impl Default for SpawnRange {
    fn default() -> Self {
        Self { min: 0, max: 1 }
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed in pixels per reference tick.
    pub speed: f32,
    /// Gap between the ship's bottom edge and the screen bottom at spawn.
    pub bottom_margin: f32,
    pub lives: u32,
    pub shoot_cooldown_ms: u64,
    pub unhide_delay_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 50.0,
            speed: 7.0,
            bottom_margin: 20.0,
            lives: 3,
            shoot_cooldown_ms: 250,
            unhide_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    /// Number of enemies kept alive during a session.
    pub population: usize,
    /// Score awarded per enemy shot down.
    pub reward: u32,
    /// Top edge at spawn.
    pub spawn_y: SpawnRange,
    pub speed_y: SpawnRange,
    pub speed_x: SpawnRange,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 40.0,
            population: 8,
            reward: 50,
            spawn_y: SpawnRange::new(-100, -40),
            speed_y: SpawnRange::new(2, 5),
            speed_x: SpawnRange::new(-2, 2),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BulletConfig {
    pub width: f32,
    pub height: f32,
    /// Upward speed in pixels per reference tick.
    pub speed: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 5.0,
            height: 15.0,
            speed: 10.0,
        }
    }
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// How many lives a single tick may cost when several enemies touch the
/// player at once.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPolicy {
    /// Every overlapping enemy costs a life.
    #[default]
    PerOverlap,
    /// All overlapping enemies are destroyed but only one life is lost.
    OncePerTick,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CollisionConfig {
    /// Radius multiplier for the player↔enemy test.
    pub player_hit_ratio: f32,
    pub hit_policy: HitPolicy,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            player_hit_ratio: 0.7,
            hit_policy: HitPolicy::PerOverlap,
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    /// Target ticks per second of the game loop.
    pub tick_rate: u32,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub bullet: BulletConfig,
    pub collision: CollisionConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            tick_rate: 60,
            seed: None,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            bullet: BulletConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a configuration from RON text.
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse the RON file at `path`. The result is not validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&text, path)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`GameConfig::load`], but a missing file yields the defaults.
    /// Parse errors and other read failures are still reported.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Reject values the simulation cannot run with. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let screen = &self.screen;
        if !(screen.width > 0.0 && screen.height > 0.0) {
            return Err(ConfigError::invalid(
                "screen",
                format!("{}x{} is not a positive size", screen.width, screen.height),
            ));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::invalid("tick_rate", "must be at least 1"));
        }

        let player = &self.player;
        if !(player.width > 0.0 && player.height > 0.0) {
            return Err(ConfigError::invalid("player", "size must be positive"));
        }
        if player.width > screen.width {
            return Err(ConfigError::invalid(
                "player.width",
                format!("{} exceeds screen width {}", player.width, screen.width),
            ));
        }
        if player.lives == 0 {
            return Err(ConfigError::invalid("player.lives", "must be at least 1"));
        }
        if !player.speed.is_finite() || player.speed < 0.0 {
            return Err(ConfigError::invalid("player.speed", "must be finite and non-negative"));
        }

        let enemy = &self.enemy;
        if enemy.population == 0 {
            return Err(ConfigError::invalid("enemy.population", "must be at least 1"));
        }
        if !(enemy.width > 0.0 && enemy.height > 0.0) {
            return Err(ConfigError::invalid("enemy", "size must be positive"));
        }
        // Spawn x is drawn from [0, width - enemy.width) in whole pixels.
        if (screen.width - enemy.width) < 1.0 {
            return Err(ConfigError::invalid(
                "enemy.width",
                format!("{} leaves no room on a {} wide screen", enemy.width, screen.width),
            ));
        }
        for (field, range) in [
            ("enemy.spawn_y", enemy.spawn_y),
            ("enemy.speed_y", enemy.speed_y),
            ("enemy.speed_x", enemy.speed_x),
        ] {
            if range.is_empty() {
                return Err(ConfigError::invalid(
                    field,
                    format!("range [{}, {}) is empty", range.min, range.max),
                ));
            }
        }

        let bullet = &self.bullet;
        if !(bullet.width > 0.0 && bullet.height > 0.0) {
            return Err(ConfigError::invalid("bullet", "size must be positive"));
        }
        if !(bullet.speed > 0.0 && bullet.speed.is_finite()) {
            return Err(ConfigError::invalid("bullet.speed", "must be positive"));
        }

        let ratio = self.collision.player_hit_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::invalid(
                "collision.player_hit_ratio",
                format!("{ratio} is outside (0, 1]"),
            ));
        }
        Ok(())
    }
}
