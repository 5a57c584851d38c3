//! One play-through: the ship, enemies, bullets and score.

use std::time::Duration;

use log::{debug, info};

use crate::collision::CollisionSystem;
use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy};
use crate::input::HeldKeys;
use crate::player::{HitOutcome, PlayerController};
use crate::spawn::SpawnManager;

/// Tick rate the configured speeds are expressed against (pixels per tick
/// at 60 Hz).
pub const REFERENCE_TICK_RATE: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// The ship lost its last life this tick.
    Over,
}

#[derive(Debug)]
pub struct GameSession {
    player: PlayerController,
    enemies: Vec<Enemy>,
    bullets: Vec<Bullet>,
    spawner: SpawnManager,
    collisions: CollisionSystem,
    score: u32,
    reward: u32,
    population: usize,
    /// Accumulated gameplay time; stands still outside gameplay.
    clock: Duration,
}

impl GameSession {
    /// A session in its reset state.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_spawner(config, SpawnManager::new(config))
    }

    pub fn with_spawner(config: &GameConfig, spawner: SpawnManager) -> Self {
        let mut session = Self {
            player: PlayerController::new(config),
            enemies: Vec::with_capacity(config.enemy.population),
            bullets: Vec::new(),
            spawner,
            collisions: CollisionSystem::new(&config.collision),
            score: 0,
            reward: config.enemy.reward,
            population: config.enemy.population,
            clock: Duration::ZERO,
        };
        session.reset();
        session
    }

    /// Fresh ship with full lives, a full enemy wave, no bullets, zero score.
    pub fn reset(&mut self) {
        self.clock = Duration::ZERO;
        self.score = 0;
        self.bullets.clear();
        self.enemies.clear();
        self.player.reset(self.clock);
        self.spawner.spawn_into(&mut self.enemies, self.population);
        info!("session reset with {} enemies", self.enemies.len());
    }

    /// Advance the simulation by `dt`.
    ///
    /// The ship is always updated so its hide timer can run out, but the
    /// rest of the world only moves while the ship is in play. Collisions
    /// are resolved every tick.
    pub fn update(&mut self, held: HeldKeys, dt: Duration) -> SessionStatus {
        self.clock += dt;
        let ticks = dt.as_secs_f32() * REFERENCE_TICK_RATE;

        self.player.update(held, self.clock, ticks);
        if !self.player.player().hidden {
            self.spawner.step_enemies(&mut self.enemies, ticks);
            self.bullets.retain_mut(|bullet| bullet.step(ticks));
        }

        self.resolve_collisions()
    }

    fn resolve_collisions(&mut self) -> SessionStatus {
        let kills = self
            .collisions
            .bullets_vs_enemies(&mut self.enemies, &mut self.bullets);
        if kills > 0 {
            self.score += self.reward * kills as u32;
            self.spawner.spawn_into(&mut self.enemies, kills);
            debug!("{kills} enemies shot down, score {}", self.score);
        }

        if self.player.player().hidden {
            return SessionStatus::Running;
        }

        let contact = self
            .collisions
            .player_vs_enemies(&self.player.player().entity, &mut self.enemies);
        self.spawner.spawn_into(&mut self.enemies, contact.destroyed);

        let mut status = SessionStatus::Running;
        for _ in 0..contact.hits {
            if self.player.apply_hit(self.clock) == HitOutcome::OutOfLives {
                status = SessionStatus::Over;
            }
        }
        if status == SessionStatus::Over {
            info!("game over, final score {}", self.score);
        }
        status
    }

    /// Fire if the ship is able to; see [`PlayerController::shoot`].
    pub fn shoot(&mut self) -> bool {
        self.player.shoot(self.clock, &mut self.bullets)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.player.player().lives
    }

    /// Gameplay time since the last reset.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Number of enemies the session keeps alive.
    pub fn population(&self) -> usize {
        self.population
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.bullets
    }
}
