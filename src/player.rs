//! The player's ship: movement, shooting and the hit/hide cycle.
//!
//! Timers compare session time stamps against thresholds every tick; nothing
//! is scheduled.

use std::time::Duration;

use log::{debug, info};

use crate::config::{BulletConfig, GameConfig, PlayerConfig, ScreenConfig};
use crate::entities::{Bullet, Entity, Player, Shape};
use crate::geometry::Vec2;
use crate::input::HeldKeys;

/// How far below the screen a hidden ship is parked.
const HIDE_OFFSET: f32 = 200.0;

/// Result of [`PlayerController::apply_hit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Lives remain; the ship is hidden until the unhide delay passes.
    Hidden,
    /// That was the last life. Ending the session is up to the caller.
    OutOfLives,
}

#[derive(Debug)]
pub struct PlayerController {
    player: Player,
    config: PlayerConfig,
    bullet: BulletConfig,
    screen: ScreenConfig,
}

impl PlayerController {
    pub fn new(config: &GameConfig) -> Self {
        let mut controller = Self {
            player: Player {
                entity: Entity::new(
                    Vec2::ZERO,
                    Shape::Box {
                        width: config.player.width,
                        height: config.player.height,
                    },
                ),
                lives: config.player.lives,
                hidden: false,
                hidden_at: Duration::ZERO,
                last_shot: Duration::ZERO,
            },
            config: config.player.clone(),
            bullet: config.bullet.clone(),
            screen: config.screen.clone(),
        };
        controller.reset(Duration::ZERO);
        controller
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Centre of the ship at spawn: horizontally centred, bottom edge
    /// `bottom_margin` above the bottom of the screen.
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(
            self.screen.width / 2.0,
            self.screen.height - self.config.bottom_margin - self.config.height / 2.0,
        )
    }

    /// Full lives, visible at the spawn point. The shot cooldown restarts at
    /// `now`, so a fresh ship cannot fire immediately.
    pub fn reset(&mut self, now: Duration) {
        let spawn = self.spawn_point();
        let p = &mut self.player;
        p.entity.pos = spawn;
        p.entity.vel = Vec2::ZERO;
        p.lives = self.config.lives;
        p.hidden = false;
        p.hidden_at = now;
        p.last_shot = now;
    }

    /// Unhide when due, then steer from the held keys and clamp to the
    /// screen. The ship never moves vertically.
    pub fn update(&mut self, held: HeldKeys, now: Duration, dt: f32) {
        let unhide_delay = Duration::from_millis(self.config.unhide_delay_ms);
        if self.player.hidden && now.saturating_sub(self.player.hidden_at) >= unhide_delay {
            self.player.hidden = false;
            self.player.entity.pos = self.spawn_point();
            debug!("player back in play at {:?}", now);
        }

        let p = &mut self.player;
        if p.hidden {
            p.entity.vel = Vec2::ZERO;
            return;
        }

        // Right wins when both directions are held.
        let vx = if held.right {
            self.config.speed
        } else if held.left {
            -self.config.speed
        } else {
            0.0
        };
        p.entity.vel = Vec2::new(vx, 0.0);
        p.entity.step(dt);

        let half = self.config.width / 2.0;
        p.entity.pos.x = p.entity.pos.x.clamp(half, self.screen.width - half);
    }

    /// Fire from the top centre of the ship into `bullets`.
    ///
    /// Returns `false` without firing while hidden or while the cooldown
    /// since the last shot has not elapsed.
    pub fn shoot(&mut self, now: Duration, bullets: &mut Vec<Bullet>) -> bool {
        let p = &mut self.player;
        if p.hidden {
            return false;
        }
        let cooldown = Duration::from_millis(self.config.shoot_cooldown_ms);
        if now.saturating_sub(p.last_shot) < cooldown {
            return false;
        }

        let top = p.entity.bounds().y;
        let pos = Vec2::new(p.entity.pos.x, top - self.bullet.height / 2.0);
        let shape = Shape::Box {
            width: self.bullet.width,
            height: self.bullet.height,
        };
        bullets.push(Bullet::new(
            Entity::new(pos, shape).with_velocity(Vec2::new(0.0, -self.bullet.speed)),
        ));
        p.last_shot = now;
        true
    }

    /// Take one life. With lives left the ship is hidden off screen, see
    /// [`HitOutcome`].
    pub fn apply_hit(&mut self, now: Duration) -> HitOutcome {
        let p = &mut self.player;
        p.lives = p.lives.saturating_sub(1);
        if p.lives == 0 {
            info!("player lost the last life");
            return HitOutcome::OutOfLives;
        }

        info!("player hit, {} lives left", p.lives);
        p.hidden = true;
        p.hidden_at = now;
        p.entity.vel = Vec2::ZERO;
        p.entity.pos = Vec2::new(self.screen.width / 2.0, self.screen.height + HIDE_OFFSET);
        HitOutcome::Hidden
    }
}
