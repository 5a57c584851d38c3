//! Overlap detection between bullets, enemies and the ship.
//!
//! Detection only removes what collided and reports counts; scoring,
//! respawning and lives are applied by the session.

use crate::config::{CollisionConfig, HitPolicy};
use crate::entities::{Bullet, Enemy, Entity};

#[derive(Clone, Copy, Debug)]
pub struct CollisionSystem {
    player_hit_ratio: f32,
    hit_policy: HitPolicy,
}

impl CollisionSystem {
    pub fn new(config: &CollisionConfig) -> Self {
        Self {
            player_hit_ratio: config.player_hit_ratio,
            hit_policy: config.hit_policy,
        }
    }

    /// Pair bullets with enemies they overlap. Each pair consumes exactly one
    /// bullet and one enemy, so an enemy is credited at most once even when
    /// several bullets touch it. Both sides of every pair are removed.
    ///
    /// Returns the number of enemies destroyed.
    pub fn bullets_vs_enemies(&self, enemies: &mut Vec<Enemy>, bullets: &mut Vec<Bullet>) -> usize {
        let mut dead_enemies = vec![false; enemies.len()];
        let mut spent_bullets = vec![false; bullets.len()];

        for (ei, enemy) in enemies.iter().enumerate() {
            let hit = bullets
                .iter()
                .enumerate()
                .position(|(bi, bullet)| !spent_bullets[bi] && bullet.entity.overlaps(&enemy.entity));
            if let Some(bi) = hit {
                dead_enemies[ei] = true;
                spent_bullets[bi] = true;
            }
        }

        retain_unmarked(bullets, &spent_bullets);
        retain_unmarked(enemies, &dead_enemies)
    }

    /// Remove every enemy touching the ship under the tightened circle test
    /// and return how many hits the ship takes for them.
    pub fn player_vs_enemies(&self, player: &Entity, enemies: &mut Vec<Enemy>) -> PlayerContact {
        let before = enemies.len();
        enemies.retain(|enemy| !player.overlaps_scaled(&enemy.entity, self.player_hit_ratio));
        let destroyed = before - enemies.len();
        let hits = match self.hit_policy {
            HitPolicy::PerOverlap => destroyed,
            HitPolicy::OncePerTick => destroyed.min(1),
        };
        PlayerContact { destroyed, hits }
    }
}

/// Outcome of [`CollisionSystem::player_vs_enemies`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerContact {
    /// Enemies removed, each needing a respawn.
    pub destroyed: usize,
    /// Lives to take from the player.
    pub hits: usize,
}

/// Drop the items whose flag is set; returns how many were dropped.
fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) -> usize {
    let before = items.len();
    let mut flags = marked.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
    before - items.len()
}
