mod support;

use rstest::rstest;

use spaceship_war::config::{GameConfig, SpawnRange};
use spaceship_war::entities::Shape;
use spaceship_war::geometry::Rect;
use spaceship_war::spawn::{SpawnArea, SpawnManager};

use support::{config, seeded_rng, still_enemy};

fn manager() -> SpawnManager {
    SpawnManager::with_rng(&config(), seeded_rng())
}

#[test]
fn spawned_enemies_start_above_the_screen_within_ranges() {
    let mut spawner = manager();
    for _ in 0..500 {
        let enemy = spawner.spawn_enemy();
        let b = enemy.entity.bounds();
        assert_eq!(b.x.fract(), 0.0, "whole-pixel spawn column");
        assert!((0.0..750.0).contains(&b.x));
        assert!((-100.0..-40.0).contains(&b.y));
        assert!(b.bottom() <= 0.0, "fully above the screen");

        let vel = enemy.entity.vel;
        assert!([2.0, 3.0, 4.0].contains(&vel.y), "vy {}", vel.y);
        assert!([-2.0, -1.0, 0.0, 1.0].contains(&vel.x), "vx {}", vel.x);
    }
}

#[test]
fn every_speed_in_range_shows_up() {
    let mut spawner = manager();
    let mut seen = [false; 3];
    for _ in 0..200 {
        let vy = spawner.spawn_enemy().entity.vel.y as usize;
        seen[vy - 2] = true;
    }
    assert_eq!(seen, [true; 3]);
}

#[test]
fn spawn_into_appends() {
    let mut spawner = manager();
    let mut enemies = vec![still_enemy(10.0, 10.0, Shape::Circle { radius: 1.0 })];
    spawner.spawn_into(&mut enemies, 4);
    assert_eq!(enemies.len(), 5);
}

#[test]
fn equal_seeds_replay_equal_waves() {
    let mut a = SpawnManager::new(&config());
    let mut b = SpawnManager::new(&config());
    for _ in 0..20 {
        assert_eq!(a.spawn_enemy(), b.spawn_enemy());
    }
}

#[test]
fn single_value_ranges_are_deterministic() {
    let mut config = config();
    config.enemy.speed_y = SpawnRange::new(3, 4);
    config.enemy.speed_x = SpawnRange::new(0, 1);
    config.enemy.spawn_y = SpawnRange::new(-60, -59);
    let mut spawner = SpawnManager::with_rng(&config, seeded_rng());
    let enemy = spawner.spawn_enemy();
    assert_eq!(enemy.entity.vel.y, 3.0);
    assert_eq!(enemy.entity.vel.x, 0.0);
    assert_eq!(enemy.entity.bounds().y, -60.0);
}

#[test]
fn step_enemies_reports_recycles() {
    let mut spawner = manager();
    let mut enemies = vec![
        support::box_enemy(400.0, 300.0),
        support::box_enemy(400.0, 700.0),
        support::box_enemy(-40.0, 300.0),
    ];
    assert_eq!(spawner.step_enemies(&mut enemies, 1.0), 2);
    assert_eq!(enemies.len(), 3);
    assert!(enemies[1].entity.pos.y < 0.0);
    assert!(enemies[2].entity.pos.y < 0.0);
}

// ── exit detection ────────────────────────────────────────────────────────────

#[rstest]
#[case::on_screen(Rect::new(375.0, 280.0, 50.0, 40.0), false)]
#[case::above_screen(Rect::new(375.0, -100.0, 50.0, 40.0), false)]
#[case::within_bottom_margin(Rect::new(375.0, 610.0, 50.0, 40.0), false)]
#[case::below_bottom_margin(Rect::new(375.0, 611.0, 50.0, 40.0), true)]
#[case::within_left_margin(Rect::new(-25.0, 280.0, 50.0, 40.0), false)]
#[case::past_left_margin(Rect::new(-26.0, 280.0, 50.0, 40.0), true)]
#[case::within_right_margin(Rect::new(770.0, 280.0, 50.0, 40.0), false)]
#[case::past_right_margin(Rect::new(771.0, 280.0, 50.0, 40.0), true)]
fn exit_margins(#[case] bounds: Rect, #[case] exited: bool) {
    let area = SpawnArea::new(&GameConfig::default());
    assert_eq!(area.has_exited(&bounds), exited);
}
