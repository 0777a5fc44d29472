use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wall_shooter::config::Tuning;
use wall_shooter::entities::{EntityId, IdAllocator};
use wall_shooter::wall::WallSpawner;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_wall() -> (WallSpawner, IdAllocator, StdRng) {
    let mut ids = IdAllocator::default();
    let mut rng = seeded_rng();
    let wall = WallSpawner::new(&Tuning::default(), &mut ids, &mut rng);
    (wall, ids, rng)
}

fn alive_ids(wall: &WallSpawner) -> Vec<EntityId> {
    wall.alive_targets().map(|t| t.id).collect()
}

// ── Spawning ─────────────────────────────────────────────────────────────────

#[test]
fn starts_at_spawn_edge_with_full_batch() {
    let (wall, _, _) = make_wall();
    assert_relative_eq!(wall.x(), 15.0);
    assert_relative_eq!(wall.speed(), 2.0);
    assert_eq!(alive_ids(&wall), vec![EntityId(0), EntityId(1), EntityId(2)]);
    for target in wall.targets() {
        assert!((-4.0..=4.0).contains(&target.y), "y = {}", target.y);
        assert_eq!(target.score_value, 100);
    }
}

// ── Movement ─────────────────────────────────────────────────────────────────

#[test]
fn tick_moves_left_by_speed_times_dt() {
    let (mut wall, _, _) = make_wall();
    assert!(!wall.tick(1.5));
    assert_relative_eq!(wall.x(), 12.0);
}

#[test]
fn breach_only_past_the_line() {
    let (mut wall, _, _) = make_wall();
    // 25 units to the line at speed 2.
    assert!(!wall.tick(12.5));
    assert!(!wall.is_breached());
    assert!(wall.tick(0.1));
    assert!(wall.is_breached());
}

// ── Difficulty ramp ──────────────────────────────────────────────────────────

#[test]
fn each_destroyed_target_speeds_the_wall_up() {
    let (mut wall, mut ids, mut rng) = make_wall();
    let hit = wall
        .on_target_destroyed(EntityId(1), &mut ids, &mut rng)
        .expect("live target");
    assert_eq!(hit.score_value, 100);
    assert!(hit.respawned.is_none());
    assert_relative_eq!(wall.speed(), 2.5);
    assert_eq!(alive_ids(&wall), vec![EntityId(0), EntityId(2)]);
}

#[test]
fn unknown_or_dead_targets_are_ignored() {
    let (mut wall, mut ids, mut rng) = make_wall();
    assert!(wall
        .on_target_destroyed(EntityId(99), &mut ids, &mut rng)
        .is_none());
    wall.on_target_destroyed(EntityId(0), &mut ids, &mut rng);
    assert!(wall
        .on_target_destroyed(EntityId(0), &mut ids, &mut rng)
        .is_none());
    assert_relative_eq!(wall.speed(), 2.5);
}

#[test]
fn clearing_the_batch_respawns_with_fresh_ids() {
    let (mut wall, mut ids, mut rng) = make_wall();
    wall.tick(2.0);
    wall.on_target_destroyed(EntityId(0), &mut ids, &mut rng);
    wall.on_target_destroyed(EntityId(1), &mut ids, &mut rng);
    let hit = wall
        .on_target_destroyed(EntityId(2), &mut ids, &mut rng)
        .expect("live target");

    let fresh = hit.respawned.expect("batch cleared");
    assert_eq!(fresh.len(), 3);
    assert!(fresh.iter().all(|t| t.alive && t.id.0 >= 3));
    assert!(fresh.iter().all(|t| (-4.0..=4.0).contains(&t.y)));
    assert_relative_eq!(wall.x(), 15.0);
    // The ramp carries over the respawn.
    assert_relative_eq!(wall.speed(), 3.5);
}

#[test]
fn reset_restores_initial_speed_and_position() {
    let (mut wall, mut ids, mut rng) = make_wall();
    wall.on_target_destroyed(EntityId(0), &mut ids, &mut rng);
    wall.tick(3.0);
    wall.reset(&mut ids, &mut rng);
    assert_relative_eq!(wall.x(), 15.0);
    assert_relative_eq!(wall.speed(), 2.0);
    assert_eq!(wall.alive_targets().count(), 3);
    assert!(wall.targets().iter().all(|t| t.id.0 >= 3));
}

#[test]
fn zero_y_range_puts_every_target_on_the_centre_line() {
    let tuning = Tuning {
        target_y_range: 0.0,
        ..Tuning::default()
    };
    let wall = WallSpawner::new(&tuning, &mut IdAllocator::default(), &mut seeded_rng());
    assert!(wall.targets().iter().all(|t| t.y == 0.0));
}
