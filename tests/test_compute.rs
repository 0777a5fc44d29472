use approx::assert_relative_eq;
use wall_shooter::compute::*;
use wall_shooter::config::Tuning;
use wall_shooter::stats::PlayerStats;

fn default_stats() -> PlayerStats {
    PlayerStats::from_tuning(&Tuning::default())
}

// ── spread_angles ─────────────────────────────────────────────────────────────

#[test]
fn single_shot_goes_straight() {
    assert_eq!(spread_angles(1, 10.0), vec![0.0]);
    assert_eq!(spread_angles(0, 10.0), vec![0.0]);
}

#[test]
fn three_shots_fan_out_symmetrically() {
    assert_eq!(spread_angles(3, 10.0), vec![-10.0, 0.0, 10.0]);
}

#[test]
fn even_counts_straddle_the_centre() {
    assert_eq!(spread_angles(2, 10.0), vec![-5.0, 5.0]);
}

// ── projectile_velocities ─────────────────────────────────────────────────────

#[test]
fn default_ship_fires_one_projectile_forward() {
    let v = projectile_velocities(&default_stats(), 10.0);
    assert_eq!(v.len(), 1);
    assert_relative_eq!(v[0].x, 10.0);
    assert_relative_eq!(v[0].y, 0.0);
}

#[test]
fn wide_shot_projectiles_keep_launch_speed() {
    let mut stats = default_stats();
    stats.enable_wide_shot(3);
    let v = projectile_velocities(&stats, 10.0);
    assert_eq!(v.len(), 3);
    for p in &v {
        assert_relative_eq!(p.length(), 10.0, epsilon = 1e-4);
    }
    assert!(v[0].y < 0.0);
    assert_relative_eq!(v[1].y, 0.0);
    assert!(v[2].y > 0.0);
    assert_relative_eq!(v[2].y, 10.0 * 10f32.to_radians().sin(), epsilon = 1e-4);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn vertical_axis_from_intents() {
    assert_eq!(vertical_axis(true, false), 1.0);
    assert_eq!(vertical_axis(false, true), -1.0);
    assert_eq!(vertical_axis(true, true), 0.0);
    assert_eq!(vertical_axis(false, false), 0.0);
}

#[test]
fn move_ship_scales_with_speed_and_dash() {
    assert_relative_eq!(move_ship(0.0, 1.0, 5.0, 1.0, 0.5, 4.5), 2.5);
    assert_relative_eq!(move_ship(0.0, -1.0, 5.0, 2.0, 0.25, 4.5), -2.5);
}

#[test]
fn move_ship_is_clamped_to_the_play_area() {
    assert_relative_eq!(move_ship(4.0, 1.0, 5.0, 2.0, 1.0, 4.5), 4.5);
    assert_relative_eq!(move_ship(-4.0, -1.0, 5.0, 1.0, 1.0, 4.5), -4.5);
}
