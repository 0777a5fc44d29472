/// Pure game-logic helpers.
///
/// Nothing here touches session state; every function maps its inputs to a
/// fresh value so the session and the tests can share them.

use crate::entities::Vec2;
use crate::stats::PlayerStats;

/// Firing direction of the ship, before any spread is applied.
pub const FIRE_DIRECTION: Vec2 = Vec2 { x: 1.0, y: 0.0 };

// ── Shooting ─────────────────────────────────────────────────────────────────

/// Angles (degrees, relative to the firing direction) of each projectile in
/// one shot, centred on zero.  Three projectiles 10° apart → −10°, 0°, +10°.
pub fn spread_angles(count: u32, spread_degrees: f32) -> Vec<f32> {
    if count <= 1 {
        return vec![0.0];
    }
    let start = -spread_degrees * (count - 1) as f32 / 2.0;
    (0..count).map(|i| start + i as f32 * spread_degrees).collect()
}

/// Velocity of every projectile a single shot produces with the current stats.
pub fn projectile_velocities(stats: &PlayerStats, launch_speed: f32) -> Vec<Vec2> {
    spread_angles(stats.shot_count(), stats.wide_shot.spread_angle_degrees)
        .into_iter()
        .map(|angle| FIRE_DIRECTION.rotated(angle).scale(launch_speed))
        .collect()
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// −1, 0 or +1 from the held movement intents.  Both held cancel out.
pub fn vertical_axis(up: bool, down: bool) -> f32 {
    match (up, down) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// New ship height after `dt` seconds, clamped to `[-limit, limit]`.
pub fn move_ship(y: f32, axis: f32, speed: f32, dash_factor: f32, dt: f32, limit: f32) -> f32 {
    (y + axis * speed * dash_factor * dt).clamp(-limit, limit)
}
