/// Player stat bag and the upgrade mutators that act on it.
///
/// Every mutator only moves a stat in the "stronger" direction, so calling one
/// repeatedly is always safe.

use log::info;

use crate::config::Tuning;

#[derive(Clone, Debug, PartialEq)]
pub struct WideShot {
    pub enabled: bool,
    /// Projectiles per shot once enabled.
    pub count: u32,
    /// Angle between neighbouring projectiles.
    pub spread_angle_degrees: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStats {
    pub move_speed: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    pub fire_interval_floor: f32,
    pub max_slow_motion_uses: u32,
    pub wide_shot: WideShot,
}

impl PlayerStats {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        PlayerStats {
            move_speed: tuning.move_speed,
            fire_interval: tuning.fire_interval,
            fire_interval_floor: tuning.fire_interval_floor,
            max_slow_motion_uses: tuning.max_slow_motion_uses,
            wide_shot: WideShot {
                enabled: false,
                count: 1,
                spread_angle_degrees: tuning.spread_angle_degrees,
            },
        }
    }

    /// Shorten the fire interval, never below the floor.
    pub fn increase_fire_rate(&mut self, amount: f32) {
        self.fire_interval = (self.fire_interval - amount).max(self.fire_interval_floor);
        info!("Fire interval is now {}", self.fire_interval);
    }

    pub fn increase_move_speed(&mut self, amount: f32) {
        self.move_speed += amount;
        info!("Move speed is now {}", self.move_speed);
    }

    pub fn increase_slow_motion_uses(&mut self, amount: u32) {
        self.max_slow_motion_uses = self.max_slow_motion_uses.saturating_add(amount);
        info!("Slow motion uses are now {}", self.max_slow_motion_uses);
    }

    /// Overwrites the projectile count; repeated upgrades do not stack.
    pub fn enable_wide_shot(&mut self, count: u32) {
        self.wide_shot.enabled = true;
        self.wide_shot.count = count;
        info!("Wide shot enabled with {} projectiles", count);
    }

    /// Projectiles a single shot produces right now.
    pub fn shot_count(&self) -> u32 {
        if self.wide_shot.enabled {
            self.wide_shot.count.max(1)
        } else {
            1
        }
    }
}
