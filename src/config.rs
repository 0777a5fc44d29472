use std::path::Path;
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::entities::{UpgradeKind, UpgradeOption};
use crate::error::ConfigError;

/// All tunable game parameters.  Missing fields in a tuning file fall back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // ── Upgrades ──
    pub upgrade_threshold: u32,
    pub upgrade_threshold_increment: u32,
    /// How many options an upgrade pause offers.
    pub upgrade_choice_count: usize,
    pub upgrade_catalog: Vec<UpgradeOption>,
    pub fire_rate_step: f32,
    pub move_speed_step: f32,
    pub slow_motion_uses_step: u32,
    pub wide_shot_count: u32,

    // ── Player ──
    pub move_speed: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    pub fire_interval_floor: f32,
    pub max_slow_motion_uses: u32,
    pub spread_angle_degrees: f32,
    pub dash_multiplier: f32,
    pub player_x: f32,
    pub player_y_limit: f32,

    // ── Projectiles ──
    pub launch_speed: f32,
    /// Simulation seconds before an unspent projectile is removed.
    pub projectile_lifetime: f32,

    // ── Slow motion ──
    pub slow_motion_scale: f32,
    /// Real-time seconds.
    pub slow_motion_duration: f32,

    // ── Wall ──
    pub wall_initial_speed: f32,
    /// Added to the wall speed for every destroyed target.
    pub wall_speed_increment: f32,
    pub wall_spawn_x: f32,
    /// Crossing this x ends the run.
    pub wall_breach_x: f32,
    pub targets_per_wall: usize,
    pub target_y_range: f32,
    pub target_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            upgrade_threshold: 500,
            upgrade_threshold_increment: 500,
            upgrade_choice_count: 3,
            upgrade_catalog: vec![
                UpgradeOption::new(UpgradeKind::FireRate, 10),
                UpgradeOption::new(UpgradeKind::MoveSpeed, 10),
                UpgradeOption::new(UpgradeKind::SlowMotionUses, 5),
                UpgradeOption::new(UpgradeKind::WideShot, 3),
            ],
            fire_rate_step: 0.05,
            move_speed_step: 0.5,
            slow_motion_uses_step: 1,
            wide_shot_count: 3,

            move_speed: 5.0,
            fire_interval: 0.5,
            fire_interval_floor: 0.1,
            max_slow_motion_uses: 2,
            spread_angle_degrees: 10.0,
            dash_multiplier: 2.0,
            player_x: -8.0,
            player_y_limit: 4.5,

            launch_speed: 10.0,
            projectile_lifetime: 3.0,

            slow_motion_scale: 0.3,
            slow_motion_duration: 3.0,

            wall_initial_speed: 2.0,
            wall_speed_increment: 0.5,
            wall_spawn_x: 15.0,
            wall_breach_x: -10.0,
            targets_per_wall: 3,
            target_y_range: 4.0,
            target_score: 100,
        }
    }
}

impl Tuning {
    /// Read a RON tuning file.  The result is not validated yet.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_ron(&contents)?;
        info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Pretty RON, suitable as a starting point for a tuning file.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default();
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn slow_motion_duration(&self) -> Duration {
        Duration::from_secs_f32(self.slow_motion_duration)
    }

    /// Reject configurations a session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.upgrade_catalog.iter().any(|o| o.weight > 0) {
            return Err(ConfigError::EmptyCatalog);
        }
        // Every later comparison relies on this.
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(invalid(field, "must be a finite number"));
            }
        }
        if self.upgrade_choice_count == 0 {
            return Err(invalid("upgrade_choice_count", "must be at least 1"));
        }
        if self.fire_interval_floor <= 0.0 {
            return Err(invalid("fire_interval_floor", "must be positive"));
        }
        if self.fire_interval < self.fire_interval_floor {
            return Err(invalid("fire_interval", "must not be below fire_interval_floor"));
        }
        if !(self.slow_motion_scale > 0.0 && self.slow_motion_scale <= 1.0) {
            return Err(invalid("slow_motion_scale", "must be in (0, 1]"));
        }
        if self.slow_motion_duration <= 0.0 {
            return Err(invalid("slow_motion_duration", "must be positive"));
        }
        if self.projectile_lifetime <= 0.0 {
            return Err(invalid("projectile_lifetime", "must be positive"));
        }
        if self.targets_per_wall == 0 {
            return Err(invalid("targets_per_wall", "must be at least 1"));
        }
        if self.target_y_range < 0.0 {
            return Err(invalid("target_y_range", "must not be negative"));
        }
        if self.player_y_limit < 0.0 {
            return Err(invalid("player_y_limit", "must not be negative"));
        }
        if self.wide_shot_count == 0 {
            return Err(invalid("wide_shot_count", "must be at least 1"));
        }
        if self.wall_spawn_x <= self.wall_breach_x {
            return Err(invalid("wall_spawn_x", "must lie beyond wall_breach_x"));
        }
        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f32); 18] {
        [
            ("fire_rate_step", self.fire_rate_step),
            ("move_speed_step", self.move_speed_step),
            ("move_speed", self.move_speed),
            ("fire_interval", self.fire_interval),
            ("fire_interval_floor", self.fire_interval_floor),
            ("spread_angle_degrees", self.spread_angle_degrees),
            ("dash_multiplier", self.dash_multiplier),
            ("player_x", self.player_x),
            ("player_y_limit", self.player_y_limit),
            ("launch_speed", self.launch_speed),
            ("projectile_lifetime", self.projectile_lifetime),
            ("slow_motion_scale", self.slow_motion_scale),
            ("slow_motion_duration", self.slow_motion_duration),
            ("wall_initial_speed", self.wall_initial_speed),
            ("wall_speed_increment", self.wall_speed_increment),
            ("wall_spawn_x", self.wall_spawn_x),
            ("wall_breach_x", self.wall_breach_x),
            ("target_y_range", self.target_y_range),
        ]
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
