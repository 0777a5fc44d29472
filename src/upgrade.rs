/// Score bookkeeping and the upgrade pause it triggers.
///
/// Reaching the threshold freezes further scoring until one upgrade has been
/// applied, so a second pause can never stack on a pending one.

use log::{info, warn};

use crate::config::Tuning;
use crate::entities::{UpgradeKind, UpgradeOption};
use crate::lottery::{select_upgrades, RandomSource};
use crate::slowmo::SlowMotionController;
use crate::stats::PlayerStats;

/// Fixed strength of each upgrade kind.
#[derive(Clone, Debug, PartialEq)]
struct Magnitudes {
    fire_rate_step: f32,
    move_speed_step: f32,
    slow_motion_uses_step: u32,
    wide_shot_count: u32,
}

#[derive(Debug)]
pub struct UpgradeController {
    catalog: Vec<UpgradeOption>,
    choice_count: usize,
    threshold: u32,
    threshold_increment: u32,
    magnitudes: Magnitudes,
    score: u32,
    waiting_for_upgrade: bool,
    choices: Vec<UpgradeOption>,
}

impl UpgradeController {
    pub fn new(tuning: &Tuning) -> Self {
        UpgradeController {
            catalog: tuning.upgrade_catalog.clone(),
            choice_count: tuning.upgrade_choice_count,
            threshold: tuning.upgrade_threshold,
            threshold_increment: tuning.upgrade_threshold_increment,
            magnitudes: Magnitudes {
                fire_rate_step: tuning.fire_rate_step,
                move_speed_step: tuning.move_speed_step,
                slow_motion_uses_step: tuning.slow_motion_uses_step,
                wide_shot_count: tuning.wide_shot_count,
            },
            score: 0,
            waiting_for_upgrade: false,
            choices: Vec::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score at which the next pause triggers.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn is_waiting_for_upgrade(&self) -> bool {
        self.waiting_for_upgrade
    }

    /// Options presented by the pending pause; empty otherwise.
    pub fn current_choices(&self) -> &[UpgradeOption] {
        &self.choices
    }

    /// Add points.  Returns the drawn choices when this call crossed the
    /// threshold and entered the upgrade pause.  Ignored while a choice is
    /// pending.
    pub fn add_score(
        &mut self,
        points: u32,
        rng: &mut impl RandomSource,
    ) -> Option<Vec<UpgradeOption>> {
        if self.waiting_for_upgrade {
            return None;
        }

        self.score = self.score.saturating_add(points);
        if self.score < self.threshold {
            return None;
        }

        self.waiting_for_upgrade = true;
        self.choices = select_upgrades(&self.catalog, self.choice_count, rng);
        self.threshold = self.threshold.saturating_add(self.threshold_increment);
        info!(
            "Upgrade time at score {}, next threshold {}",
            self.score, self.threshold
        );
        Some(self.choices.clone())
    }

    /// Apply the chosen upgrade and leave the pause.  Returns `false` when no
    /// choice is pending.
    pub fn apply_upgrade(
        &mut self,
        kind: UpgradeKind,
        stats: &mut PlayerStats,
        slow_motion: &mut SlowMotionController,
    ) -> bool {
        if !self.waiting_for_upgrade {
            warn!("Ignoring {:?} upgrade: no upgrade pending", kind);
            return false;
        }

        match kind {
            UpgradeKind::FireRate => stats.increase_fire_rate(self.magnitudes.fire_rate_step),
            UpgradeKind::MoveSpeed => stats.increase_move_speed(self.magnitudes.move_speed_step),
            UpgradeKind::SlowMotionUses => {
                stats.increase_slow_motion_uses(self.magnitudes.slow_motion_uses_step);
                slow_motion.reset_consumed_uses();
            }
            UpgradeKind::WideShot => stats.enable_wide_shot(self.magnitudes.wide_shot_count),
        }

        self.waiting_for_upgrade = false;
        self.choices.clear();
        info!("Applied {:?} upgrade, resuming", kind);
        true
    }
}
