use std::collections::HashSet;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wall_shooter::config::Tuning;
use wall_shooter::entities::UpgradeKind;
use wall_shooter::slowmo::SlowMotionController;
use wall_shooter::stats::PlayerStats;
use wall_shooter::timer::Timers;
use wall_shooter::upgrade::UpgradeController;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

struct Fixture {
    upgrades: UpgradeController,
    stats: PlayerStats,
    slow_motion: SlowMotionController,
    rng: StdRng,
}

fn fixture() -> Fixture {
    let tuning = Tuning::default();
    Fixture {
        upgrades: UpgradeController::new(&tuning),
        stats: PlayerStats::from_tuning(&tuning),
        slow_motion: SlowMotionController::new(&tuning),
        rng: seeded_rng(),
    }
}

impl Fixture {
    fn pause(&mut self) {
        let choices = self.upgrades.add_score(500, &mut self.rng);
        assert!(choices.is_some());
    }

    fn apply(&mut self, kind: UpgradeKind) -> bool {
        self.upgrades
            .apply_upgrade(kind, &mut self.stats, &mut self.slow_motion)
    }
}

// ── add_score ────────────────────────────────────────────────────────────────

#[test]
fn below_threshold_just_accumulates() {
    let mut f = fixture();
    assert!(f.upgrades.add_score(100, &mut f.rng).is_none());
    assert!(f.upgrades.add_score(250, &mut f.rng).is_none());
    assert_eq!(f.upgrades.score(), 350);
    assert!(!f.upgrades.is_waiting_for_upgrade());
    assert_eq!(f.upgrades.threshold(), 500);
}

#[test]
fn crossing_threshold_in_one_step_pauses_and_raises_threshold() {
    let mut f = fixture();
    assert!(f.upgrades.add_score(480, &mut f.rng).is_none());

    let choices = f.upgrades.add_score(50, &mut f.rng).expect("threshold crossed");
    assert_eq!(f.upgrades.score(), 530);
    assert!(f.upgrades.is_waiting_for_upgrade());
    assert_eq!(f.upgrades.threshold(), 1000);

    assert_eq!(choices.len(), 3);
    let unique: HashSet<UpgradeKind> = choices.iter().map(|o| o.kind).collect();
    assert_eq!(unique.len(), 3);
    assert_eq!(f.upgrades.current_choices(), choices.as_slice());
}

#[test]
fn reaching_threshold_exactly_pauses() {
    let mut f = fixture();
    assert!(f.upgrades.add_score(500, &mut f.rng).is_some());
}

#[test]
fn score_is_frozen_while_waiting() {
    let mut f = fixture();
    f.pause();
    assert!(f.upgrades.add_score(100, &mut f.rng).is_none());
    assert!(f.upgrades.add_score(10_000, &mut f.rng).is_none());
    assert_eq!(f.upgrades.score(), 500);
    assert_eq!(f.upgrades.threshold(), 1000);
}

#[test]
fn big_jump_over_several_thresholds_pauses_once() {
    let mut f = fixture();
    assert!(f.upgrades.add_score(1600, &mut f.rng).is_some());
    assert_eq!(f.upgrades.threshold(), 1000);
    assert!(f.apply(UpgradeKind::MoveSpeed));
    // Still above the raised threshold: the next point triggers again.
    assert!(f.upgrades.add_score(1, &mut f.rng).is_some());
    assert_eq!(f.upgrades.threshold(), 1500);
}

// ── apply_upgrade ────────────────────────────────────────────────────────────

#[test]
fn apply_without_pending_pause_is_ignored() {
    let mut f = fixture();
    let before = f.stats.clone();
    assert!(!f.apply(UpgradeKind::MoveSpeed));
    assert_eq!(f.stats, before);
}

#[test]
fn apply_resumes_and_clears_choices() {
    let mut f = fixture();
    f.pause();
    assert!(f.apply(UpgradeKind::FireRate));
    assert!(!f.upgrades.is_waiting_for_upgrade());
    assert!(f.upgrades.current_choices().is_empty());
    // Only one upgrade per pause.
    assert!(!f.apply(UpgradeKind::FireRate));
}

#[test]
fn fire_rate_upgrade_uses_configured_step() {
    let mut f = fixture();
    f.pause();
    f.apply(UpgradeKind::FireRate);
    assert_relative_eq!(f.stats.fire_interval, 0.45, epsilon = 1e-6);
}

#[test]
fn move_speed_upgrade_uses_configured_step() {
    let mut f = fixture();
    f.pause();
    f.apply(UpgradeKind::MoveSpeed);
    assert_relative_eq!(f.stats.move_speed, 5.5);
}

#[test]
fn wide_shot_upgrade_enables_three_projectiles() {
    let mut f = fixture();
    f.pause();
    f.apply(UpgradeKind::WideShot);
    assert!(f.stats.wide_shot.enabled);
    assert_eq!(f.stats.wide_shot.count, 3);
}

#[test]
fn slow_motion_upgrade_raises_cap_and_refills_charges() {
    let mut f = fixture();
    let mut timers = Timers::new();
    assert!(f.slow_motion.activate(f.stats.max_slow_motion_uses, &mut timers));
    f.slow_motion.deactivate(&mut timers);
    assert!(f.slow_motion.activate(f.stats.max_slow_motion_uses, &mut timers));
    f.slow_motion.deactivate(&mut timers);
    assert_eq!(f.slow_motion.consumed_uses(), 2);

    f.pause();
    f.apply(UpgradeKind::SlowMotionUses);
    assert_eq!(f.stats.max_slow_motion_uses, 3);
    assert_eq!(f.slow_motion.consumed_uses(), 0);
    assert_eq!(f.slow_motion.remaining_uses(f.stats.max_slow_motion_uses), 3);
}
