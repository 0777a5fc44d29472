/// One playthrough: the top-level state machine the host drives.
///
/// The host calls [`Session::tick`] once per rendered frame with the real
/// elapsed time, delivers input and collision events between ticks, and
/// drains [`HostEvent`]s to learn what to spawn, destroy and display.
///
/// ```text
///   Running ──threshold──▶ UpgradePause ──upgrade chosen──▶ Running
///   Running ──slow motion──▶ SlowMotion ──timer / game over──▶ Running / GameOver
///   Running | SlowMotion ──breach / player hit──▶ GameOver ──restart──▶ Running
/// ```

use std::time::Duration;

use log::{debug, info};

use crate::compute::{move_ship, projectile_velocities, vertical_axis};
use crate::config::Tuning;
use crate::entities::{
    CollisionEvent, EntityId, HostEvent, IdAllocator, InputAction, Phase, Ship, UpgradeKind,
    UpgradeOption, Vec2,
};
use crate::error::ConfigError;
use crate::lottery::RandomSource;
use crate::slowmo::{SlowMotionController, TimerEvent};
use crate::stats::PlayerStats;
use crate::timer::Timers;
use crate::upgrade::UpgradeController;
use crate::wall::WallSpawner;

/// A projectile the host is simulating for us.
#[derive(Clone, Debug)]
struct LiveProjectile {
    id: EntityId,
    /// Simulation time at which it is removed unspent.
    expires_at: f64,
}

/// Movement intents held during the current frame.
#[derive(Clone, Copy, Debug, Default)]
struct Intents {
    up: bool,
    down: bool,
    dash: bool,
}

pub struct Session<R> {
    tuning: Tuning,
    rng: R,
    ids: IdAllocator,

    stats: PlayerStats,
    upgrades: UpgradeController,
    slow_motion: SlowMotionController,
    timers: Timers<TimerEvent>,
    wall: WallSpawner,

    ship: Ship,
    projectiles: Vec<LiveProjectile>,
    intents: Intents,
    /// Scaled simulation clock, seconds.  Kept in `f64` so long runs do not
    /// lose cooldown precision.
    sim_time: f64,

    game_over: bool,
    final_score: Option<u32>,
    announced_time_scale: f32,
    events: Vec<HostEvent>,
}

impl<R: RandomSource> Session<R> {
    /// Start a fresh run.  Fails if the tuning cannot produce a playable game.
    pub fn new(tuning: Tuning, mut rng: R) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let mut ids = IdAllocator::default();
        let wall = WallSpawner::new(&tuning, &mut ids, &mut rng);
        let mut session = Session {
            stats: PlayerStats::from_tuning(&tuning),
            upgrades: UpgradeController::new(&tuning),
            slow_motion: SlowMotionController::new(&tuning),
            timers: Timers::new(),
            wall,
            ship: Ship {
                y: 0.0,
                next_fire_time: 0.0,
            },
            projectiles: Vec::new(),
            intents: Intents::default(),
            sim_time: 0.0,
            game_over: false,
            final_score: None,
            announced_time_scale: 1.0,
            events: Vec::new(),
            tuning,
            rng,
            ids,
        };
        session.announce_start();
        info!("Session started");
        Ok(session)
    }

    // ── Per-frame driver ─────────────────────────────────────────────────────

    /// Advance by `real_dt` of wall-clock time.  Timers run on real time; the
    /// simulation advances by `real_dt` times the current time scale.
    pub fn tick(&mut self, real_dt: Duration) {
        if self.game_over {
            return;
        }

        for (id, event) in self.timers.advance(real_dt) {
            match event {
                TimerEvent::SlowMotionExpired => {
                    self.slow_motion.on_timer(id, &mut self.timers);
                }
            }
        }
        self.announce_time_scale();

        let dt = real_dt.as_secs_f32() * self.time_scale();
        if dt > 0.0 {
            self.step_simulation(dt);
        }
        self.intents = Intents::default();
    }

    fn step_simulation(&mut self, dt: f32) {
        self.sim_time += f64::from(dt);

        let axis = vertical_axis(self.intents.up, self.intents.down);
        let dash_factor = if self.intents.dash {
            self.tuning.dash_multiplier
        } else {
            1.0
        };
        self.ship.y = move_ship(
            self.ship.y,
            axis,
            self.stats.move_speed,
            dash_factor,
            dt,
            self.tuning.player_y_limit,
        );

        let now = self.sim_time;
        let mut expired = Vec::new();
        self.projectiles.retain(|p| {
            if p.expires_at <= now {
                expired.push(p.id);
                false
            } else {
                true
            }
        });
        self.events
            .extend(expired.into_iter().map(HostEvent::DestroyEntity));

        if self.wall.tick(dt) {
            info!("Wall breached the player's side");
            self.trigger_game_over();
        }
    }

    // ── Host → core events ───────────────────────────────────────────────────

    /// Returns `false` when the input was ignored in the current phase.
    pub fn on_input(&mut self, action: InputAction) -> bool {
        if !self.accepts_gameplay() {
            return false;
        }
        match action {
            InputAction::MoveUp => self.intents.up = true,
            InputAction::MoveDown => self.intents.down = true,
            InputAction::Dash => self.intents.dash = true,
            InputAction::Fire => return self.fire(),
            InputAction::ActivateSlowMotion => return self.activate_slow_motion(),
        }
        true
    }

    /// Returns `false` when the collision was ignored.
    pub fn on_collision(&mut self, collision: CollisionEvent) -> bool {
        if !self.accepts_gameplay() {
            return false;
        }
        match collision {
            CollisionEvent::PlayerHitsWall => {
                info!("Player hit the wall");
                self.trigger_game_over()
            }
            CollisionEvent::BulletHitsWall { bullet } => self.remove_projectile(bullet),
            CollisionEvent::BulletHitsTarget { bullet, target } => self.hit_target(bullet, target),
        }
    }

    /// Apply the player's pick.  Returns `false` when no upgrade is pending.
    pub fn on_upgrade_chosen(&mut self, kind: UpgradeKind) -> bool {
        if self.game_over {
            return false;
        }
        if !self
            .upgrades
            .apply_upgrade(kind, &mut self.stats, &mut self.slow_motion)
        {
            return false;
        }

        self.events.push(HostEvent::Resumed(kind));
        if kind == UpgradeKind::SlowMotionUses {
            self.announce_slow_motion();
        }
        self.announce_time_scale();
        true
    }

    /// Leave GameOver for a fresh run.  Returns `false` in any other phase.
    pub fn restart(&mut self) -> bool {
        if !self.game_over {
            return false;
        }

        let stale: Vec<EntityId> = self
            .projectiles
            .drain(..)
            .map(|p| p.id)
            .chain(self.wall.alive_targets().map(|t| t.id))
            .collect();
        self.events
            .extend(stale.into_iter().map(HostEvent::DestroyEntity));

        self.timers.clear();
        self.stats = PlayerStats::from_tuning(&self.tuning);
        self.upgrades = UpgradeController::new(&self.tuning);
        self.slow_motion = SlowMotionController::new(&self.tuning);
        self.wall.reset(&mut self.ids, &mut self.rng);
        self.ship = Ship {
            y: 0.0,
            next_fire_time: 0.0,
        };
        self.intents = Intents::default();
        self.sim_time = 0.0;
        self.game_over = false;
        self.final_score = None;

        self.announce_start();
        info!("Session restarted");
        true
    }

    /// Tear the session down.  Yields the final score if the run had ended.
    pub fn return_to_title(self) -> Option<u32> {
        info!("Returning to title");
        self.final_score
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.upgrades.is_waiting_for_upgrade() {
            Phase::UpgradePause
        } else if self.slow_motion.is_active() {
            Phase::SlowMotion
        } else {
            Phase::Running
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn current_score(&self) -> u32 {
        self.upgrades.score()
    }

    /// Score frozen at the moment the run ended.
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn upgrade_threshold(&self) -> u32 {
        self.upgrades.threshold()
    }

    pub fn remaining_slow_motion_uses(&self) -> u32 {
        self.slow_motion
            .remaining_uses(self.stats.max_slow_motion_uses)
    }

    pub fn slow_motion_uses_consumed(&self) -> u32 {
        self.slow_motion.consumed_uses()
    }

    pub fn pending_choices(&self) -> &[UpgradeOption] {
        self.upgrades.current_choices()
    }

    /// Multiplier the host should apply to its own simulation (physics,
    /// projectile motion).
    pub fn time_scale(&self) -> f32 {
        if self.game_over {
            1.0
        } else if self.upgrades.is_waiting_for_upgrade() {
            0.0
        } else {
            self.slow_motion.time_scale()
        }
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn wall(&self) -> &WallSpawner {
        &self.wall
    }

    pub fn ship_position(&self) -> Vec2 {
        Vec2::new(self.tuning.player_x, self.ship.y)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Take every event emitted since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn accepts_gameplay(&self) -> bool {
        !self.game_over && !self.upgrades.is_waiting_for_upgrade()
    }

    fn fire(&mut self) -> bool {
        if self.sim_time < self.ship.next_fire_time {
            return false;
        }
        self.ship.next_fire_time = self.sim_time + f64::from(self.stats.fire_interval);

        let position = self.ship_position();
        let expires_at = self.sim_time + f64::from(self.tuning.projectile_lifetime);
        for velocity in projectile_velocities(&self.stats, self.tuning.launch_speed) {
            let id = self.ids.next_id();
            self.projectiles.push(LiveProjectile { id, expires_at });
            self.events.push(HostEvent::SpawnProjectile {
                id,
                position,
                velocity,
            });
        }
        debug!("Fired {} projectile(s)", self.stats.shot_count());
        true
    }

    fn activate_slow_motion(&mut self) -> bool {
        if !self
            .slow_motion
            .activate(self.stats.max_slow_motion_uses, &mut self.timers)
        {
            return false;
        }
        self.announce_slow_motion();
        self.announce_time_scale();
        true
    }

    fn remove_projectile(&mut self, id: EntityId) -> bool {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.id != id);
        if self.projectiles.len() == before {
            return false;
        }
        self.events.push(HostEvent::DestroyEntity(id));
        true
    }

    /// The bullet is spent even when its target was already down.  Bullets
    /// the core is not tracking score nothing.
    fn hit_target(&mut self, bullet: EntityId, target: EntityId) -> bool {
        if !self.remove_projectile(bullet) {
            debug!("Ignoring hit from unknown bullet {:?}", bullet);
            return false;
        }
        let Some(hit) = self
            .wall
            .on_target_destroyed(target, &mut self.ids, &mut self.rng)
        else {
            return true;
        };

        self.events.push(HostEvent::DestroyEntity(target));

        let choices = self.upgrades.add_score(hit.score_value, &mut self.rng);
        self.events
            .push(HostEvent::ScoreChanged(self.upgrades.score()));
        if let Some(choices) = choices {
            self.events.push(HostEvent::PresentUpgradeChoices(choices));
            self.announce_time_scale();
        }

        if let Some(targets) = hit.respawned {
            self.events.push(HostEvent::TargetsSpawned {
                wall_x: self.wall.x(),
                targets,
            });
        }
        true
    }

    fn trigger_game_over(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.slow_motion.deactivate(&mut self.timers);
        self.game_over = true;
        self.intents = Intents::default();

        let final_score = self.upgrades.score();
        self.final_score = Some(final_score);
        self.events.push(HostEvent::GameOver { final_score });
        self.announce_time_scale();
        info!("Game over with score {}", final_score);
        true
    }

    fn announce_start(&mut self) {
        self.announced_time_scale = 1.0;
        self.events.push(HostEvent::TargetsSpawned {
            wall_x: self.wall.x(),
            targets: self.wall.targets().to_vec(),
        });
        self.events
            .push(HostEvent::ScoreChanged(self.upgrades.score()));
        self.announce_slow_motion();
    }

    fn announce_slow_motion(&mut self) {
        let max = self.stats.max_slow_motion_uses;
        self.events.push(HostEvent::SlowMotionRemaining {
            remaining: self.slow_motion.remaining_uses(max),
            max,
        });
    }

    fn announce_time_scale(&mut self) {
        let scale = self.time_scale();
        if scale != self.announced_time_scale {
            self.announced_time_scale = scale;
            self.events.push(HostEvent::TimeScaleChanged(scale));
        }
    }
}
