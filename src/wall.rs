/// The scrolling wall, its target batch and the difficulty ramp.
///
/// The wall only ever gets faster within a session: every destroyed target
/// adds a fixed increment, and clearing the batch does not reset it.

use log::{debug, info};

use crate::config::Tuning;
use crate::entities::{EntityId, IdAllocator, Target};
use crate::lottery::RandomSource;

/// Result of a target being shot.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetHit {
    pub score_value: u32,
    /// The fresh batch, when this hit cleared the wall.
    pub respawned: Option<Vec<Target>>,
}

#[derive(Debug)]
pub struct WallSpawner {
    x: f32,
    speed: f32,
    targets: Vec<Target>,

    initial_speed: f32,
    speed_increment: f32,
    spawn_x: f32,
    breach_x: f32,
    targets_per_wall: usize,
    target_y_range: f32,
    target_score: u32,
}

impl WallSpawner {
    /// Wall at the spawn edge with its first batch already placed.
    pub fn new(tuning: &Tuning, ids: &mut IdAllocator, rng: &mut impl RandomSource) -> Self {
        let mut wall = WallSpawner {
            x: tuning.wall_spawn_x,
            speed: tuning.wall_initial_speed,
            targets: Vec::new(),
            initial_speed: tuning.wall_initial_speed,
            speed_increment: tuning.wall_speed_increment,
            spawn_x: tuning.wall_spawn_x,
            breach_x: tuning.wall_breach_x,
            targets_per_wall: tuning.targets_per_wall,
            target_y_range: tuning.target_y_range,
            target_score: tuning.target_score,
        };
        wall.spawn_targets(ids, rng);
        wall
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn alive_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.alive)
    }

    /// Move towards the player by `dt` seconds of simulation time.  Returns
    /// `true` once the wall has crossed the breach line.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.x -= self.speed * dt;
        self.is_breached()
    }

    pub fn is_breached(&self) -> bool {
        self.x < self.breach_x
    }

    /// Register a destroyed target.  Unknown or already dead targets are
    /// ignored and yield `None`.
    pub fn on_target_destroyed(
        &mut self,
        id: EntityId,
        ids: &mut IdAllocator,
        rng: &mut impl RandomSource,
    ) -> Option<TargetHit> {
        let target = self.targets.iter_mut().find(|t| t.id == id && t.alive)?;
        target.alive = false;
        let score_value = target.score_value;

        self.speed += self.speed_increment;
        debug!("Target {:?} down, wall speed {}", id, self.speed);

        let respawned = if self.targets.iter().all(|t| !t.alive) {
            self.respawn(ids, rng);
            Some(self.targets.clone())
        } else {
            None
        };

        Some(TargetHit {
            score_value,
            respawned,
        })
    }

    /// Back to the initial speed and spawn edge with a fresh batch.
    pub fn reset(&mut self, ids: &mut IdAllocator, rng: &mut impl RandomSource) {
        self.speed = self.initial_speed;
        self.respawn(ids, rng);
    }

    fn respawn(&mut self, ids: &mut IdAllocator, rng: &mut impl RandomSource) {
        self.x = self.spawn_x;
        self.spawn_targets(ids, rng);
        info!("Wall respawned at x={} with speed {}", self.x, self.speed);
    }

    fn spawn_targets(&mut self, ids: &mut IdAllocator, rng: &mut impl RandomSource) {
        let range = self.target_y_range;
        self.targets = (0..self.targets_per_wall)
            .map(|_| Target {
                id: ids.next_id(),
                y: rng.within(-range, range),
                score_value: self.target_score,
                alive: true,
            })
            .collect();
    }
}
