/// Host-side world for the terminal front end.
///
/// The core never moves projectiles or tests overlaps; this module does that
/// job the way an engine's physics would, and reports contacts back as
/// [`CollisionEvent`]s.

use wall_shooter::entities::{CollisionEvent, EntityId, HostEvent, UpgradeOption, Vec2};
use wall_shooter::lottery::RandomSource;
use wall_shooter::session::Session;

/// Half height of a target's hit box, world units.
const TARGET_HALF_HEIGHT: f32 = 0.5;
/// Half width of the ship's hit box, world units.
const SHIP_HALF_WIDTH: f32 = 0.5;

#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Everything the front end mirrors from the event stream.
#[derive(Debug)]
pub struct HostWorld {
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub slow_motion_remaining: u32,
    pub slow_motion_max: u32,
    pub time_scale: f32,
    pub choices: Vec<UpgradeOption>,
    pub final_score: Option<u32>,
    /// Last status line worth flashing on screen.
    pub banner: Option<String>,
}

impl HostWorld {
    pub fn new() -> Self {
        HostWorld {
            projectiles: Vec::new(),
            score: 0,
            slow_motion_remaining: 0,
            slow_motion_max: 0,
            time_scale: 1.0,
            choices: Vec::new(),
            final_score: None,
            banner: None,
        }
    }

    pub fn apply(&mut self, events: Vec<HostEvent>) {
        for event in events {
            match event {
                HostEvent::SpawnProjectile {
                    id,
                    position,
                    velocity,
                } => self.projectiles.push(Projectile {
                    id,
                    position,
                    velocity,
                }),
                HostEvent::DestroyEntity(id) => self.projectiles.retain(|p| p.id != id),
                HostEvent::TargetsSpawned { .. } => {}
                HostEvent::PresentUpgradeChoices(choices) => self.choices = choices,
                HostEvent::Resumed(kind) => {
                    self.choices.clear();
                    self.banner = Some(format!("{} upgraded!", kind.label()));
                }
                HostEvent::ScoreChanged(score) => self.score = score,
                HostEvent::SlowMotionRemaining { remaining, max } => {
                    self.slow_motion_remaining = remaining;
                    self.slow_motion_max = max;
                }
                HostEvent::TimeScaleChanged(scale) => self.time_scale = scale,
                HostEvent::GameOver { final_score } => self.final_score = Some(final_score),
            }
        }
    }

    /// Forget the previous run after a restart.
    pub fn reset(&mut self) {
        *self = HostWorld::new();
    }

    /// Move projectiles by one frame and collect the contacts to report.
    pub fn step<R: RandomSource>(&mut self, real_dt: f32, session: &Session<R>) -> Vec<CollisionEvent> {
        let dt = real_dt * session.time_scale();
        for p in &mut self.projectiles {
            p.position.x += p.velocity.x * dt;
            p.position.y += p.velocity.y * dt;
        }

        let wall = session.wall();
        let mut contacts = Vec::new();
        for p in &self.projectiles {
            if p.position.x < wall.x() {
                continue;
            }
            let struck = wall
                .alive_targets()
                .find(|t| (t.y - p.position.y).abs() <= TARGET_HALF_HEIGHT);
            contacts.push(match struck {
                Some(target) => CollisionEvent::BulletHitsTarget {
                    bullet: p.id,
                    target: target.id,
                },
                None => CollisionEvent::BulletHitsWall { bullet: p.id },
            });
        }

        if wall.x() <= session.ship_position().x + SHIP_HALF_WIDTH {
            contacts.push(CollisionEvent::PlayerHitsWall);
        }
        contacts
    }
}
