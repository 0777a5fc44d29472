/// Shared data types for the core and its host.  Pure data, no game rules.

use serde::{Deserialize, Serialize};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// World-space vector.  +x points from the player towards the wall spawn edge,
/// +y points up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn scale(&self, scalar: f32) -> Self {
        Vec2::new(self.x * scalar, self.y * scalar)
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Rotate counter-clockwise by `degrees`.
    pub fn rotated(&self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

/// Handle the core hands out for every projectile and target so the host can
/// map its own scene objects back to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

// ── Upgrades ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Shortens the interval between shots.
    FireRate,
    /// Faster vertical movement.
    MoveSpeed,
    /// One more slow-motion charge, and the used charges are refilled.
    SlowMotionUses,
    /// Fires a fan of projectiles instead of a single one.
    WideShot,
}

impl UpgradeKind {
    pub fn label(&self) -> &'static str {
        match self {
            UpgradeKind::FireRate => "Fire Rate",
            UpgradeKind::MoveSpeed => "Move Speed",
            UpgradeKind::SlowMotionUses => "Slow Motion +1",
            UpgradeKind::WideShot => "Wide Shot",
        }
    }
}

/// One entry of the upgrade catalog.  Higher weight → drawn more often.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeOption {
    pub kind: UpgradeKind,
    pub weight: u32,
}

impl UpgradeOption {
    pub fn new(kind: UpgradeKind, weight: u32) -> Self {
        UpgradeOption { kind, weight }
    }
}

// ── Session phase ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Running, but with the time scale lowered.
    SlowMotion,
    /// Simulation frozen until the player picks an upgrade.
    UpgradePause,
    GameOver,
}

// ── Host → core ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    Dash,
    Fire,
    ActivateSlowMotion,
}

/// Contacts reported by the host's physics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionEvent {
    PlayerHitsWall,
    BulletHitsWall { bullet: EntityId },
    BulletHitsTarget { bullet: EntityId, target: EntityId },
}

// ── Core → host ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    SpawnProjectile { id: EntityId, position: Vec2, velocity: Vec2 },
    DestroyEntity(EntityId),
    /// A fresh target batch was placed on the wall.
    TargetsSpawned { wall_x: f32, targets: Vec<Target> },
    PresentUpgradeChoices(Vec<UpgradeOption>),
    /// The chosen upgrade was applied and the simulation resumed.
    Resumed(UpgradeKind),
    ScoreChanged(u32),
    SlowMotionRemaining { remaining: u32, max: u32 },
    TimeScaleChanged(f32),
    GameOver { final_score: u32 },
}

// ── Wall contents ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub id: EntityId,
    /// Vertical offset on the wall.
    pub y: f32,
    pub score_value: u32,
    pub alive: bool,
}

// ── Player ship ───────────────────────────────────────────────────────────────

/// Ship state the core owns.  Horizontal position is fixed by tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub y: f32,
    /// Simulation time at which the next shot is allowed.
    pub next_fire_time: f64,
}

/// Hands out unique [`EntityId`]s for one session.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
