/// All game entity types — pure data, no logic.

// ── Map ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Floor,
    Wall,
}

/// Cosmetic scatter on floor tiles. Generated once, never touched by `tick`.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub x: f32,
    pub y: f32,
    pub sprite: u8,
}

// ── Status ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Player hp reached zero.
    GameOver,
    /// Every enemy has been removed.
    Cleared,
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Cleared on wall contact, map exit or a hit. Never set again.
    pub active: bool,
    pub owner: BulletOwner,
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Shield state machine. Active and Cooldown carry the frames remaining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Shield {
    #[default]
    Inactive,
    Active(u32),
    Cooldown(u32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub hp: u32,
    pub shield: Shield,
    /// Frames until the next shot is allowed.
    pub reload_timer: u32,
    /// Angle of the orbiting shield marker, in radians. Display only.
    pub orbit_angle: f32,
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Archetype tag, for display and spawn tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Chaser,
    Shooter,
    Bomber,
}

/// Per-archetype behavior state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    /// Pure pursuit.
    Chaser,
    /// Pursuit plus a fire interval counted down in frames.
    Shooter { fire_timer: i32 },
    /// Pursuit plus a fuse; detonates at zero or on contact.
    Bomber { fuse: i32 },
}

impl Behavior {
    pub fn kind(&self) -> EnemyKind {
        match self {
            Behavior::Chaser => EnemyKind::Chaser,
            Behavior::Shooter { .. } => EnemyKind::Shooter,
            Behavior::Bomber { .. } => EnemyKind::Bomber,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub hp: u32,
    pub behavior: Behavior,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn kind(&self) -> EnemyKind {
        self.behavior.kind()
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// One frame of sampled input. `fire` and `shield` are edge-triggered: true
/// only on the frame the action begins. `pointer_*` is in world pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub shield: bool,
    pub pointer_x: f32,
    pub pointer_y: f32,
}

// ── Master game state ────────────────────────────────────────────────────────

/// Everything that changes from frame to frame. The static map lives in
/// `World` so a clone of this never copies tiles.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
}
