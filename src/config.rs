/// Tunables and startup configuration.
use std::env::VarError;

use crate::error::{ConfigError, GameError};

// ── Fixed tunables ───────────────────────────────────────────────────────────

/// Side of one tile in world pixels.
pub const TILE_SIZE: f32 = 8.0;

pub const PLAYER_SPEED: f32 = 1.2;
pub const PLAYER_HP: u32 = 3;
pub const BULLET_SPEED: f32 = 3.0;
pub const ENEMY_BULLET_SPEED: f32 = 2.0;

/// Frames the shield stays up.
pub const SHIELD_DURATION: u32 = 30;
/// Frames before the shield can be raised again.
pub const SHIELD_COOLDOWN: u32 = 90;
/// Minimum frames between two player shots.
pub const RELOAD_TIME: u32 = 10;
/// Radians per frame for the shield marker.
pub const ORBIT_STEP: f32 = 0.15;

pub const BULLET_COLLISION_RADIUS: f32 = 4.0;

pub const ENEMY_HP: u32 = 2;
pub const CHASER_SPEED: f32 = 0.5;
pub const SHOOTER_SPEED: f32 = 0.3;
pub const BOMBER_SPEED: f32 = 0.3;
/// Frames on every armed enemy's attack timer: a shooter's fire interval,
/// a bomber's fuse.
pub const ATTACK_INTERVAL: i32 = 60;
pub const SHOOTER_FIRE_INTERVAL: i32 = ATTACK_INTERVAL;
pub const BOMBER_FUSE: i32 = ATTACK_INTERVAL;
/// Contact distance that sets a bomber off.
pub const BOMBER_TRIGGER_DISTANCE: f32 = 8.0;
/// Blast reach when splash damage is enabled.
pub const BOMBER_BLAST_RADIUS: f32 = 16.0;

pub const SCORE_PER_KILL: u32 = 100;
pub const DECORATION_SPRITES: u8 = 4;

/// Attempts per requested enemy before placement gives up.
pub const PLACEMENT_ATTEMPTS_PER_ENEMY: usize = 200;

// ── Runtime configuration ────────────────────────────────────────────────────

/// Cellular-automaton parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaveParams {
    /// Chance an interior cell starts as Wall.
    pub wall_probability: f64,
    /// Number of smoothing passes.
    pub iterations: u32,
    /// Wall neighbours (out of 8) needed for a cell to become Wall.
    pub threshold: u8,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            wall_probability: 0.45,
            iterations: 5,
            threshold: 5,
        }
    }
}

/// Fractal Perlin parameters for the noise terrain style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    /// Samples below this become Wall.
    pub wall_below: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            scale: 0.05,
            octaves: 2,
            persistence: 0.5,
            wall_below: -0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapStyle {
    Cave(CaveParams),
    Noise(NoiseParams),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Map width in tiles.
    pub map_width: usize,
    /// Map height in tiles.
    pub map_height: usize,
    pub style: MapStyle,
    /// Safe-zone radius in tiles around the spawn point.
    pub safe_zone_radius: usize,
    pub enemy_count: usize,
    /// Chance a floor tile receives a decoration.
    pub decoration_density: f64,
    pub seed: u64,
    /// Apply blast damage when a bomber detonates next to an unshielded player.
    pub bomber_splash: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 128,
            map_height: 128,
            style: MapStyle::Cave(CaveParams::default()),
            safe_zone_radius: 4,
            enemy_count: 20,
            decoration_density: 0.03,
            seed: 42,
            bomber_splash: false,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reject parameters the generators cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width < 3 || self.map_height < 3 {
            return Err(ConfigError::MapTooSmall {
                width: self.map_width,
                height: self.map_height,
            });
        }
        if 2 * self.safe_zone_radius + 1 > self.map_width.min(self.map_height) {
            return Err(ConfigError::SafeZoneTooLarge(self.safe_zone_radius));
        }
        if !(0.0..=1.0).contains(&self.decoration_density) {
            return Err(ConfigError::DecorationDensity(self.decoration_density));
        }
        match self.style {
            MapStyle::Cave(cave) => {
                if !(0.0..=1.0).contains(&cave.wall_probability) {
                    return Err(ConfigError::WallProbability(cave.wall_probability));
                }
                if cave.threshold > 8 {
                    return Err(ConfigError::Threshold(cave.threshold));
                }
            }
            MapStyle::Noise(noise) => {
                if !(noise.scale.is_finite() && noise.scale > 0.0) {
                    return Err(ConfigError::NoiseScale(noise.scale));
                }
                if noise.octaves == 0 {
                    return Err(ConfigError::NoiseOctaves);
                }
                if !(noise.persistence.is_finite() && noise.persistence > 0.0) {
                    return Err(ConfigError::NoisePersistence(noise.persistence));
                }
            }
        }
        Ok(())
    }

    /// Map size in world pixels.
    pub fn map_size_px(&self) -> (f32, f32) {
        (
            self.map_width as f32 * TILE_SIZE,
            self.map_height as f32 * TILE_SIZE,
        )
    }
}

/// Seed carried by an environment variable lookup. `Ok(None)` when the
/// variable is unset; a value that is not a `u64` is an error.
pub fn parse_seed_var(var: Result<String, VarError>) -> Result<Option<u64>, GameError> {
    match var {
        Ok(value) => {
            let parsed = value.trim().parse::<u64>();
            match parsed {
                Ok(seed) => Ok(Some(seed)),
                Err(source) => Err(GameError::InvalidSeed { value, source }),
            }
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(GameError::SeedNotUnicode(raw)),
    }
}
