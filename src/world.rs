/// One-shot world construction: terrain, safe zone, enemies, decorations.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::cave::{in_safe_zone, CaveGenerator, TileGrid};
use crate::collision::CollisionGrid;
use crate::config::{GameConfig, MapStyle, DECORATION_SPRITES, PLACEMENT_ATTEMPTS_PER_ENEMY, TILE_SIZE};
use crate::enemy::random_kind;
use crate::entities::{Decoration, Enemy, Tile};
use crate::error::ConfigError;
use crate::noise::NoiseGrid;

/// The static part of a session. Built once, then only read.
#[derive(Clone, Debug)]
pub struct World {
    pub grid: TileGrid,
    pub decorations: Vec<Decoration>,
    /// Player spawn point in world pixels.
    pub spawn: (f32, f32),
    pub bomber_splash: bool,
}

impl World {
    pub fn collision(&self) -> CollisionGrid<'_> {
        CollisionGrid::new(&self.grid)
    }

    pub fn is_walkable(&self, x: f32, y: f32) -> bool {
        self.collision().is_walkable(x, y)
    }

    /// Map size in world pixels.
    pub fn size_px(&self) -> (f32, f32) {
        (
            self.grid.width() as f32 * TILE_SIZE,
            self.grid.height() as f32 * TILE_SIZE,
        )
    }
}

/// Centre of a tile in world pixels.
pub fn tile_center(tx: usize, ty: usize) -> (f32, f32) {
    (
        tx as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        ty as f32 * TILE_SIZE + TILE_SIZE / 2.0,
    )
}

/// Build the world and its initial enemy batch from a validated config.
/// The same config always produces the same result.
pub fn generate(config: &GameConfig) -> Result<(World, Vec<Enemy>), ConfigError> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut grid = match config.style {
        MapStyle::Cave(params) => {
            CaveGenerator::new(params).generate(config.map_width, config.map_height, &mut rng)
        }
        MapStyle::Noise(params) => NoiseGrid::new(params).generate(config.map_width, config.map_height),
    };

    let (map_w, map_h) = config.map_size_px();
    let spawn = (map_w / 2.0, map_h / 2.0);
    grid.carve_safe_zone_px(spawn.0, spawn.1, config.safe_zone_radius);
    let spawn_tile = grid
        .tile_at(spawn.0, spawn.1)
        .unwrap_or((config.map_width / 2, config.map_height / 2));

    let enemies = place_enemies(&grid, config.enemy_count, spawn_tile, config.safe_zone_radius, &mut rng);
    let decorations = scatter_decorations(
        &grid,
        config.decoration_density,
        spawn_tile,
        config.safe_zone_radius,
        &mut rng,
    );

    let floor = grid.count(Tile::Floor);
    debug!(
        seed = config.seed,
        width = config.map_width,
        height = config.map_height,
        floor_ratio = floor as f64 / (config.map_width * config.map_height) as f64,
        enemies = enemies.len(),
        decorations = decorations.len(),
        "world generated"
    );

    let world = World {
        grid,
        decorations,
        spawn,
        bomber_splash: config.bomber_splash,
    };
    Ok((world, enemies))
}

/// Drop enemies on random interior Floor tiles outside the safe zone. Gives up
/// after a bounded number of draws, so a nearly solid map yields fewer.
pub fn place_enemies(
    grid: &TileGrid,
    count: usize,
    (cx, cy): (usize, usize),
    radius: usize,
    rng: &mut impl Rng,
) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(count);
    if grid.width() < 3 || grid.height() < 3 {
        return enemies;
    }
    let attempts = count * PLACEMENT_ATTEMPTS_PER_ENEMY;
    for _ in 0..attempts {
        if enemies.len() == count {
            break;
        }
        let tx = rng.gen_range(1..grid.width() - 1);
        let ty = rng.gen_range(1..grid.height() - 1);
        if grid.get(tx, ty) != Some(Tile::Floor) || in_safe_zone(tx, ty, cx, cy, radius) {
            continue;
        }
        let (x, y) = tile_center(tx, ty);
        enemies.push(Enemy::new(x, y, random_kind(rng)));
    }
    if enemies.len() < count {
        warn!(placed = enemies.len(), requested = count, "enemy placement ran out of attempts");
    }
    enemies
}

/// Cosmetic scatter over Floor tiles outside the safe zone.
pub fn scatter_decorations(
    grid: &TileGrid,
    density: f64,
    (cx, cy): (usize, usize),
    radius: usize,
    rng: &mut impl Rng,
) -> Vec<Decoration> {
    let mut decorations = Vec::new();
    for ty in 0..grid.height() {
        for tx in 0..grid.width() {
            if grid.get(tx, ty) != Some(Tile::Floor) || in_safe_zone(tx, ty, cx, cy, radius) {
                continue;
            }
            if rng.gen_bool(density) {
                let (x, y) = tile_center(tx, ty);
                decorations.push(Decoration {
                    x,
                    y,
                    sprite: rng.gen_range(0..DECORATION_SPRITES),
                });
            }
        }
    }
    decorations
}
