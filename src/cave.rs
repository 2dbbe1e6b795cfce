/// Tile grid storage and cellular-automaton cave carving.
///
/// Generation is a pure function of its parameters and the injected RNG, so
/// a seeded generator always yields the same grid.
use rand::Rng;

use crate::config::{CaveParams, TILE_SIZE};
use crate::entities::Tile;

// ── Grid ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            cells: vec![tile; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, tx: usize, ty: usize) -> Option<Tile> {
        if tx < self.width && ty < self.height {
            Some(self.cells[ty * self.width + tx])
        } else {
            None
        }
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, tx: usize, ty: usize, tile: Tile) {
        if tx < self.width && ty < self.height {
            self.cells[ty * self.width + tx] = tile;
        }
    }

    pub fn is_border(&self, tx: usize, ty: usize) -> bool {
        tx == 0 || ty == 0 || tx + 1 == self.width || ty + 1 == self.height
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&c| c == tile).count()
    }

    /// One byte per cell, row-major: 0 = Floor, 1 = Wall.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|t| match t {
                Tile::Floor => 0,
                Tile::Wall => 1,
            })
            .collect()
    }

    /// Wall cells among the 8 neighbours of an interior cell.
    fn wall_neighbours(&self, tx: usize, ty: usize) -> u8 {
        let mut walls = 0;
        for ny in ty - 1..=ty + 1 {
            for nx in tx - 1..=tx + 1 {
                if (nx, ny) != (tx, ty) && self.cells[ny * self.width + nx] == Tile::Wall {
                    walls += 1;
                }
            }
        }
        walls
    }

    pub fn force_border_walls(&mut self) {
        for ty in 0..self.height {
            for tx in 0..self.width {
                if self.is_border(tx, ty) {
                    self.set(tx, ty, Tile::Wall);
                }
            }
        }
    }

    /// Tile containing the given world pixel, if it lies on the map.
    pub fn tile_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if x < 0.0 || y < 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let tx = (x / TILE_SIZE).floor() as usize;
        let ty = (y / TILE_SIZE).floor() as usize;
        (tx < self.width && ty < self.height).then_some((tx, ty))
    }

    /// Force every tile of the (2r+1)-square around `(cx, cy)` to Floor,
    /// clipped to the grid.
    pub fn carve_safe_zone(&mut self, cx: usize, cy: usize, radius: usize) {
        let x0 = cx.saturating_sub(radius);
        let y0 = cy.saturating_sub(radius);
        let x1 = cx.saturating_add(radius).min(self.width.saturating_sub(1));
        let y1 = cy.saturating_add(radius).min(self.height.saturating_sub(1));
        for ty in y0..=y1 {
            for tx in x0..=x1 {
                self.set(tx, ty, Tile::Floor);
            }
        }
    }

    /// Pixel-space variant of `carve_safe_zone`.
    pub fn carve_safe_zone_px(&mut self, x: f32, y: f32, radius: usize) {
        let tx = (x.max(0.0) / TILE_SIZE).floor() as usize;
        let ty = (y.max(0.0) / TILE_SIZE).floor() as usize;
        self.carve_safe_zone(tx, ty, radius);
    }
}

/// True if `(tx, ty)` lies within the (2r+1)-square around `(cx, cy)`.
pub fn in_safe_zone(tx: usize, ty: usize, cx: usize, cy: usize, radius: usize) -> bool {
    tx.abs_diff(cx) <= radius && ty.abs_diff(cy) <= radius
}

// ── Generator ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct CaveGenerator {
    pub params: CaveParams,
}

impl CaveGenerator {
    pub fn new(params: CaveParams) -> Self {
        Self { params }
    }

    /// Seed, wall the border, then smooth `iterations` times.
    pub fn generate(&self, width: usize, height: usize, rng: &mut impl Rng) -> TileGrid {
        let mut grid = self.seed(width, height, rng);
        for _ in 0..self.params.iterations {
            grid = self.smooth(&grid);
        }
        grid
    }

    fn seed(&self, width: usize, height: usize, rng: &mut impl Rng) -> TileGrid {
        let mut grid = TileGrid::filled(width, height, Tile::Floor);
        for ty in 1..height.saturating_sub(1) {
            for tx in 1..width.saturating_sub(1) {
                if rng.gen_bool(self.params.wall_probability) {
                    grid.set(tx, ty, Tile::Wall);
                }
            }
        }
        grid.force_border_walls();
        grid
    }

    /// One automaton pass. Reads only from `prev`; borders are copied as-is.
    pub fn smooth(&self, prev: &TileGrid) -> TileGrid {
        let mut next = prev.clone();
        for ty in 1..prev.height.saturating_sub(1) {
            for tx in 1..prev.width.saturating_sub(1) {
                let tile = if prev.wall_neighbours(tx, ty) >= self.params.threshold {
                    Tile::Wall
                } else {
                    Tile::Floor
                };
                next.set(tx, ty, tile);
            }
        }
        next
    }
}
