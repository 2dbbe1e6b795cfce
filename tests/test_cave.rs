use cave_shooter::cave::*;
use cave_shooter::config::CaveParams;
use cave_shooter::entities::Tile;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn params(p: f64, k: u32, t: u8) -> CaveParams {
    CaveParams { wall_probability: p, iterations: k, threshold: t }
}

fn assert_border_walls(grid: &TileGrid) {
    for ty in 0..grid.height() {
        for tx in 0..grid.width() {
            if grid.is_border(tx, ty) {
                assert_eq!(grid.get(tx, ty), Some(Tile::Wall), "border ({tx},{ty})");
            }
        }
    }
}

// ── TileGrid ──────────────────────────────────────────────────────────────────

#[test]
fn grid_get_out_of_range_is_none() {
    let grid = TileGrid::filled(4, 3, Tile::Floor);
    assert_eq!(grid.get(3, 2), Some(Tile::Floor));
    assert_eq!(grid.get(4, 0), None);
    assert_eq!(grid.get(0, 3), None);
}

#[test]
fn grid_set_out_of_range_is_noop() {
    let mut grid = TileGrid::filled(4, 4, Tile::Floor);
    let before = grid.clone();
    grid.set(4, 0, Tile::Wall);
    grid.set(0, 9, Tile::Wall);
    assert_eq!(grid, before);
}

#[test]
fn tile_at_floors_pixel_coordinates() {
    let grid = TileGrid::filled(10, 10, Tile::Floor);
    assert_eq!(grid.tile_at(0.0, 0.0), Some((0, 0)));
    assert_eq!(grid.tile_at(7.9, 8.0), Some((0, 1)));
    assert_eq!(grid.tile_at(79.9, 79.9), Some((9, 9)));
    assert_eq!(grid.tile_at(80.0, 0.0), None);
    assert_eq!(grid.tile_at(-0.1, 0.0), None);
}

// ── Generation ────────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_grid() {
    let generator = CaveGenerator::new(CaveParams::default());
    let a = generator.generate(64, 48, &mut seeded_rng(7));
    let b = generator.generate(64, 48, &mut seeded_rng(7));
    assert_eq!(a.to_bytes(), b.to_bytes());
}

#[test]
fn different_seeds_differ() {
    let generator = CaveGenerator::new(CaveParams::default());
    let a = generator.generate(64, 48, &mut seeded_rng(1));
    let b = generator.generate(64, 48, &mut seeded_rng(2));
    assert_ne!(a.to_bytes(), b.to_bytes());
}

#[test]
fn border_is_wall_even_when_seeded_empty() {
    // p = 0 seeds no walls at all; the border is forced anyway
    let grid = CaveGenerator::new(params(0.0, 3, 5)).generate(30, 20, &mut seeded_rng(3));
    assert_border_walls(&grid);
}

#[test]
fn border_is_wall_for_default_params() {
    let grid = CaveGenerator::new(CaveParams::default()).generate(50, 50, &mut seeded_rng(11));
    assert_border_walls(&grid);
    assert_eq!(grid.width(), 50);
    assert_eq!(grid.height(), 50);
}

#[test]
fn all_walls_without_smoothing_then_safe_zone() {
    // 20×20, p = 1.0, k = 0 → everything Wall until the carve
    let mut grid = CaveGenerator::new(params(1.0, 0, 5)).generate(20, 20, &mut seeded_rng(0));
    assert_eq!(grid.count(Tile::Floor), 0);

    grid.carve_safe_zone(10, 10, 2);
    assert_eq!(grid.count(Tile::Floor), 25);
    for ty in 8..=12 {
        for tx in 8..=12 {
            assert_eq!(grid.get(tx, ty), Some(Tile::Floor));
        }
    }
    assert_eq!(grid.get(7, 10), Some(Tile::Wall));
    assert_eq!(grid.get(10, 13), Some(Tile::Wall));
}

#[test]
fn smoothing_reads_previous_snapshot() {
    // 5×5: walled border, open 3×3 interior. With t = 4 the interior corners
    // see 5 walls and close; the edge cells see only 3. An in-place pass
    // would count the freshly closed corner and close the edges too.
    let mut grid = TileGrid::filled(5, 5, Tile::Floor);
    grid.force_border_walls();

    let next = CaveGenerator::new(params(0.0, 1, 4)).smooth(&grid);

    for (tx, ty) in [(1, 1), (3, 1), (1, 3), (3, 3)] {
        assert_eq!(next.get(tx, ty), Some(Tile::Wall), "corner ({tx},{ty})");
    }
    for (tx, ty) in [(2, 1), (1, 2), (3, 2), (2, 3), (2, 2)] {
        assert_eq!(next.get(tx, ty), Some(Tile::Floor), "cell ({tx},{ty})");
    }
    // Input untouched
    assert_eq!(grid.get(1, 1), Some(Tile::Floor));
}

#[test]
fn threshold_zero_fills_interior() {
    let grid = CaveGenerator::new(params(0.0, 1, 0)).generate(12, 12, &mut seeded_rng(5));
    assert_eq!(grid.count(Tile::Floor), 0);
}

#[test]
fn threshold_nine_clears_interior() {
    // 8 neighbours can never reach 9
    let grid = CaveGenerator::new(params(1.0, 1, 9)).generate(12, 12, &mut seeded_rng(5));
    assert_eq!(grid.count(Tile::Floor), 10 * 10);
    assert_border_walls(&grid);
}

// ── Safe zone ─────────────────────────────────────────────────────────────────

#[test]
fn safe_zone_is_clipped_at_grid_edge() {
    let mut grid = TileGrid::filled(10, 10, Tile::Wall);
    grid.carve_safe_zone(0, 0, 2);
    assert_eq!(grid.count(Tile::Floor), 9);
    assert_eq!(grid.get(2, 2), Some(Tile::Floor));
    assert_eq!(grid.get(3, 0), Some(Tile::Wall));
}

#[test]
fn safe_zone_from_pixels_uses_enclosing_tile() {
    let mut grid = TileGrid::filled(10, 10, Tile::Wall);
    // (44, 36) lies in tile (5, 4)
    grid.carve_safe_zone_px(44.0, 36.0, 1);
    for ty in 3..=5 {
        for tx in 4..=6 {
            assert_eq!(grid.get(tx, ty), Some(Tile::Floor));
        }
    }
    assert_eq!(grid.count(Tile::Floor), 9);
}

#[test]
fn safe_zone_centred_off_grid_carves_nothing() {
    let mut grid = TileGrid::filled(10, 10, Tile::Wall);
    grid.carve_safe_zone_px(1e30, 1e30, 2);
    grid.carve_safe_zone(usize::MAX, 3, 2);
    grid.carve_safe_zone(20, 20, 2);
    assert_eq!(grid.count(Tile::Floor), 0);
}

#[test]
fn safe_zone_just_off_grid_reaches_back_in() {
    let mut grid = TileGrid::filled(10, 10, Tile::Wall);
    grid.carve_safe_zone(11, 5, 2);
    // only column 9 is within two tiles of x = 11
    assert_eq!(grid.count(Tile::Floor), 5);
    assert_eq!(grid.get(9, 5), Some(Tile::Floor));
}

#[test]
fn in_safe_zone_is_inclusive_square() {
    assert!(in_safe_zone(12, 8, 10, 10, 2));
    assert!(!in_safe_zone(13, 10, 10, 10, 2));
    assert!(in_safe_zone(10, 10, 10, 10, 0));
}
