use cave_shooter::cave::TileGrid;
use cave_shooter::collision::*;
use cave_shooter::entities::{Bullet, BulletOwner, Tile};

/// 10×10 tiles (80×80 px): walled border, open interior, one pillar at (5, 5).
fn arena() -> TileGrid {
    let mut grid = TileGrid::filled(10, 10, Tile::Floor);
    grid.force_border_walls();
    grid.set(5, 5, Tile::Wall);
    grid
}

fn dot(x: f32, y: f32) -> Bullet {
    Bullet { x, y, vx: 0.0, vy: 0.0, active: true, owner: BulletOwner::Player }
}

// ── is_walkable ───────────────────────────────────────────────────────────────

#[test]
fn floor_is_walkable() {
    let grid = arena();
    let cg = CollisionGrid::new(&grid);
    assert!(cg.is_walkable(12.0, 12.0));
    assert!(cg.is_walkable(8.0, 8.0)); // first pixel of tile (1, 1)
}

#[test]
fn wall_is_not_walkable() {
    let grid = arena();
    let cg = CollisionGrid::new(&grid);
    assert!(!cg.is_walkable(4.0, 40.0)); // border
    assert!(!cg.is_walkable(7.99, 12.0)); // border, last pixel
    assert!(!cg.is_walkable(44.0, 44.0)); // pillar
}

#[test]
fn out_of_range_is_not_walkable() {
    let grid = TileGrid::filled(10, 10, Tile::Floor);
    let cg = CollisionGrid::new(&grid);
    assert!(cg.is_walkable(79.9, 79.9));
    assert!(!cg.is_walkable(80.0, 10.0));
    assert!(!cg.is_walkable(10.0, 80.0));
    assert!(!cg.is_walkable(-0.01, 10.0));
    assert!(!cg.is_walkable(10.0, -5.0));
    assert!(!cg.is_walkable(f32::NAN, 10.0));
}

// ── move_with_collision ───────────────────────────────────────────────────────

#[test]
fn free_move_commits_both_axes() {
    let grid = arena();
    let cg = CollisionGrid::new(&grid);
    let mut b = dot(20.0, 20.0);
    let out = move_with_collision(&mut b, 3.0, -2.0, |x, y| cg.is_walkable(x, y));
    assert_eq!((b.x, b.y), (23.0, 18.0));
    assert!(!out.blocked());
}

#[test]
fn slides_along_wall_when_one_axis_blocked() {
    let grid = arena();
    let cg = CollisionGrid::new(&grid);
    // Next to the left border: x is refused, y still proceeds
    let mut b = dot(9.0, 30.0);
    let out = move_with_collision(&mut b, -2.0, 1.5, |x, y| cg.is_walkable(x, y));
    assert_eq!((b.x, b.y), (9.0, 31.5));
    assert!(out.x_blocked);
    assert!(!out.y_blocked);
}

#[test]
fn y_is_tested_from_updated_x() {
    let grid = arena();
    let cg = CollisionGrid::new(&grid);
    // x moves into column 5; y would then land in the pillar (5, 5)
    let mut b = dot(38.0, 38.0);
    let out = move_with_collision(&mut b, 4.0, 4.0, |x, y| cg.is_walkable(x, y));
    assert_eq!((b.x, b.y), (42.0, 38.0));
    assert!(!out.x_blocked);
    assert!(out.y_blocked);
}

#[test]
fn corner_blocks_both_axes() {
    let grid = arena();
    let cg = CollisionGrid::new(&grid);
    let mut b = dot(9.0, 9.0);
    let out = move_with_collision(&mut b, -3.0, -3.0, |x, y| cg.is_walkable(x, y));
    assert_eq!((b.x, b.y), (9.0, 9.0));
    assert!(out.x_blocked && out.y_blocked);
}

#[test]
fn zero_displacement_is_never_blocked() {
    let mut b = dot(1.0, 1.0);
    let out = move_with_collision(&mut b, 0.0, 0.0, |_, _| false);
    assert_eq!(out, MoveOutcome::default());
    assert_eq!((b.x, b.y), (1.0, 1.0));
}

#[test]
fn within_radius_is_strict() {
    assert!(within_radius(0.0, 0.0, 3.0, 0.0, 4.0));
    assert!(!within_radius(0.0, 0.0, 4.0, 0.0, 4.0));
    assert!(within_radius(1.0, 1.0, 3.0, 3.0, 4.0));
}
