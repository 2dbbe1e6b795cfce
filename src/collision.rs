/// Walkability queries and the shared move-with-collision step.
///
/// Every moving entity goes through `move_with_collision` with the same
/// predicate; none of them carries its own wall logic.
use crate::cave::TileGrid;
use crate::entities::{Bullet, Enemy, Player, Tile};

// ── Walkability ──────────────────────────────────────────────────────────────

/// Read-only view over the map for point queries.
#[derive(Clone, Copy, Debug)]
pub struct CollisionGrid<'a> {
    grid: &'a TileGrid,
}

impl<'a> CollisionGrid<'a> {
    pub fn new(grid: &'a TileGrid) -> Self {
        Self { grid }
    }

    /// True iff `(x, y)` lies on the map and its tile is Floor.
    pub fn is_walkable(&self, x: f32, y: f32) -> bool {
        self.grid
            .tile_at(x, y)
            .and_then(|(tx, ty)| self.grid.get(tx, ty))
            == Some(Tile::Floor)
    }

    pub fn grid(&self) -> &'a TileGrid {
        self.grid
    }
}

// ── Motion ───────────────────────────────────────────────────────────────────

/// Anything with a world-pixel position.
pub trait Mobile {
    fn position(&self) -> (f32, f32);
    fn set_position(&mut self, x: f32, y: f32);
}

macro_rules! impl_mobile {
    ($($ty:ty),*) => {
        $(impl Mobile for $ty {
            fn position(&self) -> (f32, f32) {
                (self.x, self.y)
            }
            fn set_position(&mut self, x: f32, y: f32) {
                self.x = x;
                self.y = y;
            }
        })*
    };
}

impl_mobile!(Player, Bullet, Enemy);

/// Which axes were refused. An axis with zero displacement is never blocked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub x_blocked: bool,
    pub y_blocked: bool,
}

impl MoveOutcome {
    pub fn blocked(&self) -> bool {
        self.x_blocked || self.y_blocked
    }
}

/// Try x first, then y from the possibly updated x. Each axis commits only if
/// its destination is walkable, which lets entities slide along walls.
pub fn move_with_collision<E, F>(entity: &mut E, dx: f32, dy: f32, is_walkable: F) -> MoveOutcome
where
    E: Mobile + ?Sized,
    F: Fn(f32, f32) -> bool,
{
    let (mut x, mut y) = entity.position();
    let mut outcome = MoveOutcome::default();

    if dx != 0.0 {
        if is_walkable(x + dx, y) {
            x += dx;
        } else {
            outcome.x_blocked = true;
        }
    }
    if dy != 0.0 {
        if is_walkable(x, y + dy) {
            y += dy;
        } else {
            outcome.y_blocked = true;
        }
    }

    entity.set_position(x, y);
    outcome
}

/// Squared distance test used by every hit check.
pub fn within_radius(ax: f32, ay: f32, bx: f32, by: f32, radius: f32) -> bool {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy < radius * radius
}
