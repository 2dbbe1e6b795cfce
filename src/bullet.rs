use crate::collision::move_with_collision;
use crate::entities::{Bullet, BulletOwner};

impl Bullet {
    /// `(dir_x, dir_y)` must be a unit vector.
    pub fn new(x: f32, y: f32, dir_x: f32, dir_y: f32, speed: f32, owner: BulletOwner) -> Self {
        Self {
            x,
            y,
            vx: dir_x * speed,
            vy: dir_y * speed,
            active: true,
            owner,
        }
    }

    /// Advance one frame. A refused axis means the bullet hit a wall or the
    /// map edge, and it goes inactive on that same frame.
    pub fn update<F>(&mut self, is_walkable: F)
    where
        F: Fn(f32, f32) -> bool,
    {
        if !self.active {
            return;
        }
        let (vx, vy) = (self.vx, self.vy);
        let outcome = move_with_collision(self, vx, vy, &is_walkable);
        if outcome.blocked() || !is_walkable(self.x, self.y) {
            self.active = false;
        }
    }
}
