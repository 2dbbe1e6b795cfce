/// Player movement, shield state machine and fire-rate gating.
use std::f32::consts::TAU;

use crate::collision::{move_with_collision, MoveOutcome};
use crate::config::{
    BULLET_SPEED, ORBIT_STEP, PLAYER_HP, PLAYER_SPEED, RELOAD_TIME, SHIELD_COOLDOWN,
    SHIELD_DURATION,
};
use crate::entities::{Bullet, BulletOwner, InputSnapshot, Player, Shield};

impl Shield {
    /// Inactive → Active. Any other state ignores the request.
    pub fn activate(self) -> Shield {
        match self {
            Shield::Inactive => Shield::Active(SHIELD_DURATION),
            other => other,
        }
    }

    /// One frame of countdown.
    pub fn step(self) -> Shield {
        match self {
            Shield::Inactive => Shield::Inactive,
            Shield::Active(t) if t <= 1 => Shield::Cooldown(SHIELD_COOLDOWN),
            Shield::Active(t) => Shield::Active(t - 1),
            Shield::Cooldown(t) if t <= 1 => Shield::Inactive,
            Shield::Cooldown(t) => Shield::Cooldown(t - 1),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Shield::Active(_))
    }
}

/// Requested displacement for this frame. Diagonals are left unnormalised.
pub fn movement_intent(input: &InputSnapshot) -> (f32, f32) {
    let mut dx = 0.0;
    let mut dy = 0.0;
    if input.up {
        dy -= PLAYER_SPEED;
    }
    if input.down {
        dy += PLAYER_SPEED;
    }
    if input.left {
        dx -= PLAYER_SPEED;
    }
    if input.right {
        dx += PLAYER_SPEED;
    }
    (dx, dy)
}

impl Player {
    pub fn spawn(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            hp: PLAYER_HP,
            shield: Shield::Inactive,
            reload_timer: 0,
            orbit_angle: 0.0,
        }
    }

    /// Movement, shield request, then the per-frame timers.
    pub fn update<F>(&mut self, input: &InputSnapshot, is_walkable: F) -> MoveOutcome
    where
        F: Fn(f32, f32) -> bool,
    {
        let (dx, dy) = movement_intent(input);
        let outcome = move_with_collision(self, dx, dy, is_walkable);

        if input.shield {
            self.activate_shield();
        }
        self.shield = self.shield.step();
        self.reload_timer = self.reload_timer.saturating_sub(1);
        self.orbit_angle = (self.orbit_angle + ORBIT_STEP) % TAU;

        outcome
    }

    pub fn activate_shield(&mut self) {
        self.shield = self.shield.activate();
    }

    pub fn shield_active(&self) -> bool {
        self.shield.is_active()
    }

    pub fn can_shoot(&self) -> bool {
        self.reload_timer == 0
    }

    /// Fire toward a world point. Does nothing while reloading. A target on
    /// top of the player still costs the reload but spawns no bullet.
    pub fn shoot(&mut self, target_x: f32, target_y: f32) -> Option<Bullet> {
        if !self.can_shoot() {
            return None;
        }
        self.reload_timer = RELOAD_TIME;

        let dx = target_x - self.x;
        let dy = target_y - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist == 0.0 {
            return None;
        }
        Some(Bullet {
            x: self.x,
            y: self.y,
            vx: dx / dist * BULLET_SPEED,
            vy: dy / dist * BULLET_SPEED,
            active: true,
            owner: BulletOwner::Player,
        })
    }

    /// Apply one hit unless the shield is up. Returns whether hp dropped.
    pub fn take_hit(&mut self) -> bool {
        if self.shield_active() {
            return false;
        }
        self.hp = self.hp.saturating_sub(1);
        true
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}
