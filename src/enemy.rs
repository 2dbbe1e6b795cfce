/// Enemy archetype behavior.
///
/// All archetypes share pursuit; the `Behavior` variant adds the rest.
/// `update` never touches other entities directly: anything it wants to
/// happen outside the enemy comes back as an `EnemyAction`.
use rand::Rng;

use crate::collision::move_with_collision;
use crate::config::{
    BOMBER_BLAST_RADIUS, BOMBER_FUSE, BOMBER_SPEED, BOMBER_TRIGGER_DISTANCE, CHASER_SPEED,
    ENEMY_BULLET_SPEED, ENEMY_HP, SHOOTER_FIRE_INTERVAL, SHOOTER_SPEED,
};
use crate::entities::{Behavior, Bullet, BulletOwner, Enemy, EnemyKind, Player};

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyAction {
    Idle,
    Fire(Bullet),
    /// The bomber blew itself up. `player_in_blast` is true when the player
    /// was within blast reach and unshielded.
    Detonate { player_in_blast: bool },
}

pub fn speed_of(kind: EnemyKind) -> f32 {
    match kind {
        EnemyKind::Chaser => CHASER_SPEED,
        EnemyKind::Shooter => SHOOTER_SPEED,
        EnemyKind::Bomber => BOMBER_SPEED,
    }
}

pub fn random_kind(rng: &mut impl Rng) -> EnemyKind {
    match rng.gen_range(0..3) {
        0 => EnemyKind::Chaser,
        1 => EnemyKind::Shooter,
        _ => EnemyKind::Bomber,
    }
}

/// Unit vector and distance from `(fx, fy)` to `(tx, ty)`; `None` when the
/// points coincide.
fn heading(fx: f32, fy: f32, tx: f32, ty: f32) -> Option<(f32, f32, f32)> {
    let dx = tx - fx;
    let dy = ty - fy;
    let dist = (dx * dx + dy * dy).sqrt();
    (dist > 0.0).then(|| (dx / dist, dy / dist, dist))
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind) -> Self {
        let behavior = match kind {
            EnemyKind::Chaser => Behavior::Chaser,
            EnemyKind::Shooter => Behavior::Shooter {
                fire_timer: SHOOTER_FIRE_INTERVAL,
            },
            EnemyKind::Bomber => Behavior::Bomber { fuse: BOMBER_FUSE },
        };
        Self {
            x,
            y,
            hp: ENEMY_HP,
            behavior,
        }
    }

    pub fn speed(&self) -> f32 {
        speed_of(self.kind())
    }

    /// One frame: step toward the player, count the archetype timer down,
    /// and report any fire or detonation.
    pub fn update<F>(&mut self, player: &Player, is_walkable: F) -> EnemyAction
    where
        F: Fn(f32, f32) -> bool,
    {
        let to_player = heading(self.x, self.y, player.x, player.y);
        if let Some((ux, uy, _)) = to_player {
            let speed = self.speed();
            move_with_collision(self, ux * speed, uy * speed, is_walkable);
        }

        match &mut self.behavior {
            Behavior::Chaser => EnemyAction::Idle,
            Behavior::Shooter { fire_timer } => {
                *fire_timer -= 1;
                if *fire_timer > 0 {
                    return EnemyAction::Idle;
                }
                *fire_timer = SHOOTER_FIRE_INTERVAL;
                match heading(self.x, self.y, player.x, player.y) {
                    Some((ux, uy, _)) => EnemyAction::Fire(Bullet::new(
                        self.x,
                        self.y,
                        ux,
                        uy,
                        ENEMY_BULLET_SPEED,
                        BulletOwner::Enemy,
                    )),
                    None => EnemyAction::Idle,
                }
            }
            Behavior::Bomber { fuse } => {
                *fuse -= 1;
                // Distance measured before this frame's step.
                let dist = to_player.map_or(0.0, |(_, _, d)| d);
                if dist < BOMBER_TRIGGER_DISTANCE || *fuse <= 0 {
                    self.hp = 0;
                    EnemyAction::Detonate {
                        player_in_blast: dist < BOMBER_BLAST_RADIUS && !player.shield_active(),
                    }
                } else {
                    EnemyAction::Idle
                }
            }
        }
    }
}
