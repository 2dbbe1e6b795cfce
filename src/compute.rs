/// Pure game-logic functions.
///
/// `tick` takes an immutable reference to the current `GameState` plus the
/// static `World` and this frame's input, and returns a brand-new
/// `GameState`. No randomness: the same inputs always give the same frame.
use tracing::info;

use crate::collision::within_radius;
use crate::config::{BULLET_COLLISION_RADIUS, SCORE_PER_KILL};
use crate::enemy::EnemyAction;
use crate::entities::{Bullet, BulletOwner, Enemy, GameState, GameStatus, InputSnapshot, Player};
use crate::world::World;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Initial state: player on the spawn point, the generated enemy batch, no
/// bullets.
pub fn init_state(world: &World, enemies: Vec<Enemy>) -> GameState {
    GameState {
        player: Player::spawn(world.spawn.0, world.spawn.1),
        enemies,
        bullets: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Collision resolution ─────────────────────────────────────────────────────

/// Player bullets against living enemies. Each bullet hits at most the first
/// enemy in collection order within range. Returns the number of kills.
pub fn resolve_player_bullets(bullets: &mut [Bullet], enemies: &mut [Enemy]) -> u32 {
    let mut kills = 0;
    for bullet in bullets
        .iter_mut()
        .filter(|b| b.active && b.owner == BulletOwner::Player)
    {
        let target = enemies.iter_mut().find(|e| {
            e.is_alive() && within_radius(e.x, e.y, bullet.x, bullet.y, BULLET_COLLISION_RADIUS)
        });
        if let Some(enemy) = target {
            bullet.active = false;
            enemy.hp = enemy.hp.saturating_sub(1);
            if !enemy.is_alive() {
                kills += 1;
            }
        }
    }
    kills
}

/// Enemy bullets against the player. Every bullet in range is consumed; the
/// shield only prevents the damage.
pub fn resolve_enemy_bullets(bullets: &mut [Bullet], player: &mut Player) {
    for bullet in bullets
        .iter_mut()
        .filter(|b| b.active && b.owner == BulletOwner::Enemy)
    {
        if within_radius(player.x, player.y, bullet.x, bullet.y, BULLET_COLLISION_RADIUS) {
            bullet.active = false;
            player.take_hit();
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Order: player → player shot → bullets → bullet hits → enemies → purge of
/// dead enemies and spent bullets → end-of-game check. Anything spawned by
/// an enemy this frame is appended after the enemy pass, so it first moves
/// on the next frame.
///
/// Once the player dies (`GameOver`) or the last enemy is gone (`Cleared`),
/// the simulation stops: further calls return the state unchanged.
pub fn tick(world: &World, state: &GameState, input: &InputSnapshot) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let walkable = |x: f32, y: f32| world.is_walkable(x, y);
    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Player ────────────────────────────────────────────────────────────
    next.player.update(input, walkable);

    // ── 2. Player shot ───────────────────────────────────────────────────────
    if input.fire {
        if let Some(bullet) = next.player.shoot(input.pointer_x, input.pointer_y) {
            next.bullets.push(bullet);
        }
    }

    // ── 3. Bullets ───────────────────────────────────────────────────────────
    for bullet in &mut next.bullets {
        bullet.update(walkable);
    }

    // ── 4. Hits ──────────────────────────────────────────────────────────────
    let kills = resolve_player_bullets(&mut next.bullets, &mut next.enemies);
    next.score += kills * SCORE_PER_KILL;
    resolve_enemy_bullets(&mut next.bullets, &mut next.player);

    // ── 5. Enemies ───────────────────────────────────────────────────────────
    let mut spawned = Vec::new();
    let mut blasts = 0u32;
    for enemy in next.enemies.iter_mut().filter(|e| e.is_alive()) {
        match enemy.update(&next.player, walkable) {
            EnemyAction::Idle => {}
            EnemyAction::Fire(bullet) => spawned.push(bullet),
            EnemyAction::Detonate { player_in_blast } => {
                if player_in_blast {
                    blasts += 1;
                }
            }
        }
    }
    next.bullets.extend(spawned);
    if world.bomber_splash {
        for _ in 0..blasts {
            next.player.take_hit();
        }
    }

    // ── 6. Purge ─────────────────────────────────────────────────────────────
    next.bullets.retain(|b| b.active);
    next.enemies.retain(Enemy::is_alive);

    // ── 7. End of game ───────────────────────────────────────────────────────
    if next.player.is_dead() {
        next.status = GameStatus::GameOver;
        info!(frame = next.frame, score = next.score, "player destroyed");
    } else if next.enemies.is_empty() {
        next.status = GameStatus::Cleared;
        info!(frame = next.frame, score = next.score, "cave cleared");
    }

    next
}
