use cave_shooter::config::{BULLET_SPEED, PLAYER_SPEED, RELOAD_TIME, SHIELD_COOLDOWN, SHIELD_DURATION};
use cave_shooter::entities::*;
use cave_shooter::player::movement_intent;

fn open(_: f32, _: f32) -> bool {
    true
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

// ── Shield state machine ──────────────────────────────────────────────────────

#[test]
fn shield_activates_from_inactive() {
    assert_eq!(Shield::Inactive.activate(), Shield::Active(SHIELD_DURATION));
}

#[test]
fn shield_request_ignored_while_active_or_cooling() {
    assert_eq!(Shield::Active(5).activate(), Shield::Active(5));
    assert_eq!(Shield::Cooldown(5).activate(), Shield::Cooldown(5));
}

#[test]
fn shield_expires_into_cooldown_then_inactive() {
    assert_eq!(Shield::Active(2).step(), Shield::Active(1));
    assert_eq!(Shield::Active(1).step(), Shield::Cooldown(SHIELD_COOLDOWN));
    assert_eq!(Shield::Cooldown(1).step(), Shield::Inactive);
    assert_eq!(Shield::Inactive.step(), Shield::Inactive);
}

#[test]
fn shield_full_cycle_through_player_update() {
    let mut p = Player::spawn(50.0, 50.0);
    p.update(&InputSnapshot { shield: true, ..idle() }, open);
    // Raised and already counted down once on the same frame
    assert_eq!(p.shield, Shield::Active(SHIELD_DURATION - 1));
    assert!(p.shield_active());

    for _ in 0..SHIELD_DURATION - 1 {
        p.update(&idle(), open);
    }
    assert_eq!(p.shield, Shield::Cooldown(SHIELD_COOLDOWN));

    // Requests during cooldown do nothing
    p.update(&InputSnapshot { shield: true, ..idle() }, open);
    assert_eq!(p.shield, Shield::Cooldown(SHIELD_COOLDOWN - 1));

    for _ in 0..SHIELD_COOLDOWN - 1 {
        p.update(&idle(), open);
    }
    assert_eq!(p.shield, Shield::Inactive);
}

#[test]
fn shield_blocks_hits() {
    let mut p = Player::spawn(0.0, 0.0);
    p.activate_shield();
    assert!(!p.take_hit());
    assert_eq!(p.hp, 3);

    p.shield = Shield::Cooldown(10);
    assert!(p.take_hit());
    assert_eq!(p.hp, 2);
}

#[test]
fn hp_saturates_at_zero() {
    let mut p = Player::spawn(0.0, 0.0);
    p.hp = 0;
    p.take_hit();
    assert_eq!(p.hp, 0);
    assert!(p.is_dead());
}

// ── Fire-rate gating ──────────────────────────────────────────────────────────

#[test]
fn shoot_aims_at_target() {
    let mut p = Player::spawn(10.0, 10.0);
    let b = p.shoot(10.0, 40.0).expect("ready to fire");
    assert_eq!((b.x, b.y), (10.0, 10.0));
    assert_eq!(b.vx, 0.0);
    assert!((b.vy - BULLET_SPEED).abs() < 1e-6);
    assert_eq!(b.owner, BulletOwner::Player);
    assert!(b.active);
    assert_eq!(p.reload_timer, RELOAD_TIME);
}

#[test]
fn shoot_while_reloading_changes_nothing() {
    let mut p = Player::spawn(10.0, 10.0);
    assert!(p.shoot(20.0, 10.0).is_some());
    p.update(&idle(), open);
    let timer = p.reload_timer;

    assert!(!p.can_shoot());
    assert!(p.shoot(20.0, 10.0).is_none());
    assert_eq!(p.reload_timer, timer);
}

#[test]
fn reload_counts_down_to_zero() {
    let mut p = Player::spawn(10.0, 10.0);
    p.shoot(20.0, 10.0);
    for expected in (0..RELOAD_TIME).rev() {
        p.update(&idle(), open);
        assert_eq!(p.reload_timer, expected);
    }
    assert!(p.can_shoot());
    p.update(&idle(), open);
    assert_eq!(p.reload_timer, 0);
}

#[test]
fn shoot_at_own_position_costs_reload_but_spawns_nothing() {
    let mut p = Player::spawn(10.0, 10.0);
    assert!(p.shoot(10.0, 10.0).is_none());
    assert_eq!(p.reload_timer, RELOAD_TIME);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn diagonal_is_not_normalised() {
    let input = InputSnapshot { up: true, right: true, ..idle() };
    assert_eq!(movement_intent(&input), (PLAYER_SPEED, -PLAYER_SPEED));
}

#[test]
fn opposite_keys_cancel() {
    let input = InputSnapshot { left: true, right: true, ..idle() };
    assert_eq!(movement_intent(&input), (0.0, 0.0));
}

#[test]
fn update_moves_through_collision() {
    let mut p = Player::spawn(10.0, 10.0);
    // Walls everywhere with x < 10
    let out = p.update(&InputSnapshot { left: true, down: true, ..idle() }, |x, _| x >= 10.0);
    assert!(out.x_blocked);
    assert_eq!(p.x, 10.0);
    assert!((p.y - (10.0 + PLAYER_SPEED)).abs() < 1e-6);
}

#[test]
fn orbit_angle_advances_and_wraps() {
    let mut p = Player::spawn(10.0, 10.0);
    for _ in 0..1000 {
        p.update(&idle(), open);
        assert!((0.0..std::f32::consts::TAU).contains(&p.orbit_angle));
    }
    assert!(p.orbit_angle > 0.0);
}
