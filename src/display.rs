/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// world and game state. One terminal cell shows one tile; row 0 is the HUD
/// and the last row the controls hint.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use cave_shooter::camera::camera_offset;
use cave_shooter::config::TILE_SIZE;
use cave_shooter::entities::{
    BulletOwner, EnemyKind, GameState, GameStatus, Shield, Tile,
};
use cave_shooter::world::World;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_WALL: Color = Color::DarkGrey;
const C_DECORATION: Color = Color::DarkGreen;
const C_HUD_HP: Color = Color::Red;
const C_HUD_SHIELD: Color = Color::Cyan;
const C_HUD_TEXT: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_SHIELDED: Color = Color::Yellow;
const C_ORBIT: Color = Color::Cyan;
const C_CHASER: Color = Color::Green;
const C_SHOOTER: Color = Color::Red;
const C_BOMBER: Color = Color::Yellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

const DECORATION_GLYPHS: [char; 4] = ['.', ',', '\'', '"'];

/// Terminal rows taken by the HUD and the hint line.
pub const CHROME_ROWS: u16 = 2;

// ── Viewport ─────────────────────────────────────────────────────────────────

/// The slice of the map visible this frame, in cells and world pixels.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub camera: (f32, f32),
}

impl Viewport {
    pub fn new(world: &World, state: &GameState, width: u16, height: u16) -> Self {
        let cols = width;
        let rows = height.saturating_sub(CHROME_ROWS);
        let window = (cols as f32 * TILE_SIZE, rows as f32 * TILE_SIZE);
        let camera = camera_offset((state.player.x, state.player.y), window, world.size_px());
        Self { cols, rows, camera }
    }

    /// Terminal cell for a world point, or `None` when off-screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = ((x - self.camera.0) / TILE_SIZE).floor();
        let row = ((y - self.camera.1) / TILE_SIZE).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16 + 1))
    }

    /// World point at the centre of a terminal cell.
    pub fn cell_to_screen_px(&self, column: u16, row: u16) -> (f32, f32) {
        (
            column as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            row.saturating_sub(1) as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        )
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    world: &World,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_tiles(out, world, view)?;
    for deco in &world.decorations {
        if let Some((c, r)) = view.cell(deco.x, deco.y) {
            out.queue(cursor::MoveTo(c, r))?;
            out.queue(style::SetForegroundColor(C_DECORATION))?;
            let glyph = DECORATION_GLYPHS[deco.sprite as usize % DECORATION_GLYPHS.len()];
            out.queue(Print(glyph))?;
        }
    }
    for enemy in &state.enemies {
        if let Some((c, r)) = view.cell(enemy.x, enemy.y) {
            let (glyph, color) = match enemy.kind() {
                EnemyKind::Chaser => ('◆', C_CHASER),
                EnemyKind::Shooter => ('◎', C_SHOOTER),
                EnemyKind::Bomber => ('●', C_BOMBER),
            };
            out.queue(cursor::MoveTo(c, r))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(glyph))?;
        }
    }
    for bullet in &state.bullets {
        if let Some((c, r)) = view.cell(bullet.x, bullet.y) {
            let (glyph, color) = match bullet.owner {
                BulletOwner::Player => ('•', C_BULLET_PLAYER),
                BulletOwner::Enemy => ('∘', C_BULLET_ENEMY),
            };
            out.queue(cursor::MoveTo(c, r))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(glyph))?;
        }
    }

    draw_player(out, state, view)?;
    draw_hud(out, state, view)?;
    draw_controls_hint(out, view)?;

    if state.status != GameStatus::Playing {
        draw_end_overlay(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows + 1))?;
    out.flush()?;
    Ok(())
}

// ── Map ───────────────────────────────────────────────────────────────────────

fn draw_tiles<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let start_tx = (view.camera.0 / TILE_SIZE).floor() as usize;
    let start_ty = (view.camera.1 / TILE_SIZE).floor() as usize;

    out.queue(style::SetForegroundColor(C_WALL))?;
    for row in 0..view.rows {
        let line: String = (0..view.cols as usize)
            .map(|col| match world.grid.get(start_tx + col, start_ty + row as usize) {
                Some(Tile::Wall) => '█',
                Some(Tile::Floor) => ' ',
                None => ' ',
            })
            .collect();
        out.queue(cursor::MoveTo(0, row + 1))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Player ────────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let p = &state.player;
    if let Some((c, r)) = view.cell(p.x, p.y) {
        let color = if p.shield_active() { C_PLAYER_SHIELDED } else { C_PLAYER };
        out.queue(cursor::MoveTo(c, r))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print('@'))?;
    }

    // Orbiting marker one tile out while the shield is up
    if p.shield_active() {
        let ox = p.x + p.orbit_angle.cos() * TILE_SIZE;
        let oy = p.y + p.orbit_angle.sin() * TILE_SIZE;
        if let Some((c, r)) = view.cell(ox, oy) {
            out.queue(cursor::MoveTo(c, r))?;
            out.queue(style::SetForegroundColor(C_ORBIT))?;
            out.queue(Print('*'))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(format!("HP:{:<4}", "♥".repeat(state.player.hp as usize))))?;

    let shield = match state.player.shield {
        Shield::Inactive => "Shield: READY".to_string(),
        Shield::Active(t) => format!("Shield: UP {:>2}", t),
        Shield::Cooldown(t) => format!("Shield: --  {:>2}", t),
    };
    out.queue(style::SetForegroundColor(C_HUD_SHIELD))?;
    out.queue(Print(format!("  {}", shield)))?;

    let reload = if state.player.can_shoot() { "▮" } else { "▯" };
    out.queue(style::SetForegroundColor(C_HUD_TEXT))?;
    out.queue(Print(format!("  Gun:{}  Enemies:{:>3}", reload, state.enemies.len())))?;

    let score = format!("Score:{:>6}", state.score);
    let sx = view.cols.saturating_sub(score.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(score))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "WASD/ZQSD/arrows: Move   Click/SPACE: Shoot   Right click/E: Shield   ESC: Quit",
    ))?;
    Ok(())
}

// ── Game-over / cleared overlay ───────────────────────────────────────────────

fn draw_end_overlay<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let (banner, color): ([&str; 3], Color) = match state.status {
        GameStatus::Cleared => (
            [
                "╔════════════════════╗",
                "║    CAVE  CLEARED   ║",
                "╚════════════════════╝",
            ],
            Color::Green,
        ),
        _ => (
            [
                "╔════════════════════╗",
                "║    GAME  OVER      ║",
                "╚════════════════════╝",
            ],
            Color::Red,
        ),
    };
    let score_line = format!("Final Score: {:>6}", state.score);
    let hint = "R - New Cave  Q - Quit";

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(2);

    for (i, msg) in banner.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(*msg))?;
    }

    let row = start_row + banner.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    Ok(())
}
