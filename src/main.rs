mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::Rng;

use cave_shooter::camera::screen_to_world;
use cave_shooter::compute::{init_state, tick};
use cave_shooter::config::{parse_seed_var, GameConfig};
use cave_shooter::entities::{GameState, GameStatus, InputSnapshot};
use cave_shooter::error::GameError;
use cave_shooter::world::{self, World};

use display::Viewport;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// OS key repeat refreshes the entry well before it expires.
const HOLD_WINDOW: u64 = 8;

const SEED_VAR: &str = "CAVE_SHOOTER_SEED";
const LOG_VAR: &str = "CAVE_SHOOTER_LOG";

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

const UP_KEYS: [KeyCode; 5] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Char('z'), KeyCode::Char('Z')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const LEFT_KEYS: [KeyCode; 5] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A'), KeyCode::Char('q'), KeyCode::Char('Q')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config() -> Result<GameConfig, GameError> {
    let seed = match parse_seed_var(std::env::var(SEED_VAR))? {
        Some(seed) => seed,
        None => rand::thread_rng().gen(),
    };
    let config = GameConfig::with_seed(seed);
    config.validate()?;
    Ok(config)
}

/// Logs go to a file, never to the terminal the game draws on.
fn init_logging() -> Result<(), GameError> {
    if let Ok(path) = std::env::var(LOG_VAR) {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    NewCave,
}

/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, so held directions combine freely with shooting.
/// Fire and shield are edge-triggered: they count only on the frame their
/// press (or mouse-down) event arrives. The pointer is the last mouse cell
/// seen, translated to world pixels through this frame's camera.
fn game_loop<W: Write>(
    out: &mut W,
    world: &World,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut pointer_cell: (u16, u16) = (0, 0);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let (width, height) = terminal::size()?;
        let view = Viewport::new(world, state, width, height);
        let mut fire = false;
        let mut shield = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Esc => return Ok(LoopExit::Quit),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q')
                                if state.status != GameStatus::Playing =>
                            {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.status != GameStatus::Playing =>
                            {
                                return Ok(LoopExit::NewCave);
                            }
                            KeyCode::Char(' ') => fire = true,
                            KeyCode::Char('e') | KeyCode::Char('E') => shield = true,
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    pointer_cell = (column, row);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => fire = true,
                        MouseEventKind::Down(MouseButton::Right) => shield = true,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let screen = view.cell_to_screen_px(pointer_cell.0, pointer_cell.1);
        let (pointer_x, pointer_y) = screen_to_world(screen, view.camera);
        let input = InputSnapshot {
            up: is_held(&key_frame, &UP_KEYS, frame),
            down: is_held(&key_frame, &DOWN_KEYS, frame),
            left: is_held(&key_frame, &LEFT_KEYS, frame),
            right: is_held(&key_frame, &RIGHT_KEYS, frame),
            fire,
            shield,
            pointer_x,
            pointer_y,
        };

        if state.status == GameStatus::Playing {
            *state = tick(world, state, &input);
        }

        let view = Viewport::new(world, state, width, height);
        display::render(out, world, state, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging()?;
    let config = load_config()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut config: GameConfig,
) -> Result<(), GameError> {
    loop {
        let (world, enemies) = world::generate(&config)?;
        let mut state = init_state(&world, enemies);
        match game_loop(out, &world, &mut state, rx)? {
            LoopExit::Quit => return Ok(()),
            LoopExit::NewCave => config.seed = config.seed.wrapping_add(1),
        }
    }
}
