mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use display::Viewport;
use monument_defense::compute::{open_instructions, open_stats, return_to_menu, start_game, tick};
use monument_defense::config::{validate_tick_rate, GameConfig};
use monument_defense::engine::Engine;
use monument_defense::entities::{GameState, Screen};
use monument_defense::input::HeldKeys;
use monument_defense::logging::{init_logging, LoggingConfig};
use monument_defense::world::SimWorld;

#[derive(Parser, Debug)]
#[command(name = "monument_defense")]
#[command(about = "Keep the fish away from the monument")]
struct Args {
    /// Seed for enemy placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    tick_hz: u32,

    /// Enemies spawned per run
    #[arg(long)]
    enemies: Option<usize>,

    /// Lives at the start of a run
    #[arg(long)]
    health: Option<u32>,

    /// Where log output goes (defaults to the system temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// env_logger filter, e.g. "debug"; falls back to RUST_LOG, then "info"
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::default();
        if let Some(enemies) = self.enemies {
            config.enemy_count = enemies;
        }
        if let Some(health) = self.health {
            config.starting_health = health;
        }
        config
    }
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this long. Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// Returns true if `key` was seen within the last `HOLD_WINDOW`.
fn is_held(key_seen: &HashMap<KeyCode, Instant>, key: char, now: Instant) -> bool {
    key_seen
        .get(&KeyCode::Char(key))
        .map(|&last| now.duration_since(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn is_code_held(key_seen: &HashMap<KeyCode, Instant>, key: KeyCode, now: Instant) -> bool {
    key_seen
        .get(&key)
        .map(|&last| now.duration_since(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Shift + letter arrives as an upper-case char on classic terminals and as
/// lower-case + SHIFT on enhanced ones; fold both to upper case.
fn normalise(code: KeyCode, modifiers: KeyModifiers) -> KeyCode {
    match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::SHIFT) => {
            KeyCode::Char(c.to_ascii_uppercase())
        }
        other => other,
    }
}

fn held_keys(key_seen: &HashMap<KeyCode, Instant>, now: Instant) -> HeldKeys {
    let held = |lower: char| {
        is_held(key_seen, lower, now) || is_held(key_seen, lower.to_ascii_uppercase(), now)
    };
    let sprint = ['W', 'A', 'S', 'D']
        .iter()
        .any(|&c| is_held(key_seen, c, now));

    HeldKeys {
        forward: held('w'),
        back: held('s'),
        strafe_left: held('a'),
        strafe_right: held('d'),
        turn_left: is_code_held(key_seen, KeyCode::Left, now),
        turn_right: is_code_held(key_seen, KeyCode::Right, now),
        look_up: is_code_held(key_seen, KeyCode::Up, now),
        look_down: is_code_held(key_seen, KeyCode::Down, now),
        sprint,
        fire: held('e') || is_held(key_seen, ' ', now),
        quit: is_code_held(key_seen, KeyCode::Esc, now),
    }
}

// ── Main loop ─────────────────────────────────────────────────────────────────

/// Drives every screen at a fixed rate until the player quits.
///
/// Input model: instead of acting on each key event individually, we keep
/// the instant of the last press/repeat event for every key. Each tick we
/// check which keys are still fresh and hand the snapshot to the rules, so
/// movement, turning and firing can all be held at once. One-shot keys
/// (menu choices) act on the press itself.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    seed: Option<u64>,
    tick_hz: u32,
) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = GameState::new(config);
    let mut world = SimWorld::new();

    let frame = Duration::from_secs_f64(1.0 / f64::from(tick_hz));
    let dt = frame.as_secs_f32();
    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            let code = normalise(code, modifiers);
            match kind {
                KeyEventKind::Press => {
                    key_seen.insert(code.clone(), frame_start);
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    match (state.screen, code) {
                        (Screen::Menu, KeyCode::Char('1')) => {
                            start_game(&mut state, &mut world, &mut rng);
                        }
                        (Screen::Menu, KeyCode::Char('2')) => {
                            open_stats(&mut state);
                        }
                        (Screen::Menu, KeyCode::Char('3')) => {
                            open_instructions(&mut state);
                        }
                        (Screen::Menu, KeyCode::Char('q' | 'Q') | KeyCode::Esc) => {
                            return Ok(());
                        }
                        (
                            Screen::Stats | Screen::Instructions | Screen::GameOver,
                            KeyCode::Char('r' | 'R') | KeyCode::Enter | KeyCode::Backspace,
                        ) => {
                            return_to_menu(&mut state, &mut world);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_seen.insert(code.clone(), frame_start);
                }
                KeyEventKind::Release => {
                    key_seen.remove(&code);
                }
            }
        }

        let input = held_keys(&key_seen, frame_start);
        world.advance(f64::from(dt));
        tick(&mut state, &mut world, &input, dt);

        if world.quit_requested() {
            info!("leaving from play, score={}", state.score);
            return Ok(());
        }

        let (width, height) = terminal::size().context("reading terminal size")?;
        display::render(out, &state, Viewport { width, height }).context("drawing frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = args.game_config();
    config.validate().context("invalid game configuration")?;
    validate_tick_rate(args.tick_hz).context("invalid --tick-hz")?;

    let mut logging = LoggingConfig {
        filter: args.log_level.clone(),
        ..LoggingConfig::default()
    };
    if let Some(path) = &args.log_file {
        logging.file = path.clone();
    }
    let log_path = logging.file.clone();
    init_logging(logging)
        .with_context(|| format!("creating log file {}", log_path.display()))?;
    info!("starting: {:?}", args);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

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
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, config, args.seed, args.tick_hz);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    }
    result
}
