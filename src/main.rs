mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use arcade_shooter::assets::AssetResolver;
use arcade_shooter::config::{self, WorldConfig, FRAME, HOLD_WINDOW};
use arcade_shooter::entities::Key;
use arcade_shooter::{render, Error, World};

use crate::display::TerminalRenderer;

/// Longest frame the simulation will take in one step, in seconds.
const MAX_DT: f64 = 0.25;

fn init_tracing() -> Result<(), Error> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // The terminal belongs to the game, so logs go to a file.
    let path = config::log_file();
    let file = File::create(&path).map_err(|source| Error::Log { path, source })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    std::panic::set_hook(Box::new(|info| {
        let _ = stdout().execute(cursor::Show);
        let _ = stdout().execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let backtrace = std::backtrace::Backtrace::capture();
        error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}

/// Arrows or A/D move, Up/W/Space fire. Anything else is not tracked.
fn map_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Key::Up)
        }
        _ => None,
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: every key event is forwarded to the world as key-down or
/// key-up. Terminals with keyboard enhancement (kitty protocol) report real
/// releases and repeats. Classic terminals only repeat presses, so a key
/// that has not been seen for `HOLD_WINDOW` frames is released here too.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    renderer: &mut TerminalRenderer,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            if kind == KeyEventKind::Press && is_quit(&code, modifiers) {
                return Ok(());
            }
            let Some(key) = map_key(&code) else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    key_frame.insert(key, frame);
                    world.key_down(key);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&key);
                    world.key_up(key);
                }
            }
        }

        key_frame.retain(|key, last| {
            let held = frame.saturating_sub(*last) <= HOLD_WINDOW;
            if !held {
                world.key_up(*key);
            }
            held
        });

        // ── Simulate & draw ───────────────────────────────────────────────────
        let dt = last_tick.elapsed().as_secs_f64().min(MAX_DT);
        last_tick = Instant::now();
        world.advance(dt);

        render::apply(renderer, world.take_render_ops());
        renderer.draw(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Error> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing()?;

    // Sprites and settings must resolve before the terminal is touched.
    let assets = match config::assets_dir() {
        Some(dir) => AssetResolver::load_dir(&dir).inspect_err(|err| {
            error!(%err, "asset resolution failed");
        })?,
        None => AssetResolver::builtin(),
    };
    let rng = match config::seed()? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let tuning = WorldConfig::default();
    let mut world = World::new(tuning, rng);
    let mut renderer = TerminalRenderer::new(assets, tuning.width, tuning.height);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
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

    info!(keyboard_enhanced, "session started");
    let result = game_loop(&mut out, &mut world, &mut renderer, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(score = world.score(), "session ended");
    result.map_err(Error::from)
}
