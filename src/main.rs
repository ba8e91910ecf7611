mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bug_crossing::compute::{handle_input, init_state, tick};
use bug_crossing::config::{Args, Config};
use bug_crossing::entities::GameState;
use bug_crossing::input::{map_key, KeyAction};
use bug_crossing::resources::{load_async, SpriteSheet};
use bug_crossing::scene::Scene;

use display::TerminalSurface;

/// Longest step a single frame may simulate.  Keeps bugs from jumping
/// across the board after the terminal was suspended.
const MAX_FRAME_DT: f32 = 0.25;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The alternate screen owns stdout and stderr, so logs only go to a file.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Input is drained between ticks, never in
/// the middle of one; `dt` is measured once per frame and shared by every
/// entity update.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    sheet: &SpriteSheet,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame_time: Duration,
) -> Result<()> {
    let mut scene = Scene::new();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start
            .duration_since(last)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        last = frame_start;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            match map_key(code, modifiers) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Game(input) => *state = handle_input(state, input, rng),
                KeyAction::Ignore => {}
            }
        }

        *state = tick(state, dt, rng);

        let (width, _) = terminal::size()?;
        let mut surface = TerminalSurface::new(out, sheet, width);
        scene.render(state, &mut surface)?;
        state.result_dirty = false;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = Config::from(Args::parse());
    init_logging(&config)?;
    log::info!("starting with {:?}", config);

    // Start loading before the terminal is taken over; the loop waits on it.
    let sprites = load_async(config.sprite_dir.clone());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let result = run(&mut out, &config, &sprites);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("exiting with error: {:#}", err);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    config: &Config,
    sprites: &mpsc::Receiver<Result<SpriteSheet>>,
) -> Result<()> {
    display::draw_loading(out)?;
    let sheet = sprites
        .recv()
        .context("sprite loader stopped without reporting")??;
    log::info!("sprites ready, {} overridden", sheet.overridden().len());

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

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = init_state(config, &mut rng);
    let frame_time = Duration::from_secs_f64(1.0 / config.fps as f64);

    game_loop(out, &mut state, &sheet, &rx, &mut rng, frame_time)
}
