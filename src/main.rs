//! Terminal front end: logging, key mapping and the fixed-rate loop.

mod display;

use std::fs::{self, File};
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use tracing::{debug, info, trace, warn};
use tracing_subscriber::EnvFilter;

use traveling_dragon::config::{GameConfig, TICK};
use traveling_dragon::engine::{Action, GameEngine};
use traveling_dragon::entities::GameState;
use traveling_dragon::players::PlayerManager;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode for the whole session, so logs go to a file.
/// `RUST_LOG` overrides the default `info` filter.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = File::create(path).with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Input mapping ─────────────────────────────────────────────────────────────

/// Translate a key press into an engine action for the active screen.
fn map_key(state: GameState, key: KeyEvent) -> Option<Action> {
    match state {
        GameState::Menu => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::F(2) => Some(Action::OpenRanking),
            KeyCode::F(3) => Some(Action::OpenConfig),
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char(c) => Some(Action::TypeChar(c)),
            _ => None,
        },
        GameState::StartingRound | GameState::Playing => match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                Some(Action::Flap)
            }
            KeyCode::Esc => Some(Action::Escape),
            _ => None,
        },
        GameState::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Retry),
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => Some(Action::BackToMenu),
            _ => None,
        },
        GameState::Ranking => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => Some(Action::Back),
            _ => None,
        },
        GameState::ConfigScreen => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => Some(Action::Back),
            KeyCode::Right => Some(Action::NextResolution),
            KeyCode::Left => Some(Action::PrevResolution),
            _ => None,
        },
    }
}

// ── Main loop ─────────────────────────────────────────────────────────────────

/// Fixed-rate loop: drain input, tick the engine once, draw. Returns when the
/// player quits from the menu or presses Ctrl-C.
fn run<W: Write>(
    out: &mut W,
    engine: &mut GameEngine,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let frame = Duration::from_secs_f32(TICK);

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                info!("interrupted");
                return Ok(());
            }
            if let Some(action) = map_key(engine.state(), key) {
                engine.handle(action);
            }
        }

        if engine.should_quit() {
            return Ok(());
        }

        engine.update(TICK);
        for cue in engine.drain_cues() {
            trace!(?cue, track = ?engine.track(), "cue");
        }

        display::render(out, engine).context("drawing frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let (config, rejected) = GameConfig::from_env();
    init_logging(&config.log_path)?;
    for err in &rejected {
        warn!(%err, "ignoring environment override");
    }
    info!(
        width = config.width,
        height = config.height,
        save = %config.save_path.display(),
        seed = ?config.seed,
        "starting"
    );

    let players = PlayerManager::load(&config.save_path);
    let mut engine = GameEngine::new(config, players);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide)?;

    // Blocking reads live on their own thread; the loop only polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &mut engine, &rx);

    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = engine.players().save() {
        warn!(%err, "could not save players on exit");
    }
    match &result {
        Ok(()) => debug!("clean exit"),
        Err(err) => warn!(%err, "exiting after error"),
    }
    result
}
