mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use astro_strike::audio::{self, AudioSink, Muted, TerminalBell};
use astro_strike::compute::{init_state, restart, tick};
use astro_strike::config::GameConfig;
use astro_strike::entities::{Difficulty, GameState};
use astro_strike::highscore::{self, HighScoreTable, JsonFileStore, ScoreStore};
use astro_strike::hud::HudText;
use astro_strike::input::KeyTracker;

use display::Viewport;

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

#[derive(Parser, Debug)]
#[command(name = "astro_strike", about = "Terminal space shooter with waves and bosses")]
struct Args {
    /// JSON file overriding gameplay tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Highscore file (default: $HOME/.astro_strike_scores.json)
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Name recorded with highscores (default: $USER)
    #[arg(long)]
    name: Option<String>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here; logging is off without it
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    GameConfig::load(path).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "unusable config; using defaults");
        GameConfig::default()
    })
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    scores: &HighScoreTable,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  ASTRO  STRIKE  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if let Some(top) = scores.entries().first() {
        let hs_str = format!("Best Score: {} ({})", top.score, top.name);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(6),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select difficulty:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Easy  ", Color::Green, "Sparse waves, sturdy hull"),
        ("2", "Medium", Color::Yellow, "Balanced challenge"),
        ("3", "Hard  ", Color::Red, "Dense waves, fragile hull"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 2))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Power-ups (catch falling items):"))?;

    let bonus_info: &[(&str, Color, &str)] = &[
        ("♥", Color::Magenta, " Life        — restore health"),
        ("★", Color::Yellow, " WeaponBoost — upgrade your gun"),
    ];
    for (i, (sym, color, desc)) in bonus_info.iter().enumerate() {
        let row = cy + 3 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 7))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let Ok(ev) = rx.recv() else {
            // Event thread is gone; nothing more can be read
            return Ok(MenuResult::Quit);
        };
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = ev {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Difficulty::Easy)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Difficulty::Medium)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Difficulty::Hard)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Everything the loop hands finished sessions to.
struct Session<'a> {
    store: &'a mut dyn ScoreStore,
    audio: &'a mut dyn AudioSink,
    name: &'a str,
    scores: HighScoreTable,
}

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input is drained at the top of each frame into the `KeyTracker` and read
/// once as an `InputState`.  A terminal status (game over, mission complete)
/// stops ticking; R restarts the session in place.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    session: &mut Session<'_>,
) -> std::io::Result<bool> {
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;
    let mut submitted = false;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        keys.press(&code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                if !submitted {
                                    highscore::submit_unfinished(session.store, session.name, state.score);
                                }
                                return Ok(true);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                if !submitted {
                                    highscore::submit_unfinished(session.store, session.name, state.score);
                                }
                                return Ok(true);
                            }
                            KeyCode::Char('m') | KeyCode::Char('M')
                                if state.status.is_terminal() =>
                            {
                                return Ok(false);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.status.is_terminal() =>
                            {
                                *state = restart(state);
                                state.high_score = state.high_score.max(session.scores.best());
                                keys.clear();
                                submitted = false;
                                tracing::info!(difficulty = ?state.difficulty, "session restarted");
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => keys.press(&code, frame),
                    KeyEventKind::Release => keys.release(&code),
                },
                Event::Mouse(m) => match m.kind {
                    MouseEventKind::Down(MouseButton::Left) => keys.set_mouse_fire(true),
                    MouseEventKind::Up(MouseButton::Left) => keys.set_mouse_fire(false),
                    _ => {}
                },
                _ => {}
            }
        }

        if !state.status.is_terminal() {
            let input = keys.snapshot(frame);
            *state = tick(state, &input, rng);
            audio::dispatch(session.audio, &state.events);
        }

        if state.status.is_terminal() && !submitted {
            session.scores = highscore::submit(session.store, session.name, state.score);
            submitted = true;
        }

        let (cols, rows) = terminal::size()?;
        let hud = HudText::from_state(state);
        display::render(out, Viewport { cols, rows }, state, &hud, &session.scores)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
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

    let result = run(&mut out, &rx, &args);

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

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, args: &Args) -> std::io::Result<()> {
    let config = load_config(args.config.as_ref());
    let mut store = JsonFileStore::new(args.scores.clone().unwrap_or_else(highscore::default_path));
    let name = args
        .name
        .clone()
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "PLAYER".to_string());
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut bell = TerminalBell::new(stdout());
    let mut muted = Muted;
    let audio: &mut dyn AudioSink = if args.mute { &mut muted } else { &mut bell };

    let scores = highscore::load_or_empty(&store);
    tracing::info!(path = %store.path().display(), entries = scores.entries().len(), "highscores loaded");

    let mut session = Session {
        scores,
        store: &mut store,
        audio,
        name: &name,
    };

    loop {
        match show_menu(out, rx, &session.scores)? {
            MenuResult::Quit => break,
            MenuResult::Start(difficulty) => {
                tracing::info!(?difficulty, seed = ?args.seed, player = %name, "session started");
                let mut state = init_state(difficulty, &config, session.scores.best());
                let quit = game_loop(out, &mut state, rx, &mut rng, &mut session)?;
                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
