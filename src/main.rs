mod audio;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use shooting_birds::compute::{cursor_step, handle_input, init_state, tick};
use shooting_birds::config::{Args, GameConfig};
use shooting_birds::entities::{Direction, GameState};
use shooting_birds::events::{GameEvent, InputEvent, MouseButton};
use shooting_birds::scene::{Button, Scene};

use audio::AudioSink;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Input translation ─────────────────────────────────────────────────────────

/// Keyboard shortcuts, which depend on the scene.
fn key_input(scene: Scene, code: KeyCode) -> Option<InputEvent> {
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match (scene, code) {
        (Scene::Start, KeyCode::Enter | KeyCode::Char('s')) => Some(InputEvent::Press(Button::Start)),
        (Scene::Start, KeyCode::Char('i')) => Some(InputEvent::Press(Button::Instructions)),
        (Scene::Start, KeyCode::Esc | KeyCode::Char('q')) => Some(InputEvent::Press(Button::Exit)),
        (Scene::ConfirmExit, KeyCode::Char('y')) => Some(InputEvent::Press(Button::Yes)),
        (Scene::ConfirmExit, KeyCode::Char('n') | KeyCode::Esc) => {
            Some(InputEvent::Press(Button::No))
        }
        (Scene::Instructions, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b')) => {
            Some(InputEvent::Press(Button::Back))
        }
        (Scene::Ended, KeyCode::Enter) => Some(InputEvent::Press(Button::Ok)),
        (Scene::Playing { .. }, KeyCode::Char(' ')) => Some(InputEvent::PauseToggle),
        (Scene::Playing { .. }, KeyCode::Char('r')) => Some(InputEvent::Reload),
        (Scene::Playing { .. }, KeyCode::Char('f')) => Some(InputEvent::Fire),
        (_, KeyCode::Char('w')) => Some(cursor_step(0.0, -1.0)),
        (_, KeyCode::Char('s')) => Some(cursor_step(0.0, 1.0)),
        (_, KeyCode::Char('a')) => Some(cursor_step(-1.0, 0.0)),
        (_, KeyCode::Char('d')) => Some(cursor_step(1.0, 0.0)),
        _ => None,
    }
}

/// Mouse reports carry absolute cells; the game wants deltas.
fn mouse_input(state: &GameState, mouse: &MouseEvent) -> std::io::Result<Vec<InputEvent>> {
    let (cols, rows) = terminal::size()?;
    let target = display::cell_to_world(mouse.column, mouse.row, cols, rows);
    let movement = InputEvent::MouseMove {
        dx: target.x - state.cursor.x,
        dy: target.y - state.cursor.y,
    };
    Ok(match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => vec![movement],
        MouseEventKind::Down(event::MouseButton::Left) => {
            vec![movement, InputEvent::MouseDown(MouseButton::Left)]
        }
        MouseEventKind::Down(event::MouseButton::Right) => {
            vec![movement, InputEvent::MouseDown(MouseButton::Right)]
        }
        _ => Vec::new(),
    })
}

// ── Event application ─────────────────────────────────────────────────────────

/// Install a step's new state and voice its events.
/// Returns `true` if the player confirmed exit.
fn apply(
    state: &mut GameState,
    step: (GameState, Vec<GameEvent>),
    audio: &mut dyn AudioSink,
) -> bool {
    let (next, events) = step;
    *state = next;
    let mut quit = false;
    for event in &events {
        match event {
            GameEvent::Quit => quit = true,
            GameEvent::Spawned { .. } | GameEvent::Evicted { .. } => {}
            other => debug!(?other, "game event"),
        }
        if let Some(sound) = audio::sound_for(event) {
            audio.play(sound);
        }
    }
    quit
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player confirms exit (or hits Ctrl-C).
///
/// Input is drained from the reader thread at the top of every frame, so each
/// event is fully applied before that frame's tick. Arrow keys use the same
/// held-key window as movement keys: the look-around request is whatever
/// arrow was seen in the last `HOLD_WINDOW` frames.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    rng: &mut StdRng,
    audio: &mut dyn AudioSink,
) -> Result<()> {
    let frame_time = Duration::from_secs_f32(config.frame_seconds());
    let dt = config.frame_seconds();

    let mut state = init_state(config.round_seconds);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let inputs: Vec<InputEvent> = match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL)
                        {
                            info!("interrupted");
                            return Ok(());
                        }
                        key_frame.insert(code, frame);
                        key_input(state.scene, code).into_iter().collect()
                    }
                    // Repeat: refresh timestamp; only crosshair keys auto-repeat
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                        key_input(state.scene, code)
                            .filter(|input| matches!(input, InputEvent::MouseMove { .. }))
                            .into_iter()
                            .collect()
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                        Vec::new()
                    }
                },
                Event::Mouse(mouse) => mouse_input(&state, &mouse)?,
                _ => Vec::new(),
            };
            for input in inputs {
                let step = handle_input(&state, &input);
                if apply(&mut state, step, audio) {
                    return Ok(());
                }
            }
        }

        // ── Held arrows drive the look-around request ─────────────────────────
        let left = is_held(&key_frame, &KeyCode::Left, frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame);
        let look = match (left, right) {
            (true, false) => Some(Direction::Left),
            (false, true) => Some(Direction::Right),
            _ => None,
        };
        if look != state.look_keys {
            let step = handle_input(&state, &InputEvent::LookKeys(look));
            apply(&mut state, step, audio);
        }

        let step = tick(&state, dt, rng);
        if apply(&mut state, step, audio) {
            return Ok(());
        }

        display::render(out, &state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_path())?;
    let config = GameConfig::from_args(&args)?;
    info!(?config, seed = ?args.seed, "starting");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut audio = audio::open(config.sound);

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

    let result = game_loop(&mut out, &rx, &config, &mut rng, audio.as_mut());

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    info!("bye");
    result
}
