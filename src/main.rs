mod display;
mod host;

use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use log::{error, info};
use rand::rngs::ThreadRng;
use rand::thread_rng;

use wall_shooter::config::Tuning;
use wall_shooter::entities::{InputAction, Phase};
use wall_shooter::session::Session;

use crate::host::HostWorld;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Title screen ──────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_title<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    last_score: Option<u32>,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "▶  WALL  SHOOTER  ◀";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if let Some(score) = last_score {
        let score_str = format!("Last Score: {}", score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(score_str.chars().count() as u16 / 2),
            cy.saturating_sub(5),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&score_str))?;
    }

    let lines: &[(&str, Color)] = &[
        ("Shoot the targets before the wall reaches you.", Color::White),
        ("Every cleared target speeds the wall up.", Color::DarkGrey),
        ("Score thresholds let you pick an upgrade.", Color::DarkGrey),
        ("", Color::DarkGrey),
        ("[ENTER] Start    [Q] Quit", Color::Green),
    ];
    for (i, (line, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            cy.saturating_sub(2) + i as u16,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*line))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Title,
}

/// Drive one session until the player quits or returns to the title.
///
/// Held keys are tracked per frame in `key_frame` (last press/repeat frame),
/// so movement, dash and fire can all be held at once.  One-shot actions
/// (slow motion, upgrade picks, restart) fire on the press itself.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session<ThreadRng>,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let mut world = HostWorld::new();
    world.apply(session.drain_events());

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        key_frame.insert(KeyCode::Char('x'), frame);
                    }
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(LoopExit::Quit);
                        }
                        _ => {}
                    }
                    if let Some(exit) = handle_press(session, &mut world, code) {
                        return Ok(exit);
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held-key actions every frame ────────────────────────────────
        if !session.is_game_over() {
            let up = any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame);
            let down = any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame);
            let dash = any_held(
                &key_frame,
                &[KeyCode::Char('x'), KeyCode::Char('X'), KeyCode::Char('W'), KeyCode::Char('S')],
                frame,
            );
            let fire = is_held(&key_frame, &KeyCode::Char(' '), frame);

            if up {
                session.on_input(InputAction::MoveUp);
            }
            if down {
                session.on_input(InputAction::MoveDown);
            }
            if dash {
                session.on_input(InputAction::Dash);
            }
            if fire {
                session.on_input(InputAction::Fire);
            }
        }

        let now = Instant::now();
        let real_dt = now - last;
        last = now;

        session.tick(real_dt);
        world.apply(session.drain_events());

        for contact in world.step(real_dt.as_secs_f32(), session) {
            session.on_collision(contact);
            world.apply(session.drain_events());
        }

        display::render(out, session, &world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

/// One-shot key handling.  Returns `Some` when the loop should end.
fn handle_press(
    session: &mut Session<ThreadRng>,
    world: &mut HostWorld,
    code: KeyCode,
) -> Option<LoopExit> {
    match (session.phase(), code) {
        (Phase::GameOver, KeyCode::Char('r') | KeyCode::Char('R')) => {
            session.restart();
            world.reset();
            world.apply(session.drain_events());
        }
        (Phase::GameOver, KeyCode::Char('t') | KeyCode::Char('T')) => {
            return Some(LoopExit::Title);
        }
        (Phase::UpgradePause, KeyCode::Char(c)) => {
            let picked = c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(|i| session.pending_choices().get(i).copied());
            if let Some(option) = picked {
                session.on_upgrade_chosen(option.kind);
                world.apply(session.drain_events());
            }
        }
        (_, KeyCode::Char('r') | KeyCode::Char('R')) => {
            session.on_input(InputAction::ActivateSlowMotion);
            world.apply(session.drain_events());
        }
        _ => {}
    }
    None
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn Error>> {
    simple_logging::log_to_file("wall_shooter.log", log::LevelFilter::Info)?;
    info!("Starting wall_shooter.");

    let tuning = match env::args().nth(1) {
        Some(path) => Tuning::load(Path::new(&path)).map_err(|e| {
            error!("{}", e);
            e
        })?,
        None => Tuning::default(),
    };
    tuning.validate()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
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
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &tuning);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("Exiting with error: {}", e);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tuning: &Tuning,
) -> Result<(), Box<dyn Error>> {
    let mut last_score = None;

    loop {
        match show_title(out, rx, last_score)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut session = Session::new(tuning.clone(), thread_rng())?;
                let exit = game_loop(out, &mut session, rx)?;
                last_score = session.return_to_title().or(last_score);

                if let LoopExit::Quit = exit {
                    break;
                }
            }
        }
    }
    Ok(())
}
