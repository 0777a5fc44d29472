/// Rendering layer.  All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session and host world.  No game logic is performed; this module only
/// translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use wall_shooter::entities::{Phase, Vec2};
use wall_shooter::lottery::RandomSource;
use wall_shooter::session::Session;

use crate::host::HostWorld;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_SLOWMO: Color = Color::Cyan;
const C_HUD_EMPTY: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_WALL: Color = Color::DarkGrey;
const C_TARGET: Color = Color::Red;
const C_PROJECTILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_BANNER: Color = Color::Green;

/// Maps world coordinates onto the bordered play area.
struct Viewport {
    min_x: f32,
    max_x: f32,
    half_height: f32,
    width: u16,
    height: u16,
}

impl Viewport {
    fn new<R: RandomSource>(session: &Session<R>, width: u16, height: u16) -> Self {
        let tuning = session.tuning();
        Viewport {
            min_x: tuning.wall_breach_x - 1.0,
            max_x: tuning.wall_spawn_x + 1.0,
            half_height: tuning.target_y_range.max(tuning.player_y_limit) + 0.5,
            width,
            height,
        }
    }

    /// Terminal cell for a world point, if it lies inside the play area.
    fn cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let cols = self.width.saturating_sub(2) as f32;
        let rows = self.height.saturating_sub(5) as f32;
        let fx = (p.x - self.min_x) / (self.max_x - self.min_x);
        let fy = (self.half_height - p.y) / (2.0 * self.half_height);
        if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
            return None;
        }
        let col = 1 + (fx * (cols - 1.0)).round() as u16;
        let row = 2 + (fy * (rows - 1.0)).round() as u16;
        Some((col, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write, R: RandomSource>(
    out: &mut W,
    session: &Session<R>,
    world: &HostWorld,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(session, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, session, world, width)?;
    draw_wall(out, session, &view)?;
    draw_projectiles(out, world, &view)?;
    draw_player(out, session, &view)?;
    draw_controls_hint(out, height)?;

    match session.phase() {
        Phase::UpgradePause => draw_upgrade_choices(out, world, width, height)?,
        Phase::GameOver => draw_game_over(out, world, width, height)?,
        Phase::Running | Phase::SlowMotion => {
            if let Some(banner) = &world.banner {
                draw_centered(out, banner, C_BANNER, width, 2)?;
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write, R: RandomSource>(
    out: &mut W,
    session: &Session<R>,
    world: &HostWorld,
    width: u16,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Next:{:>6}  Wall:{:>5.1}",
        world.score,
        session.upgrade_threshold(),
        session.wall().speed()
    )))?;

    let slow_tag = if session.phase() == Phase::SlowMotion {
        "[SLOW] "
    } else {
        ""
    };
    let slow_str = format!(
        "{}SlowMo: {}/{}",
        slow_tag, world.slow_motion_remaining, world.slow_motion_max
    );
    let color = if world.slow_motion_remaining == 0 {
        C_HUD_EMPTY
    } else {
        C_HUD_SLOWMO
    };
    let rx = width.saturating_sub(slow_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&slow_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_wall<W: Write, R: RandomSource>(
    out: &mut W,
    session: &Session<R>,
    view: &Viewport,
) -> std::io::Result<()> {
    let wall = session.wall();
    let top = view.cell(Vec2::new(wall.x(), view.half_height));
    let bottom = view.cell(Vec2::new(wall.x(), -view.half_height));
    let (Some((col, top_row)), Some((_, bottom_row))) = (top, bottom) else {
        return Ok(());
    };

    out.queue(style::SetForegroundColor(C_WALL))?;
    for row in top_row..=bottom_row {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("█"))?;
    }

    out.queue(style::SetForegroundColor(C_TARGET))?;
    for target in wall.alive_targets() {
        if let Some((col, row)) = view.cell(Vec2::new(wall.x(), target.y)) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("◎"))?;
        }
    }
    Ok(())
}

fn draw_projectiles<W: Write>(
    out: &mut W,
    world: &HostWorld,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
    for p in &world.projectiles {
        if let Some((col, row)) = view.cell(p.position) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("•"))?;
        }
    }
    Ok(())
}

fn draw_player<W: Write, R: RandomSource>(
    out: &mut W,
    session: &Session<R>,
    view: &Viewport,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(session.ship_position()) {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("▶"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "↑ ↓ / W S : Move   X : Dash   SPACE : Shoot   R : Slow-mo   Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    text: &str,
    color: Color,
    width: u16,
    row: u16,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_upgrade_choices<W: Write>(
    out: &mut W,
    world: &HostWorld,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let start_row = (height / 2).saturating_sub(3);
    let lines = [
        "╔════════════════════╗",
        "║   UPGRADE  TIME!   ║",
        "╚════════════════════╝",
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_centered(out, line, Color::Yellow, width, start_row + i as u16)?;
    }

    for (i, choice) in world.choices.iter().enumerate() {
        let line = format!("[{}] {:<16}", i + 1, choice.kind.label());
        draw_centered(out, &line, Color::White, width, start_row + 3 + i as u16)?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    world: &HostWorld,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let start_row = (height / 2).saturating_sub(3);
    let lines = [
        "╔════════════════════╗",
        "║    GAME  OVER      ║",
        "╚════════════════════╝",
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_centered(out, line, Color::Red, width, start_row + i as u16)?;
    }

    let score_line = format!("Final Score: {:>6}", world.final_score.unwrap_or(world.score));
    draw_centered(out, &score_line, Color::Yellow, width, start_row + 3)?;
    draw_centered(
        out,
        "R - Play Again  T - Title  Q - Quit",
        Color::White,
        width,
        start_row + 4,
    )?;
    Ok(())
}
