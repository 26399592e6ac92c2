/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game.  No game logic is performed; world pixels are scaled onto the
/// terminal grid and sprites are drawn at the scaled positions.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use guardian_defense::assets::{Sprite, SpriteSet};
use guardian_defense::compute::Session;
use guardian_defense::entities::{GameMode, Level, HORIZON_LINE};
use guardian_defense::game::Game;
use guardian_defense::{SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_HUD: Color = Color::Yellow;
const C_HORIZON: Color = Color::DarkBlue;
const C_AVATAR: Color = Color::White;
const C_GUARDIAN: Color = Color::Cyan;
const C_ENEMY: Color = Color::Red;
const C_PROJECTILE: Color = Color::Yellow;
const C_WON: Color = Color::Green;
const C_LOST: Color = Color::Red;
const C_ERROR: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── World → terminal mapping ─────────────────────────────────────────────────

/// Terminal area the 640×480 world is squeezed into.  Row 0 is the HUD.
#[derive(Clone, Copy)]
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn current() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self { cols, rows })
    }

    fn field_rows(&self) -> i32 {
        (self.rows as i32 - 2).max(1)
    }

    /// Cell for a world position, or `None` when it lies off the field.
    fn cell(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        let col = x * self.cols as i32 / SCREEN_WIDTH;
        let row = 1 + y * self.field_rows() / SCREEN_HEIGHT;
        Some((col, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for the current mode.
pub fn render<W: Write>(out: &mut W, game: &Game, sprites: &SpriteSet) -> std::io::Result<()> {
    let view = Viewport::current()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match game.mode() {
        GameMode::Menu => draw_menu(out, view, game, sprites)?,
        GameMode::Playing => {
            if let Some(session) = game.session() {
                draw_field(out, view, game, session, sprites)?;
            }
        }
        GameMode::Won => draw_banner(out, view, &sprites.won, C_WON, "The guardian struck the enemy!")?,
        GameMode::Lost => draw_banner(out, view, &sprites.lost, C_LOST, "The fire reached you.")?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    view: Viewport,
    sprite: &Sprite,
    col: i32,
    row: i32,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.lines.iter().enumerate() {
        let r = row + i as i32;
        if r < 1 || r > view.field_rows() || col < 0 || col >= view.cols as i32 {
            continue;
        }
        let room = (view.cols as i32 - col) as usize;
        let clipped: String = line.chars().take(room).collect();
        out.queue(cursor::MoveTo(col as u16, r as u16))?;
        out.queue(Print(clipped))?;
    }
    Ok(())
}

fn centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(
    out: &mut W,
    view: Viewport,
    game: &Game,
    sprites: &SpriteSet,
) -> std::io::Result<()> {
    let title_col = (view.cols as i32 - sprites.title.width() as i32) / 2;
    draw_sprite(out, view, &sprites.title, title_col.max(0), 2, C_TITLE)?;

    let cy = view.rows / 2;
    centered(out, view, cy.saturating_sub(2), "Select difficulty:", Color::White)?;

    let options: &[(Level, Color, &str)] = &[
        (Level::Easy, Color::Green, "slow fire, strong guardian"),
        (Level::Medium, Color::Yellow, "quicker enemy"),
        (Level::Hard, Color::Red, "frequent, fast fire"),
        (Level::Frantic, Color::Magenta, "the enemy races, you crawl"),
    ];
    for (i, (level, color, desc)) in options.iter().enumerate() {
        let line = format!("[{}] {:<8} {}", i + 1, level.label(), desc);
        centered(out, view, cy + i as u16, &line, *color)?;
    }

    if let Some(reason) = game.blocked_reason() {
        centered(out, view, cy + 5, reason, C_ERROR)?;
    }

    centered(
        out,
        view,
        view.rows.saturating_sub(1),
        "← → / A D : Move   ↓ / S : Deploy guardian   ESC / Q : Quit",
        C_HINT,
    )?;
    Ok(())
}

// ── Playing ───────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(
    out: &mut W,
    view: Viewport,
    game: &Game,
    session: &Session,
    sprites: &SpriteSet,
) -> std::io::Result<()> {
    // HUD
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    let level = game.level().map(|l| l.label()).unwrap_or("-");
    let in_flight = session.pool.iter().filter(|p| !p.available()).count();
    out.queue(Print(format!("[ {level} ]  fire: {in_flight}  frame: {}", session.frame)))?;

    // Horizon
    if let Some((_, row)) = view.cell(HORIZON_LINE.x, HORIZON_LINE.y) {
        out.queue(style::SetForegroundColor(C_HORIZON))?;
        out.queue(cursor::MoveTo(0, row as u16))?;
        out.queue(Print("─".repeat(view.cols as usize)))?;
    }

    let draw_at = |out: &mut W, x: i32, y: i32, sprite: &Sprite, color: Color| {
        match view.cell(x, y) {
            Some((col, row)) => draw_sprite(out, view, sprite, col, row, color),
            None => Ok(()),
        }
    };

    draw_at(out, session.enemy.x, session.enemy.y, &sprites.enemy, C_ENEMY)?;
    for projectile in session.pool.iter().filter(|p| !p.available()) {
        draw_at(out, projectile.x, projectile.y, &sprites.projectile, C_PROJECTILE)?;
    }
    draw_at(out, session.guardian.x, session.guardian.y, &sprites.guardian, C_GUARDIAN)?;
    draw_at(out, session.avatar.x, session.avatar.y, &sprites.avatar, C_AVATAR)?;

    centered(
        out,
        view,
        view.rows.saturating_sub(1),
        "← → : Move   ↓ : Deploy guardian   Q : Quit",
        C_HINT,
    )?;
    Ok(())
}

// ── End screens ───────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    view: Viewport,
    sprite: &Sprite,
    color: Color,
    message: &str,
) -> std::io::Result<()> {
    let col = (view.cols as i32 - sprite.width() as i32) / 2;
    let row = (view.rows as i32 / 2 - sprite.lines.len() as i32).max(1);
    draw_sprite(out, view, sprite, col.max(0), row, color)?;
    centered(out, view, (view.rows / 2) + 1, message, color)?;
    centered(out, view, (view.rows / 2) + 3, "ESC / Q : Quit", C_HINT)?;
    Ok(())
}
