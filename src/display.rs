//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands.

use std::f32::consts::FRAC_PI_2;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec3;
use monument_defense::entities::{GameState, Screen, SwingState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_BORDER: Color = Color::DarkBlue;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_MONUMENT: Color = Color::Grey;
const C_PROJECTILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Terminal size in cells.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever screen is active.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.screen {
        Screen::Menu => draw_menu(out, view)?,
        Screen::Stats => draw_stats(out, state, view)?,
        Screen::Instructions => draw_instructions(out, view)?,
        Screen::Playing => draw_island(out, state, view)?,
        Screen::GameOver => {
            draw_island(out, state, view)?;
            draw_game_over(out, state, view)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn centred<W: Write>(out: &mut W, view: Viewport, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (view.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let cy = view.height / 2;
    centred(out, view, cy.saturating_sub(5), "≈≈  MONUMENT  DEFENSE  ≈≈", C_TITLE)?;
    centred(out, view, cy.saturating_sub(4), "the fish are coming for the monument", C_HINT)?;

    let options: &[(&str, &str, Color)] = &[
        ("1", "Play        ", Color::Green),
        ("2", "Stats       ", Color::Yellow),
        ("3", "Instructions", Color::White),
        ("Q", "Quit        ", Color::Red),
    ];
    for (i, (key, label, color)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo((view.width / 2).saturating_sub(9), row))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*label))?;
    }
    Ok(())
}

fn draw_stats<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let cy = view.height / 2;
    centred(out, view, cy.saturating_sub(3), "STATISTICS", C_TITLE)?;
    centred(out, view, cy.saturating_sub(1), "High score", C_HINT)?;
    centred(out, view, cy, &format!("{}", state.high_score), C_HUD_LIVES)?;
    centred(out, view, cy + 3, "[R] Return", C_HINT)?;
    Ok(())
}

fn draw_instructions<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("INSTRUCTIONS", C_TITLE),
        ("", C_HINT),
        ("Fish swim toward the monument from every corner of the island.", Color::White),
        ("Each one that reaches it costs a life. Shoot them first.", Color::White),
        ("", C_HINT),
        ("W A S D      move            SHIFT + move   sprint", C_HINT),
        ("← →          turn            ↑ ↓            look up / down", C_HINT),
        ("E / SPACE    swing and shoot ESC            quit the game", C_HINT),
        ("", C_HINT),
        ("[R] Return", C_HINT),
    ];
    let start = (view.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        centred(out, view, start + i as u16, text, *color)?;
    }
    Ok(())
}

// ── Island radar ──────────────────────────────────────────────────────────────

/// Maps a world position onto the play area inside the border; +z is up.
fn to_cell(pos: Vec3, half: f32, view: Viewport) -> Option<(u16, u16)> {
    let cols = view.width.saturating_sub(2) as f32;
    let rows = view.height.saturating_sub(4) as f32;
    if cols < 1.0 || rows < 1.0 || half <= 0.0 {
        return None;
    }
    let u = (pos.x + half) / (2.0 * half);
    let v = (half - pos.z) / (2.0 * half);
    if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
        return None;
    }
    let col = 1 + ((u * (cols - 1.0)).round() as u16);
    let row = 2 + ((v * (rows - 1.0)).round() as u16);
    Some((col, row))
}

fn heading_glyph(yaw: f32) -> &'static str {
    let index = (yaw / FRAC_PI_2).round().rem_euclid(4.0) as usize;
    ["▲", "▶", "▼", "◀"][index]
}

fn draw_island<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    let half = state.config.arena_half_extent;

    if let Some(monument) = &state.monument {
        let extent = state.config.monument_half_extents;
        let corners = (
            to_cell(monument.position + Vec3::new(-extent.x, 0.0, extent.z), half, view),
            to_cell(monument.position + Vec3::new(extent.x, 0.0, -extent.z), half, view),
        );
        if let (Some((left, top)), Some((right, bottom))) = corners {
            out.queue(style::SetForegroundColor(C_MONUMENT))?;
            for row in top..=bottom {
                out.queue(cursor::MoveTo(left, row))?;
                out.queue(Print("█".repeat((right - left + 1) as usize)))?;
            }
        }
    }

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    for enemy in &state.enemies {
        if let Some((col, row)) = to_cell(enemy.position, half, view) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("◆"))?;
        }
    }

    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
    for projectile in &state.projectiles {
        if let Some((col, row)) = to_cell(projectile.position, half, view) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("•"))?;
        }
    }

    if let Some(player) = state.player.as_ref().filter(|p| p.enabled) {
        if let Some((col, row)) = to_cell(player.position, half, view) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_PLAYER))?;
            out.queue(Print(heading_glyph(player.yaw)))?;
        }
    }

    draw_controls_hint(out, view)?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives = {}", state.health)))?;

    let sword = match state.weapon.as_ref().map(|w| w.swing) {
        Some(SwingState::Swinging) => "/",
        _ => "|",
    };
    out.queue(cursor::MoveTo(view.width / 2, 0))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print(sword))?;

    let score = format!("Score: {}", state.score);
    let col = view.width.saturating_sub(score.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD : Move   ← → ↑ ↓ : Look   E / SPACE : Shoot   ESC : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let new_best = state.score > 0 && state.score >= state.high_score;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", state.high_score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let start = (view.height / 2).saturating_sub(3);
    centred(out, view, start, "╔════════════════════╗", Color::Red)?;
    centred(out, view, start + 1, "║     GAME  OVER     ║", Color::Red)?;
    centred(out, view, start + 2, "╚════════════════════╝", Color::Red)?;
    centred(out, view, start + 3, &format!("Final Score: {:>6}", state.score), Color::Yellow)?;
    centred(out, view, start + 4, &best_line, best_color)?;
    centred(out, view, start + 5, "R - Return to menu", Color::White)?;
    Ok(())
}
