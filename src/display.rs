/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// playfield coordinates into terminal cells and queues draw commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use astro_strike::entities::{
    Boss, Bullet, Enemy, EnemyKind, Explosion, GameState, GameStatus, PowerUp, PowerUpKind,
};
use astro_strike::highscore::HighScoreTable;
use astro_strike::hud::HudText;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_INFO: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_BLINK: Color = Color::DarkGrey;
const C_ENEMY_NORMAL: Color = Color::Green;
const C_ENEMY_ELITE: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_BOSS_HIT: Color = Color::White;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_BONUS_LIFE: Color = Color::Magenta;
const C_BONUS_WEAPON: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Terminal area the playfield is mapped onto.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Column for a playfield x coordinate, inside the side walls.
    fn col(&self, x: f32, state: &GameState) -> u16 {
        let inner = self.cols.saturating_sub(2).max(1) as f32;
        let c = 1.0 + (x / state.width()) * inner;
        c.clamp(1.0, self.cols.saturating_sub(2).max(1) as f32) as u16
    }

    /// Row for a playfield y coordinate, between the top and bottom bars.
    fn row(&self, y: f32, state: &GameState) -> u16 {
        let inner = self.rows.saturating_sub(4).max(1) as f32;
        let r = 2.0 + (y / state.height()) * inner;
        r.clamp(2.0, self.rows.saturating_sub(3).max(2) as f32) as u16
    }

    fn cells_wide(&self, w: f32, state: &GameState) -> u16 {
        let inner = self.cols.saturating_sub(2) as f32;
        ((w / state.width()) * inner).round().max(1.0) as u16
    }

    fn cells_tall(&self, h: f32, state: &GameState) -> u16 {
        let inner = self.rows.saturating_sub(4) as f32;
        ((h / state.height()) * inner).round().max(1.0) as u16
    }
}

fn visible(y: f32, h: f32, state: &GameState) -> bool {
    y + h >= 0.0 && y < state.height()
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &GameState,
    hud: &HudText,
    scores: &HighScoreTable,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, view, hud)?;

    for explosion in &state.explosions {
        draw_explosion(out, view, state, explosion)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, view, state, enemy)?;
    }
    if let Some(boss) = &state.boss {
        draw_boss(out, view, state, boss)?;
    }
    for power_up in &state.power_ups {
        draw_power_up(out, view, state, power_up)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, view, state, bullet, C_BULLET_PLAYER, "║")?;
    }
    for bullet in &state.enemy_bullets {
        draw_bullet(out, view, state, bullet, C_BULLET_ENEMY, "•")?;
    }

    draw_player(out, view, state)?;
    draw_controls_hint(out, view)?;

    match state.status {
        GameStatus::Playing => {
            if state.wave.level_clear_timer.is_some() {
                draw_banner(out, view, &[("LEVEL CLEAR", Color::Green)])?;
            }
        }
        GameStatus::GameOver => draw_final(out, view, state, scores, "GAME  OVER", Color::Red)?,
        GameStatus::MissionComplete => {
            draw_final(out, view, state, scores, "MISSION COMPLETE", Color::Green)?
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: Viewport, hud: &HudText) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&hud.score))?;
    out.queue(Print("  "))?;
    out.queue(style::SetForegroundColor(C_HUD_INFO))?;
    out.queue(Print(&hud.level))?;

    // Centre: wave progress or boss health
    let centre = hud.enemies_remaining.chars().count() as u16;
    out.queue(cursor::MoveTo((view.cols / 2).saturating_sub(centre / 2), 0))?;
    out.queue(Print(&hud.enemies_remaining))?;

    // Right: weapon + health, right-aligned
    let right = format!("{}  {}", hud.weapon, hud.health);
    let rx = view.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_INFO))?;
    out.queue(Print(&hud.weapon))?;
    out.queue(Print("  "))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&hud.health))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: Viewport, state: &GameState) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← row y      (tip)
    //  /█\      ← row y+1    (fuselage + wings)
    let p = &state.player;
    // Blink while invincible
    let color = if p.is_invincible() && (p.invincible_timer / 4) % 2 == 0 {
        C_PLAYER_BLINK
    } else {
        C_PLAYER
    };
    out.queue(style::SetForegroundColor(color))?;

    let cx = view.col(p.x + p.w / 2.0, state);
    let top = view.row(p.y, state);
    out.queue(cursor::MoveTo(cx, top))?;
    out.queue(Print("▲"))?;

    let wing_y = top + 1;
    if wing_y < view.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(cx.saturating_sub(1).max(1), wing_y))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &GameState,
    enemy: &Enemy,
) -> std::io::Result<()> {
    if !visible(enemy.y, enemy.h, state) {
        return Ok(());
    }
    let lx = view.col(enemy.x + enemy.w / 2.0, state).saturating_sub(1).max(1);
    let row = view.row(enemy.y.max(0.0), state);
    let (color, top, bottom) = match enemy.kind {
        EnemyKind::Normal => (C_ENEMY_NORMAL, "«▼»", "╚═╝"),
        EnemyKind::Elite => (C_ENEMY_ELITE, "(◎)", "╰─╯"),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(Print(top))?;
    if row + 1 < view.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(lx, row + 1))?;
        out.queue(Print(bottom))?;
    }
    Ok(())
}

fn draw_boss<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &GameState,
    boss: &Boss,
) -> std::io::Result<()> {
    if !visible(boss.y, boss.h, state) {
        return Ok(());
    }
    let left = view.col(boss.x, state);
    let width = view.cells_wide(boss.w, state).max(5) as usize;
    let height = view.cells_tall(boss.h, state).max(2);
    let top = view.row(boss.y.max(0.0), state);
    let color = if boss.is_invincible() { C_BOSS_HIT } else { C_BOSS };
    out.queue(style::SetForegroundColor(color))?;

    let inner = width.saturating_sub(2);
    let filled = (inner * boss.health as usize) / boss.max_health.max(1) as usize;
    for dy in 0..height {
        let row = top + dy;
        if row >= view.rows.saturating_sub(2) {
            break;
        }
        let line = if dy == 0 {
            format!("╔{}╗", "═".repeat(inner))
        } else if dy + 1 == height {
            format!("╚{}╝", "═".repeat(inner))
        } else if dy == 1 {
            // Health bar
            format!("║{}{}║", "█".repeat(filled), " ".repeat(inner - filled))
        } else {
            format!("║{}║", "▓".repeat(inner))
        };
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &GameState,
    bullet: &Bullet,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    if !visible(bullet.y, bullet.h, state) {
        return Ok(());
    }
    out.queue(cursor::MoveTo(
        view.col(bullet.x + bullet.w / 2.0, state),
        view.row(bullet.y.max(0.0), state),
    ))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_explosion<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &GameState,
    explosion: &Explosion,
) -> std::io::Result<()> {
    if !visible(explosion.y, 0.0, state) {
        return Ok(());
    }
    let glyph = if explosion.alpha > 0.6 {
        "✶"
    } else if explosion.alpha > 0.3 {
        "*"
    } else {
        "·"
    };
    out.queue(cursor::MoveTo(
        view.col(explosion.x, state),
        view.row(explosion.y, state),
    ))?;
    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Falling pickups:
///   ♥  (magenta)  Life: restores health
///   ★  (yellow)   WeaponBoost: upgrades the weapon for a while
fn draw_power_up<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &GameState,
    power_up: &PowerUp,
) -> std::io::Result<()> {
    if !visible(power_up.y, 0.0, state) {
        return Ok(());
    }
    let (color, glyph) = match power_up.kind {
        PowerUpKind::Life => (C_BONUS_LIFE, "♥"),
        PowerUpKind::WeaponBoost => (C_BONUS_WEAPON, "★"),
    };
    out.queue(cursor::MoveTo(
        view.col(power_up.x, state),
        view.row(power_up.y, state),
    ))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE / Mouse : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    view: Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

/// Boxed title, final score and the top-10 table.
fn draw_final<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &GameState,
    scores: &HighScoreTable,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let bar = "═".repeat(title.chars().count() + 8);
    let boxed_top = format!("╔{}╗", bar);
    let boxed_mid = format!("║    {}    ║", title);
    let boxed_bot = format!("╚{}╝", bar);
    let score_line = format!("Final Score: {:>6}", state.score);
    let best_line = if state.score >= state.high_score && state.score > 0 {
        format!("★ NEW BEST: {:>6} ★", state.score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };

    let mut lines: Vec<(String, Color)> = vec![
        (boxed_top, color),
        (boxed_mid, color),
        (boxed_bot, color),
        (score_line, Color::Yellow),
        (best_line, Color::DarkGrey),
        (String::new(), Color::Reset),
    ];
    for (i, entry) in scores.entries().iter().enumerate() {
        lines.push((
            format!("{:>2}. {:<12} {:>6}", i + 1, entry.name, entry.score),
            Color::White,
        ));
    }
    lines.push((String::new(), Color::Reset));
    lines.push(("R - Play Again  M - Menu  Q - Quit".to_string(), Color::White));

    let borrowed: Vec<(&str, Color)> = lines.iter().map(|(s, c)| (s.as_str(), *c)).collect();
    draw_banner(out, view, &borrowed)
}
