//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a writer and a read-only view of the engine. World
//! coordinates (screen pixels of the configured resolution) are mapped onto the
//! terminal grid; nothing here changes game state.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use traveling_dragon::config::{GameConfig, TICK_RATE};
use traveling_dragon::engine::GameEngine;
use traveling_dragon::entities::GameState;
use traveling_dragon::scenario::Scenario;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_BIRD: Color = Color::Red;
const C_PIPE: Color = Color::Green;
const C_GROUND: Color = Color::DarkYellow;
const C_WARNING: Color = Color::Red;
const C_HIGHLIGHT: Color = Color::Yellow;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Rows taken by the HUD (top) and the controls hint (bottom).
const HUD_ROWS: u16 = 1;
const HINT_ROWS: u16 = 1;

/// Terminal grid the frame is drawn on.
#[derive(Clone, Copy)]
struct Grid {
    cols: u16,
    rows: u16,
}

impl Grid {
    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(HUD_ROWS + HINT_ROWS).max(1)
    }

    /// World x (pixels) to a terminal column.
    fn col(&self, x: f32, world_width: f32) -> i32 {
        (x / world_width * self.cols as f32).floor() as i32
    }

    /// World y (pixels) to a terminal row inside the play field.
    fn row(&self, y: f32, world_height: f32) -> i32 {
        HUD_ROWS as i32 + (y / world_height * self.field_rows() as f32).floor() as i32
    }

    fn last_field_row(&self) -> i32 {
        (HUD_ROWS + self.field_rows()) as i32 - 1
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever screen is active.
pub fn render<W: Write>(out: &mut W, engine: &GameEngine) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let grid = Grid { cols, rows };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match engine.state() {
        GameState::Menu => draw_menu(out, grid, engine)?,
        GameState::StartingRound | GameState::Playing => {
            draw_field(out, grid, engine.scenario())?;
            draw_hud(out, grid, engine)?;
            draw_transition(out, grid, engine)?;
            draw_hint(out, grid, "SPACE / ↑ : Flap   ESC : Menu")?;
        }
        GameState::GameOver => {
            draw_field(out, grid, engine.scenario())?;
            draw_hud(out, grid, engine)?;
            draw_game_over(out, grid, engine)?;
            draw_hint(out, grid, "R : Play Again   M / ESC : Menu")?;
        }
        GameState::Ranking => {
            draw_ranking(out, grid, engine)?;
            draw_hint(out, grid, "ESC : Back")?;
        }
        GameState::ConfigScreen => {
            draw_config(out, grid, engine.config())?;
            draw_hint(out, grid, "← → : Resolution   ESC : Back")?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn centered<W: Write>(out: &mut W, grid: Grid, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (grid.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_hint<W: Write>(out: &mut W, grid: Grid, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, grid.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, grid: Grid, engine: &GameEngine) -> std::io::Result<()> {
    let cy = grid.rows / 2;

    centered(out, grid, cy.saturating_sub(6), "~~  TRAVELING  DRAGON  ~~", C_TITLE)?;

    let best = engine.players().global_best();
    if best > 0 {
        centered(out, grid, cy.saturating_sub(5), &format!("Best Score: {best}"), C_HIGHLIGHT)?;
    }

    let field = format!("Nickname: [{:<15}]", engine.menu().nickname());
    centered(out, grid, cy.saturating_sub(2), &field, C_TEXT)?;

    if let Some(warning) = engine.menu().warning() {
        centered(out, grid, cy, warning, C_WARNING)?;
    }

    let options: &[(&str, &str)] = &[
        ("ENTER", "Play"),
        ("F2", "Ranking"),
        ("F3", "Config"),
        ("ESC", "Quit"),
    ];
    for (i, (key, label)) in options.iter().enumerate() {
        let row = cy + 2 + i as u16;
        out.queue(cursor::MoveTo((grid.cols / 2).saturating_sub(8), row))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("[{key:>5}] ")))?;
        out.queue(style::SetForegroundColor(C_TEXT))?;
        out.queue(Print(*label))?;
    }
    Ok(())
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(out: &mut W, grid: Grid, scenario: &Scenario) -> std::io::Result<()> {
    let (world_w, world_h) = scenario.screen_size();
    let top = HUD_ROWS as i32;
    let bottom = grid.last_field_row();

    out.queue(style::SetForegroundColor(C_PIPE))?;
    for pipe in scenario.pipes() {
        let left = grid.col(pipe.x(), world_w).max(0);
        let right = grid.col(pipe.body().right(), world_w).min(grid.cols as i32 - 1);
        if right < left {
            continue;
        }
        let gap_top = grid.row(pipe.top_edge(), world_h);
        let gap_bottom = grid.row(pipe.bottom_edge(), world_h);
        let column = "█".repeat((right - left + 1) as usize);
        for row in top..=bottom {
            if row >= gap_top && row <= gap_bottom {
                continue;
            }
            out.queue(cursor::MoveTo(left as u16, row as u16))?;
            out.queue(Print(&column))?;
        }
    }

    out.queue(style::SetForegroundColor(C_GROUND))?;
    out.queue(cursor::MoveTo(0, (bottom + 1) as u16))?;
    out.queue(Print("▔".repeat(grid.cols as usize)))?;

    let bird = scenario.bird();
    let col = grid.col(bird.body().x, world_w).min(grid.cols as i32 - 2).max(0);
    let row = grid.row(bird.body().center_y(), world_h).clamp(top, bottom);
    // Wing up while rising, down while falling.
    let sprite = match (bird.velocity_y() < 0.0, bird.frame()) {
        (true, _) => "^>",
        (false, 1) => "->",
        (false, _) => "v>",
    };
    out.queue(style::SetForegroundColor(C_BIRD))?;
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, grid: Grid, engine: &GameEngine) -> std::io::Result<()> {
    let scenario = engine.scenario();

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5}", scenario.score())))?;

    let level = match engine.level_theme() {
        Some(theme) => format!(
            "[ LEVEL {} / {} | {} ]",
            engine.level() + 1,
            engine.level_count(),
            theme.music
        ),
        None => format!("[ LEVEL {} / {} ]", engine.level() + 1, engine.level_count()),
    };
    centered(out, grid, 0, &level, C_HUD_LEVEL)?;

    if let Some(nickname) = engine.current_player() {
        let col = grid.cols.saturating_sub(nickname.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(C_TEXT))?;
        out.queue(Print(nickname))?;
    }
    Ok(())
}

/// Banner standing in for the fade overlay.
fn draw_transition<W: Write>(out: &mut W, grid: Grid, engine: &GameEngine) -> std::io::Result<()> {
    let alpha = engine.transition_alpha();
    if alpha <= 0.0 {
        return Ok(());
    }
    let text = match engine.state() {
        GameState::StartingRound => "GET READY!".to_string(),
        _ => format!("LEVEL {} COMPLETE", engine.level() + 1),
    };
    let color = if alpha > 0.5 { C_HIGHLIGHT } else { C_HINT };
    centered(out, grid, grid.rows / 2, &text, color)
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, grid: Grid, engine: &GameEngine) -> std::io::Result<()> {
    let Some(summary) = engine.last_round() else {
        return Ok(());
    };
    let start = (grid.rows / 2).saturating_sub(4);

    let frame: &[&str] = &[
        "╔════════════════════╗",
        "║     GAME  OVER     ║",
        "╚════════════════════╝",
    ];
    for (i, line) in frame.iter().enumerate() {
        centered(out, grid, start + i as u16, line, C_WARNING)?;
    }

    let mut row = start + frame.len() as u16;
    centered(out, grid, row, &format!("Score:         {:>6}", summary.score), C_HUD_SCORE)?;
    row += 1;
    centered(out, grid, row, &format!("Personal best: {:>6}", summary.personal_best), C_TEXT)?;
    row += 1;
    centered(out, grid, row, &format!("Global best:   {:>6}", summary.global_best), C_TEXT)?;
    row += 1;

    if summary.beat_global {
        centered(out, grid, row, "★ NEW GLOBAL RECORD ★", C_HIGHLIGHT)?;
    } else if summary.beat_personal {
        centered(out, grid, row, "★ NEW PERSONAL BEST ★", C_HIGHLIGHT)?;
    }
    Ok(())
}

// ── Ranking ───────────────────────────────────────────────────────────────────

const RANKING_ROWS: usize = 10;

fn draw_ranking<W: Write>(out: &mut W, grid: Grid, engine: &GameEngine) -> std::io::Result<()> {
    let (ranked, rank) = engine.ranking();
    let highlighted = engine.current_player();

    centered(out, grid, 1, "RANKING", C_TITLE)?;
    centered(out, grid, 3, &format!("{:>3}  {:<15} {:>6} {:>6}", "#", "NICKNAME", "GAMES", "BEST"), C_HINT)?;

    if ranked.is_empty() {
        centered(out, grid, 5, "No players yet", C_HINT)?;
    }
    for (i, player) in ranked.iter().take(RANKING_ROWS).enumerate() {
        let color = if Some(player.nickname.as_str()) == highlighted {
            C_HIGHLIGHT
        } else {
            C_TEXT
        };
        let line = format!(
            "{:>3}  {:<15} {:>6} {:>6}",
            i + 1,
            player.nickname,
            player.games_played(),
            player.high_score()
        );
        centered(out, grid, 4 + i as u16, &line, color)?;
    }

    if let (Some(rank), Some(nickname)) = (rank, highlighted) {
        let row = 5 + RANKING_ROWS as u16;
        centered(out, grid, row, &format!("{nickname} is #{rank} of {}", ranked.len()), C_HIGHLIGHT)?;
    }
    Ok(())
}

// ── Config ────────────────────────────────────────────────────────────────────

fn draw_config<W: Write>(out: &mut W, grid: Grid, config: &GameConfig) -> std::io::Result<()> {
    let t = &config.tunables;
    let seed = config
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "random".to_string());

    let lines = [
        format!("Resolution      {}x{}", config.width, config.height),
        format!("Tick rate       {TICK_RATE} Hz"),
        format!("Levels          {}", config.levels.len()),
        format!("Points / level  {}", t.points_per_level),
        format!("Speed step      +{}%", t.level_speed_increase_pct),
        format!("Pipe speed      {} px/s", t.pipe_initial_speed),
        format!("Gap height      {} px", t.gap_height),
        format!("Seed            {seed}"),
        format!("Save file       {}", config.save_path.display()),
        format!("Log file        {}", config.log_path.display()),
    ];

    centered(out, grid, 1, "CONFIG", C_TITLE)?;
    let col = (grid.cols / 2).saturating_sub(20);
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(col, 3 + i as u16))?;
        out.queue(style::SetForegroundColor(if i == 0 { C_HIGHLIGHT } else { C_TEXT }))?;
        out.queue(Print(line))?;
    }
    Ok(())
}
