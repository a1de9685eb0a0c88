/// Terminal rendering.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  World coordinates (800 x 600) are scaled
/// onto whatever grid the terminal currently has.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use shooting_birds::compute::{time_is_short, time_remaining};
use shooting_birds::constants::{MAGAZINE_SIZE, VIEW_HEIGHT, VIEW_WIDTH};
use shooting_birds::entities::{Direction, Entity, GameState, Kind, Point, SizeClass};
use shooting_birds::scene::{self, Scene};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::White;
const C_HUD_WARNING: Color = Color::Red;
const C_HUD_AMMO: Color = Color::Cyan;
const C_HILLS: Color = Color::DarkGreen;
const C_GROUND: Color = Color::Green;
const C_BIRD: Color = Color::White;
const C_DARK_BIRD: Color = Color::DarkMagenta;
const C_FLOWER: Color = Color::Magenta;
const C_FALLING: Color = Color::DarkGrey;
const C_CROSSHAIR: Color = Color::Red;
const C_GAIN: Color = Color::Green;
const C_LOSS: Color = Color::Red;
const C_TITLE: Color = Color::Cyan;
const C_BUTTON: Color = Color::White;
const C_BUTTON_HOT: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_OVERLAY: Color = Color::DarkBlue;

/// Terminal grid and the mapping from world units onto it.
/// Row 0 is the HUD and the last row the controls hint.
#[derive(Clone, Copy)]
struct Grid {
    cols: u16,
    rows: u16,
}

impl Grid {
    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    fn col(&self, x: f32) -> Option<u16> {
        let c = (x / VIEW_WIDTH * self.cols as f32).floor();
        (c >= 0.0 && c < self.cols as f32).then_some(c as u16)
    }

    fn row(&self, y: f32) -> Option<u16> {
        let r = (y / VIEW_HEIGHT * self.play_rows() as f32).floor();
        (r >= 0.0 && r < self.play_rows() as f32).then_some(1 + r as u16)
    }

    fn cell(&self, p: Point) -> Option<(u16, u16)> {
        Some((self.col(p.x)?, self.row(p.y)?))
    }

    /// Column at which `text` starts when centred on world x `cx`.
    fn centred_col(&self, cx: f32, text: &str) -> u16 {
        let c = (cx / VIEW_WIDTH * self.cols as f32) as u16;
        c.saturating_sub(text.chars().count() as u16 / 2)
    }
}

/// Map a terminal cell to the world point at its centre.
pub fn cell_to_world(col: u16, row: u16, cols: u16, rows: u16) -> Point {
    let grid = Grid { cols, rows };
    let x = (col as f32 + 0.5) / cols.max(1) as f32 * VIEW_WIDTH;
    let y = (row.saturating_sub(1) as f32 + 0.5) / grid.play_rows() as f32 * VIEW_HEIGHT;
    Point::new(x.clamp(0.0, VIEW_WIDTH - 1.0), y.clamp(0.0, VIEW_HEIGHT - 1.0))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let grid = Grid { cols, rows };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, grid, state.scroll_offset)?;

    for entity in state.flowers.iter().chain(&state.birds).chain(&state.dark_birds) {
        draw_entity(out, grid, entity)?;
    }
    draw_popups(out, grid, state)?;

    match state.scene {
        Scene::Start => draw_start_menu(out, grid, state)?,
        Scene::Instructions => draw_instructions(out, grid, state)?,
        Scene::ConfirmExit => {
            draw_start_menu(out, grid, state)?;
            draw_confirm_exit(out, grid, state)?;
        }
        Scene::PreRoundCountdown => draw_countdown(out, grid, state)?,
        Scene::Playing { paused } => {
            if paused {
                draw_banner(out, grid, 280.0, "‖ PAUSED ‖  (SPACE to resume)", C_TITLE)?;
            }
        }
        Scene::Ended => draw_results(out, grid, state)?,
    }

    draw_hud(out, grid, state)?;
    draw_crosshair(out, grid, state)?;
    draw_controls_hint(out, grid, state)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

/// Two parallax layers: distant hills move at half the scroll, the ground
/// at full scroll.
fn draw_background<W: Write>(out: &mut W, grid: Grid, offset: f32) -> std::io::Result<()> {
    const HILLS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▄', '▃', '▂'];
    const GROUND: [char; 4] = ['▓', '▒', '▓', '░'];

    let cell_w = VIEW_WIDTH / grid.cols.max(1) as f32;
    let hills_row = grid.row(400.0);
    let ground_row = grid.row(575.0);

    if let Some(row) = hills_row {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(style::SetForegroundColor(C_HILLS))?;
        let line: String = (0..grid.cols)
            .map(|c| {
                let bx = offset * 0.5 + c as f32 * cell_w;
                HILLS[((bx / 30.0) as usize) % HILLS.len()]
            })
            .collect();
        out.queue(Print(line))?;
    }
    if let Some(row) = ground_row {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(style::SetForegroundColor(C_GROUND))?;
        let line: String = (0..grid.cols)
            .map(|c| {
                let bx = offset + c as f32 * cell_w;
                GROUND[((bx / 20.0) as usize) % GROUND.len()]
            })
            .collect();
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn sprite_for(entity: &Entity) -> &'static str {
    if let Some(fall) = entity.falling {
        const SPIN: [&str; 4] = ["x", "+", "x", "+"];
        return SPIN[((fall.rotation * 4.0) as usize) % SPIN.len()];
    }
    match (entity.kind, entity.size, entity.direction) {
        (Kind::Flower, SizeClass::Normal, _) => "✿",
        (Kind::Flower, SizeClass::Small, _) => "*",
        (Kind::Bird, SizeClass::Normal, Direction::Right) => "~v>",
        (Kind::Bird, SizeClass::Normal, Direction::Left) => "<v~",
        (Kind::Bird, SizeClass::Small, Direction::Right) => "v>",
        (Kind::Bird, SizeClass::Small, Direction::Left) => "<v",
        (Kind::DarkBird, SizeClass::Normal, Direction::Right) => "≈w►",
        (Kind::DarkBird, SizeClass::Normal, Direction::Left) => "◄w≈",
        (Kind::DarkBird, SizeClass::Small, Direction::Right) => "w►",
        (Kind::DarkBird, SizeClass::Small, Direction::Left) => "◄w",
    }
}

fn draw_entity<W: Write>(out: &mut W, grid: Grid, entity: &Entity) -> std::io::Result<()> {
    let Some((col, row)) = grid.cell(entity.pos) else {
        return Ok(());
    };
    let glyph = sprite_for(entity);
    let width = glyph.chars().count() as u16;
    let col = col.saturating_sub(width / 2);
    if col + width > grid.cols {
        return Ok(());
    }

    let color = match (entity.falling, entity.kind) {
        (Some(_), _) => C_FALLING,
        (None, Kind::Flower) => C_FLOWER,
        (None, Kind::Bird) => C_BIRD,
        (None, Kind::DarkBird) => C_DARK_BIRD,
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;

    // Stem under a full-size flower
    if entity.kind == Kind::Flower && entity.size == SizeClass::Normal && entity.alive {
        if let Some(stem_row) = grid.row(entity.pos.y + 30.0) {
            if stem_row != row {
                out.queue(cursor::MoveTo(col, stem_row))?;
                out.queue(style::SetForegroundColor(C_GROUND))?;
                out.queue(Print("|"))?;
            }
        }
    }
    Ok(())
}

fn draw_popups<W: Write>(out: &mut W, grid: Grid, state: &GameState) -> std::io::Result<()> {
    for popup in &state.popups {
        let Some((col, row)) = grid.cell(popup.pos) else {
            continue;
        };
        let (text, color) = if popup.points >= 0 {
            (format!("+{}", popup.points), C_GAIN)
        } else {
            (popup.points.to_string(), C_LOSS)
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

fn draw_crosshair<W: Write>(out: &mut W, grid: Grid, state: &GameState) -> std::io::Result<()> {
    if let Some((col, row)) = grid.cell(state.cursor.point()) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_CROSSHAIR))?;
        out.queue(Print("⊕"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, grid: Grid, state: &GameState) -> std::io::Result<()> {
    if !matches!(
        state.scene,
        Scene::PreRoundCountdown | Scene::Playing { .. } | Scene::Ended
    ) {
        return Ok(());
    }

    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.round.score)))?;

    // Clock — centre
    let time_str = format!("Time: {:>3}", time_remaining(state));
    let time_color = if time_is_short(state) {
        C_HUD_WARNING
    } else {
        C_HUD_TIME
    };
    let tx = (grid.cols / 2).saturating_sub(time_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(time_color))?;
    out.queue(Print(&time_str))?;

    // Magazine — right
    let loaded = state.round.ammo_loaded.min(MAGAZINE_SIZE) as usize;
    let empty = MAGAZINE_SIZE as usize - loaded;
    let ammo_str = format!("Ammo:{}{}", "▮".repeat(loaded), "▯".repeat(empty));
    let ax = grid
        .cols
        .saturating_sub(ammo_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(ax, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(&ammo_str))?;

    Ok(())
}

// ── Menus and overlays ────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    grid: Grid,
    y: f32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some(row) = grid.row(y) {
        out.queue(cursor::MoveTo(grid.centred_col(VIEW_WIDTH / 2.0, text), row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

fn draw_buttons<W: Write>(out: &mut W, grid: Grid, state: &GameState) -> std::io::Result<()> {
    let at = state.cursor.point();
    for (button, rect) in scene::buttons(state.scene) {
        let Some(row) = grid.row(rect.cy) else {
            continue;
        };
        let text = format!("[ {} ]", button.label());
        let color = if rect.contains(at) {
            C_BUTTON_HOT
        } else {
            C_BUTTON
        };
        out.queue(cursor::MoveTo(grid.centred_col(rect.cx, &text), row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

fn draw_start_menu<W: Write>(out: &mut W, grid: Grid, state: &GameState) -> std::io::Result<()> {
    draw_banner(out, grid, 150.0, "★  SHOOTING  BIRDS  ★", C_TITLE)?;
    draw_banner(out, grid, 190.0, "Hit the birds. Leave the dark ones alone.", C_HINT)?;
    if state.scene == Scene::Start {
        draw_buttons(out, grid, state)?;
    }
    Ok(())
}

fn draw_instructions<W: Write>(
    out: &mut W,
    grid: Grid,
    state: &GameState,
) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("HOW TO PLAY", C_TITLE),
        ("", C_HINT),
        ("Click a target to shoot it. The magazine holds 8 shots.", C_BUTTON),
        ("Right click or R reloads.", C_BUTTON),
        ("Move the crosshair to a screen edge, or hold ← →, to look around.", C_BUTTON),
        ("SPACE pauses the round.", C_BUTTON),
        ("", C_HINT),
        ("<v~  bird        +10   (small +25)", C_BIRD),
        ("◄w≈  dark bird   -10   (small -25)", C_DARK_BIRD),
        ("✿    flower      +10   (small +25)", C_FLOWER),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_banner(out, grid, 120.0 + i as f32 * 30.0, text, *color)?;
    }
    draw_buttons(out, grid, state)
}

/// A filled box behind the exit prompt.
fn draw_confirm_exit<W: Write>(
    out: &mut W,
    grid: Grid,
    state: &GameState,
) -> std::io::Result<()> {
    let (Some(top), Some(bottom)) = (grid.row(270.0), grid.row(380.0)) else {
        return Ok(());
    };
    let left = grid.col(240.0).unwrap_or(0);
    let right = grid.col(560.0).unwrap_or(grid.cols.saturating_sub(1));
    let width = right.saturating_sub(left) as usize;

    out.queue(style::SetBackgroundColor(C_OVERLAY))?;
    for row in top..=bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print(" ".repeat(width)))?;
    }
    draw_banner(out, grid, 290.0, "Really quit?", C_BUTTON)?;
    draw_buttons(out, grid, state)?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

fn draw_countdown<W: Write>(out: &mut W, grid: Grid, state: &GameState) -> std::io::Result<()> {
    draw_banner(out, grid, 240.0, "Get ready", C_TITLE)?;
    let n = state.countdown.remaining().to_string();
    draw_banner(out, grid, 300.0, &n, C_HUD_SCORE)
}

fn draw_results<W: Write>(out: &mut W, grid: Grid, state: &GameState) -> std::io::Result<()> {
    let round = &state.round;
    let score_color = if round.score >= 0 { C_GAIN } else { C_LOSS };
    let lines = [
        ("╔════════════════════╗".to_string(), C_TITLE),
        ("║     TIME'S  UP     ║".to_string(), C_TITLE),
        ("╚════════════════════╝".to_string(), C_TITLE),
        (format!("Final Score: {:>6}", round.score), score_color),
        (
            format!(
                "Shots: {}   Hits: {}   Accuracy: {:.0}%",
                round.ammo_spent,
                round.hits(),
                round.accuracy()
            ),
            C_BUTTON,
        ),
        (
            format!(
                "Birds {}   Dark birds {}   Flowers {}",
                round.hits_of(Kind::Bird),
                round.hits_of(Kind::DarkBird),
                round.hits_of(Kind::Flower)
            ),
            C_HINT,
        ),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_banner(out, grid, 180.0 + i as f32 * 35.0, text, *color)?;
    }
    draw_buttons(out, grid, state)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    grid: Grid,
    state: &GameState,
) -> std::io::Result<()> {
    let hint = match state.scene {
        Scene::Start => "Click a label   ENTER : Start   I : Instructions   Q : Exit",
        Scene::Instructions => "ESC / B : Back",
        Scene::ConfirmExit => "Y : Yes   N : No",
        Scene::PreRoundCountdown => "Get ready…",
        Scene::Playing { .. } => {
            "Click / F : Shoot   R : Reload   ← → : Look   W A S D : Aim   SPACE : Pause"
        }
        Scene::Ended => "ENTER : OK",
    };
    out.queue(cursor::MoveTo(1, grid.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_centres_round_trip_through_the_grid() {
        let grid = Grid { cols: 80, rows: 26 };
        for (col, row) in [(0u16, 1u16), (40, 12), (79, 24)] {
            let p = cell_to_world(col, row, grid.cols, grid.rows);
            assert_eq!(grid.cell(p), Some((col, row)));
        }
    }

    #[test]
    fn points_outside_the_view_have_no_cell() {
        let grid = Grid { cols: 80, rows: 26 };
        assert_eq!(grid.cell(Point::new(-5.0, 100.0)), None);
        assert_eq!(grid.cell(Point::new(100.0, VIEW_HEIGHT + 1.0)), None);
    }

    #[test]
    fn hud_row_maps_to_top_of_play_area() {
        let p = cell_to_world(10, 0, 80, 26);
        assert!(p.y < VIEW_HEIGHT / 24.0);
    }
}
