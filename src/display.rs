/// Rendering layer — all terminal I/O lives here.
///
/// `TerminalSurface` puts the scene's sprites and overlays on a crossterm
/// screen.  Game coordinates are pixels; each tile becomes a block of
/// `CELL_COLS_PER_TILE × CELL_ROWS_PER_TILE` cells and everything is clipped
/// to the board.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use bug_crossing::grid::{
    tile_for_row, Tile, NUM_COLS, NUM_ROWS, TILE_HEIGHT, TILE_WIDTH, VERTICAL_OFFSET,
};
use bug_crossing::overlay::{Align, OverlayBuffer, Tone};
use bug_crossing::resources::{SpriteKey, SpriteSheet};
use bug_crossing::scene::Surface;

pub const CELL_COLS_PER_TILE: i32 = 10;
pub const CELL_ROWS_PER_TILE: i32 = 4;

const BOARD_COLS: i32 = CELL_COLS_PER_TILE * NUM_COLS;
const BOARD_ROWS: i32 = CELL_ROWS_PER_TILE * NUM_ROWS;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_WATER: (Color, Color) = (Color::Cyan, Color::DarkBlue);
const C_STONE: (Color, Color) = (Color::Grey, Color::DarkGrey);
const C_GRASS: (Color, Color) = (Color::Green, Color::DarkGreen);
const C_BUG: Color = Color::Red;
const C_PLAYER: Color = Color::Yellow;
const C_SCOREBOARD: (Color, Color) = (Color::DarkBlue, Color::Grey);
const C_BANNER: (Color, Color) = (Color::White, Color::Black);
const C_PROMPT: (Color, Color) = (Color::Grey, Color::Black);
const C_HINT: Color = Color::DarkGrey;

fn tile_colors(tile: Tile) -> (Color, Color) {
    match tile {
        Tile::Water => C_WATER,
        Tile::Stone => C_STONE,
        Tile::Grass => C_GRASS,
    }
}

/// Background colour of the board under a given cell row.
fn board_bg(cell_row: i32) -> Color {
    tile_colors(tile_for_row(cell_row / CELL_ROWS_PER_TILE)).1
}

fn to_cell_x(x: f32) -> i32 {
    (x / TILE_WIDTH * CELL_COLS_PER_TILE as f32).round() as i32
}

fn to_cell_y(y: f32) -> i32 {
    (y / TILE_HEIGHT * CELL_ROWS_PER_TILE as f32).round() as i32
}

// ── Surface ──────────────────────────────────────────────────────────────────

pub struct TerminalSurface<'a, W: Write> {
    out: &'a mut W,
    sheet: &'a SpriteSheet,
    /// Screen cell of the board's top-left corner.
    origin: (u16, u16),
}

impl<'a, W: Write> TerminalSurface<'a, W> {
    /// Centre the board horizontally in a `width`-column terminal.
    pub fn new(out: &'a mut W, sheet: &'a SpriteSheet, width: u16) -> Self {
        let left = width.saturating_sub(BOARD_COLS as u16) / 2;
        Self {
            out,
            sheet,
            origin: (left, 1),
        }
    }

    /// Print `text` at board cell (`col`, `row`).  The caller has clipped it.
    fn put(&mut self, col: i32, row: i32, text: &str) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(
            self.origin.0 + col as u16,
            self.origin.1 + row as u16,
        ))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    /// Print the part of `text` starting at `col` that falls on the board.
    fn put_clipped(&mut self, col: i32, row: i32, text: &str) -> std::io::Result<()> {
        if row < 0 || row >= BOARD_ROWS {
            return Ok(());
        }
        let visible: String = text
            .chars()
            .enumerate()
            .filter(|(i, _)| (0..BOARD_COLS).contains(&(col + *i as i32)))
            .map(|(_, c)| c)
            .collect();
        if visible.is_empty() {
            return Ok(());
        }
        self.put(col.max(0), row, &visible)
    }

    fn draw_controls_hint(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(
            self.origin.0,
            self.origin.1 + BOARD_ROWS as u16 + 1,
        ))?;
        self.out.queue(style::SetBackgroundColor(Color::Reset))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out
            .queue(Print("←↑→↓ / WASD : Move   SPACE : Play again   Q : Quit"))?;
        Ok(())
    }
}

impl<'a, W: Write> Surface for TerminalSurface<'a, W> {
    fn begin_frame(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_sprite(&mut self, key: SpriteKey, x: f32, y: f32) -> std::io::Result<()> {
        // Entity art is aligned to its tile, not to the raised sprite origin.
        let y = if key.is_block() { y } else { y + VERTICAL_OFFSET };
        let col = to_cell_x(x);
        let top = to_cell_y(y);
        let sheet = self.sheet;

        for (i, line) in sheet.get(key).iter().enumerate() {
            let row = top + i as i32;
            if row < 0 || row >= BOARD_ROWS {
                continue;
            }

            if key.is_block() {
                let (fg, bg) = tile_colors(tile_for_row(row / CELL_ROWS_PER_TILE));
                self.out.queue(style::SetForegroundColor(fg))?;
                self.out.queue(style::SetBackgroundColor(bg))?;
                self.put_clipped(col, row, line)?;
                continue;
            }

            // Entities: spaces are transparent, so print each run of
            // non-space glyphs on top of the tile colour below it.
            let fg = if key == SpriteKey::EnemyBug { C_BUG } else { C_PLAYER };
            self.out.queue(style::SetForegroundColor(fg))?;
            self.out.queue(style::SetBackgroundColor(board_bg(row)))?;

            let mut run = String::new();
            let mut run_start = col;
            for (j, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    if !run.is_empty() {
                        self.put_clipped(run_start, row, &run)?;
                        run.clear();
                    }
                    continue;
                }
                if run.is_empty() {
                    run_start = col + j as i32;
                }
                run.push(ch);
            }
            if !run.is_empty() {
                self.put_clipped(run_start, row, &run)?;
            }
        }
        Ok(())
    }

    fn blit_overlay(&mut self, overlay: &OverlayBuffer, x: f32, y: f32) -> std::io::Result<()> {
        if overlay.framed {
            let (_, bg) = C_SCOREBOARD;
            let cols = to_cell_x(overlay.width).min(BOARD_COLS) as usize;
            self.out.queue(style::SetBackgroundColor(bg))?;
            for row in to_cell_y(y)..to_cell_y(y + overlay.height) {
                self.put_clipped(to_cell_x(x), row, &" ".repeat(cols))?;
            }
        }

        for line in &overlay.lines {
            let (fg, bg) = match line.tone {
                Tone::Board => C_SCOREBOARD,
                Tone::Banner => C_BANNER,
                Tone::Prompt => C_PROMPT,
            };
            // Banner text gets a one-cell pad so it reads as a strip.
            let text = match line.tone {
                Tone::Board => line.text.clone(),
                Tone::Banner | Tone::Prompt => format!(" {} ", line.text),
            };
            let len = text.chars().count() as i32;
            let anchor = to_cell_x(x + line.x);
            let col = match line.align {
                Align::Left => anchor,
                Align::Center => anchor - len / 2,
            };

            self.out.queue(style::SetForegroundColor(fg))?;
            self.out.queue(style::SetBackgroundColor(bg))?;
            if line.tone == Tone::Banner {
                self.out.queue(style::SetAttribute(Attribute::Bold))?;
            }
            self.put_clipped(col, to_cell_y(y + line.y), &text)?;
            self.out.queue(style::SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.draw_controls_hint()?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.flush()?;
        Ok(())
    }
}

// ── Loading screen ───────────────────────────────────────────────────────────

pub fn draw_loading<W: Write>(out: &mut W) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let msg = "Loading sprites…";
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(
        (width / 2).saturating_sub(msg.chars().count() as u16 / 2),
        height / 2,
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(msg))?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
