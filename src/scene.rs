/// Per-frame render orchestration.
///
/// The scene owns the cached overlays and knows the draw order; the
/// `Surface` it draws on knows how to put sprites and overlay buffers on
/// screen.  Nothing here changes game state.

use std::io;

use crate::compute::result_message;
use crate::entities::{GameState, GameStatus, ResultMessage};
use crate::grid::{
    tile_for_row, Tile, BOARD_HEIGHT, BOARD_WIDTH, NUM_COLS, NUM_ROWS, TILE_HEIGHT, TILE_WIDTH,
};
use crate::overlay::{Align, CachedOverlay, OverlayBuffer, OverlayLine, Tone};
use crate::resources::SpriteKey;

pub const SCOREBOARD_HEIGHT: f32 = 50.0;
/// Where the live score sits on the scoreboard.
pub const SCORE_X: f32 = 400.0;
pub const SCORE_Y: f32 = 5.0;

pub const RESTART_PROMPT: &str = "Press space bar to play again";

pub trait Surface {
    /// Called once before anything is drawn for a frame.
    fn begin_frame(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn draw_sprite(&mut self, key: SpriteKey, x: f32, y: f32) -> io::Result<()>;

    fn blit_overlay(&mut self, overlay: &OverlayBuffer, x: f32, y: f32) -> io::Result<()>;

    /// Called once after everything is drawn for a frame.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn block_for(tile: Tile) -> SpriteKey {
    match tile {
        Tile::Water => SpriteKey::WaterBlock,
        Tile::Stone => SpriteKey::StoneBlock,
        Tile::Grass => SpriteKey::GrassBlock,
    }
}

pub struct Scene {
    scoreboard_bg: CachedOverlay<u32>,
    scoreboard_fg: CachedOverlay<u32>,
    results: CachedOverlay<ResultMessage>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            scoreboard_bg: CachedOverlay::new(BOARD_WIDTH, SCOREBOARD_HEIGHT, true),
            scoreboard_fg: CachedOverlay::new(80.0, 40.0, false),
            results: CachedOverlay::new(BOARD_WIDTH, BOARD_HEIGHT, false),
        }
    }

    /// Draw one frame: tiles, scoreboard, entities, then the result screen
    /// while it is showing.
    pub fn render<S: Surface>(&mut self, state: &GameState, surface: &mut S) -> io::Result<()> {
        surface.begin_frame()?;

        for row in 0..NUM_ROWS {
            let key = block_for(tile_for_row(row));
            for col in 0..NUM_COLS {
                surface.draw_sprite(key, col as f32 * TILE_WIDTH, row as f32 * TILE_HEIGHT)?;
            }
        }

        // High score only changes when a game starts, so the background is
        // keyed on it and the live score gets its own small buffer.
        let bg = self.scoreboard_bg.refresh(&state.high_score, |&high| {
            vec![
                OverlayLine {
                    text: format!("High:  {}", high),
                    x: 20.0,
                    y: 12.0,
                    align: Align::Left,
                    tone: Tone::Board,
                },
                OverlayLine {
                    text: "Score:".to_string(),
                    x: BOARD_WIDTH - 220.0,
                    y: 12.0,
                    align: Align::Left,
                    tone: Tone::Board,
                },
            ]
        });
        surface.blit_overlay(bg, 0.0, 0.0)?;

        let fg = self.scoreboard_fg.refresh(&state.score, |&score| {
            vec![OverlayLine {
                text: score.to_string(),
                x: 10.0,
                y: 7.0,
                align: Align::Left,
                tone: Tone::Board,
            }]
        });
        surface.blit_overlay(fg, SCORE_X, SCORE_Y)?;

        for enemy in &state.enemies {
            surface.draw_sprite(SpriteKey::EnemyBug, enemy.x, enemy.y)?;
        }
        surface.draw_sprite(SpriteKey::CharBoy, state.player.x, state.player.y)?;

        if state.status == GameStatus::ShowResult {
            if state.result_dirty {
                self.results.force_redraw();
            }
            let message = result_message(state);
            let results = self.results.refresh(&message, |message| {
                let banner = match message {
                    ResultMessage::NewHighScore(score) => format!("NEW HIGH SCORE:  {}", score),
                    ResultMessage::MadeIt => "You Made It!".to_string(),
                    ResultMessage::Smushed => "Smushed!".to_string(),
                };
                vec![
                    OverlayLine {
                        text: banner,
                        x: BOARD_WIDTH / 2.0,
                        y: BOARD_HEIGHT / 2.0,
                        align: Align::Center,
                        tone: Tone::Banner,
                    },
                    OverlayLine {
                        text: RESTART_PROMPT.to_string(),
                        x: BOARD_WIDTH / 2.0,
                        y: BOARD_HEIGHT / 2.0 + TILE_HEIGHT,
                        align: Align::Center,
                        tone: Tone::Prompt,
                    },
                ]
            });
            surface.blit_overlay(results, 0.0, 0.0)?;
        }

        surface.present()
    }

    /// Layout counts for the scoreboard background, score and result
    /// overlays, in that order.
    pub fn redraw_counts(&self) -> (u32, u32, u32) {
        (
            self.scoreboard_bg.redraws(),
            self.scoreboard_fg.redraws(),
            self.results.redraws(),
        )
    }
}
