/// Board geometry — a fixed 5 × 6 tile grid measured in pixels.
///
/// Row 0 is the water (goal) lane, rows 1-3 are stone, rows 4-5 are grass.
/// Bugs run along rows 1-4.  Everything here is a pure function of its
/// arguments.

pub const TILE_WIDTH: f32 = 101.0;
pub const TILE_HEIGHT: f32 = 83.0;
/// Sprites sit a little higher than their tile so they look planted on it.
pub const VERTICAL_OFFSET: f32 = 25.0;

pub const NUM_ROWS: i32 = 6;
pub const NUM_COLS: i32 = 5;

pub const BOARD_WIDTH: f32 = TILE_WIDTH * NUM_COLS as f32;
pub const BOARD_HEIGHT: f32 = 606.0;

/// The lane the player has to reach.
pub const GOAL_ROW: i32 = 0;
/// Lanes enemies may be placed on (inclusive).
pub const FIRST_ENEMY_ROW: i32 = 1;
pub const LAST_ENEMY_ROW: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Water,
    Stone,
    Grass,
}

/// Pixel position of the top-left corner of a sprite standing on `(row, column)`.
pub fn grid_to_pixel(row: i32, column: i32) -> (f32, f32) {
    (
        column as f32 * TILE_WIDTH,
        row as f32 * TILE_HEIGHT - VERTICAL_OFFSET,
    )
}

pub fn tile_for_row(row: i32) -> Tile {
    match row {
        0 => Tile::Water,
        1..=3 => Tile::Stone,
        _ => Tile::Grass,
    }
}

pub fn is_enemy_row(row: i32) -> bool {
    (FIRST_ENEMY_ROW..=LAST_ENEMY_ROW).contains(&row)
}

