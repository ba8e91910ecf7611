/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::Config;
use crate::entities::{Direction, Enemy, GameState, GameStatus, Input, Player, ResultMessage};
use crate::grid::{
    grid_to_pixel, is_enemy_row, FIRST_ENEMY_ROW, GOAL_ROW, LAST_ENEMY_ROW, NUM_COLS, NUM_ROWS,
    TILE_WIDTH,
};

// ── Tuning ───────────────────────────────────────────────────────────────────

/// Slowest bug: 1.25 seconds per tile.
pub const MIN_SPEED: f32 = TILE_WIDTH / 1.25;
/// Fastest bug: 0.3 seconds per tile.
pub const MAX_SPEED: f32 = TILE_WIDTH / 0.3;

pub const ENEMY_WIDTH: f32 = 101.0;
/// Non-colliding space on each side of the player; the sprite is narrower
/// than its tile.
pub const PLAYER_SIDE_MARGIN: f32 = 25.0;

/// At most this many bugs share a lane when one is (re)spawned.
pub const MAX_ENEMIES_PER_LANE: usize = 2;
/// Random lane draws before falling back to the emptiest lane.
pub const MAX_LANE_DRAWS: u32 = 32;

pub const MOVE_SCORE: u32 = 1;
pub const WIN_BONUS: u32 = 50;

const START_ROW: i32 = NUM_ROWS - 1;
const START_COLUMN: i32 = 2;

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_player() -> Player {
    let (x, y) = grid_to_pixel(START_ROW, START_COLUMN);
    Player {
        row: START_ROW,
        column: START_COLUMN,
        x,
        y,
        won_game: false,
        lost_game: false,
    }
}

/// Build the first game of a session.
pub fn init_state(config: &Config, rng: &mut impl Rng) -> GameState {
    let player = new_player();
    let enemies = spawn_all(player.row, config.enemy_count, rng);
    GameState {
        player,
        enemies,
        score: 0,
        high_score: config.high_score,
        status: GameStatus::Running,
        result_dirty: false,
        elapsed: 0.0,
        frame: 0,
    }
}

/// Spawn `count` bugs one after another, each seeing the ones placed before it.
fn spawn_all(player_row: i32, count: usize, rng: &mut impl Rng) -> Vec<Enemy> {
    let mut enemies: Vec<Enemy> = Vec::with_capacity(count);
    for _ in 0..count {
        let enemy = spawn_enemy(player_row, &enemies, None, rng);
        enemies.push(enemy);
    }
    enemies
}

// ── Enemy ────────────────────────────────────────────────────────────────────

fn lane_population(enemies: &[Enemy], row: i32, skip: Option<usize>) -> usize {
    enemies
        .iter()
        .enumerate()
        .filter(|(i, e)| Some(*i) != skip && e.row == row)
        .count()
}

/// Pick a lane for a bug and place it just off the left edge.
///
/// `self_index` is the bug's own slot in `enemies` when it is being
/// re-spawned, so it doesn't count against its old lane.
///
/// An empty player lane always gets the bug, which keeps the player moving.
/// Otherwise lanes are drawn at random until one has room.  The draw is
/// capped; with too many bugs for the lanes it settles on the emptiest lane.
pub fn spawn_enemy(
    player_row: i32,
    enemies: &[Enemy],
    self_index: Option<usize>,
    rng: &mut impl Rng,
) -> Enemy {
    let row = if is_enemy_row(player_row)
        && lane_population(enemies, player_row, self_index) == 0
    {
        player_row
    } else {
        draw_lane(enemies, self_index, rng)
    };

    let (_, y) = grid_to_pixel(row, 0);
    Enemy {
        x: -TILE_WIDTH,
        y,
        row,
        speed: rng.gen_range(MIN_SPEED..=MAX_SPEED),
    }
}

fn draw_lane(enemies: &[Enemy], self_index: Option<usize>, rng: &mut impl Rng) -> i32 {
    for _ in 0..MAX_LANE_DRAWS {
        let row = rng.gen_range(FIRST_ENEMY_ROW..=LAST_ENEMY_ROW);
        if lane_population(enemies, row, self_index) < MAX_ENEMIES_PER_LANE {
            return row;
        }
    }

    // min_by_key keeps the first minimum, so ties go to the lowest lane.
    let row = (FIRST_ENEMY_ROW..=LAST_ENEMY_ROW)
        .min_by_key(|&row| lane_population(enemies, row, self_index))
        .unwrap_or(FIRST_ENEMY_ROW);
    log::warn!(
        "no lane with room after {} draws, falling back to lane {}",
        MAX_LANE_DRAWS,
        row
    );
    row
}

/// Move a bug along its lane by `dt` seconds.
pub fn advance_enemy(enemy: &Enemy, dt: f32) -> Enemy {
    Enemy {
        x: enemy.x + enemy.speed * dt,
        ..enemy.clone()
    }
}

/// Same lane and the bug's span overlaps the player's narrowed span.
/// Both bounds are exclusive, so touching edges don't count.
pub fn collides_with(enemy: &Enemy, player: &Player) -> bool {
    enemy.row == player.row
        && enemy.x + ENEMY_WIDTH > player.x + PLAYER_SIDE_MARGIN
        && enemy.x < player.x + TILE_WIDTH - PLAYER_SIDE_MARGIN
}

fn is_off_board(enemy: &Enemy) -> bool {
    enemy.x > TILE_WIDTH * NUM_COLS as f32
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Move the player one tile, clamped to the board.  Every accepted move is
/// worth a point; reaching the water is worth the win bonus on top.
///
/// A finished game takes no more moves, even before the next tick has
/// switched to the result screen.
pub fn apply_move(state: &GameState, direction: Direction) -> GameState {
    if state.player.won_game || state.player.lost_game {
        return state.clone();
    }

    let mut player = state.player.clone();
    let mut gained = 0;

    match direction {
        Direction::Left => {
            if player.column > 0 {
                player.column -= 1;
                gained += MOVE_SCORE;
            }
        }
        Direction::Right => {
            if player.column < NUM_COLS - 1 {
                player.column += 1;
                gained += MOVE_SCORE;
            }
        }
        Direction::Up => {
            player.row -= 1;
            gained += MOVE_SCORE;
            if player.row == GOAL_ROW {
                player.won_game = true;
                gained += WIN_BONUS;
            }
        }
        Direction::Down => {
            if player.row < NUM_ROWS - 1 {
                player.row += 1;
                gained += MOVE_SCORE;
            }
        }
    }

    let (x, y) = grid_to_pixel(player.row, player.column);
    player.x = x;
    player.y = y;

    GameState {
        player,
        score: state.score + gained,
        ..state.clone()
    }
}

/// Route one input through the state machine.  Moves only count while
/// running, restart only while the result is showing.
pub fn handle_input(state: &GameState, input: Input, rng: &mut impl Rng) -> GameState {
    match (&state.status, input) {
        (GameStatus::Running, Input::Move(direction)) => apply_move(state, direction),
        (GameStatus::ShowResult, Input::Restart) => restart(state, rng),
        _ => state.clone(),
    }
}

/// Start a new game: promote the high score, zero the score and put every
/// entity back at its starting point.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    let high_score = if state.score > state.high_score {
        log::info!("new high score {} (was {})", state.score, state.high_score);
        state.score
    } else {
        state.high_score
    };

    let player = new_player();
    let mut enemies = state.enemies.clone();
    for i in 0..enemies.len() {
        enemies[i] = spawn_enemy(player.row, &enemies, Some(i), rng);
    }

    log::info!("new game started, high score {}", high_score);

    GameState {
        player,
        enemies,
        score: 0,
        high_score,
        status: GameStatus::Running,
        result_dirty: false,
        elapsed: 0.0,
        frame: 0,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by `dt` seconds.  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a seeded RNG).
///
/// The player has no continuous motion; only the bugs move here.  A win
/// takes precedence over a collision: once the player is across, bugs are
/// no longer checked against it.
pub fn tick(state: &GameState, dt: f32, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }

    let mut player = state.player.clone();
    let mut enemies = state.enemies.clone();

    for i in 0..enemies.len() {
        enemies[i] = advance_enemy(&enemies[i], dt);

        if !player.won_game && collides_with(&enemies[i], &player) {
            player.lost_game = true;
        }

        if is_off_board(&enemies[i]) {
            enemies[i] = spawn_enemy(player.row, &enemies, Some(i), rng);
        }
    }

    let finished = player.won_game || player.lost_game;
    if finished {
        log::info!(
            "game over: {} with score {} after {:.1}s",
            if player.won_game { "won" } else { "lost" },
            state.score,
            state.elapsed + dt
        );
    }

    GameState {
        player,
        enemies,
        status: if finished {
            GameStatus::ShowResult
        } else {
            GameStatus::Running
        },
        result_dirty: state.result_dirty || finished,
        elapsed: state.elapsed + dt,
        frame: state.frame + 1,
        ..state.clone()
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// What the result banner should say.  Checked before the high score is
/// promoted, i.e. while the result is showing.
pub fn result_message(state: &GameState) -> ResultMessage {
    if state.score > state.high_score {
        ResultMessage::NewHighScore(state.score)
    } else if state.player.won_game {
        ResultMessage::MadeIt
    } else {
        ResultMessage::Smushed
    }
}
