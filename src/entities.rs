/// All game entity types — pure data, no logic.

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Logical input, already decoded from whatever the host delivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Accepted only while the game is running.
    Move(Direction),
    /// Accepted only while the result screen is showing.
    Restart,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Running,
    ShowResult,
}

/// Banner shown on the result screen.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultMessage {
    NewHighScore(u32),
    MadeIt,
    Smushed,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub row: i32,
    pub column: i32,
    /// Pixel position, always derived from `row` / `column`.
    pub x: f32,
    pub y: f32,
    pub won_game: bool,
    pub lost_game: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Lane index, 1..=4.
    pub row: i32,
    /// Pixels per second.
    pub speed: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Best score of the session.  Only promoted when a new game starts.
    pub high_score: u32,
    pub status: GameStatus,
    /// Set on every `Running → ShowResult` transition so the result overlay
    /// is laid out again.  The game loop clears it after drawing the frame.
    pub result_dirty: bool,
    /// Seconds of play since the last reset.
    pub elapsed: f32,
    pub frame: u64,
}
