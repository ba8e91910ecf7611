/// Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "bug_crossing")]
#[command(about = "Cross the road without getting smushed by a bug", long_about = None)]
pub struct Args {
    /// Frame cap.  Motion is time-based, so this only affects smoothness.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Number of bugs on the road.
    #[arg(long, default_value_t = 4)]
    pub enemies: usize,

    /// High score the session starts with.
    #[arg(long, default_value_t = 53)]
    pub high_score: u32,

    /// Seed for lane and speed draws (random if omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory with `<sprite>.txt` files overriding the built-in art.
    #[arg(long)]
    pub sprite_dir: Option<PathBuf>,

    /// Write log output here (the screen is taken by the game).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// What the game core needs to know at start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub fps: u32,
    pub enemy_count: usize,
    pub high_score: u32,
    pub seed: Option<u64>,
    pub sprite_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            enemy_count: 4,
            high_score: 53,
            seed: None,
            sprite_dir: None,
            log_file: None,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            fps: args.fps.max(1),
            enemy_count: args.enemies,
            high_score: args.high_score,
            seed: args.seed,
            sprite_dir: args.sprite_dir,
            log_file: args.log_file,
        }
    }
}
