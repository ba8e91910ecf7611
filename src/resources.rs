/// Sprite art and its background loader.
///
/// Every sprite has built-in glyph art.  A sprite directory may override any
/// of them with a `<stem>.txt` file; one line of the file is one row of
/// terminal cells.  Spaces in entity art are transparent.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    WaterBlock,
    StoneBlock,
    GrassBlock,
    EnemyBug,
    CharBoy,
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 5] = [
        SpriteKey::WaterBlock,
        SpriteKey::StoneBlock,
        SpriteKey::GrassBlock,
        SpriteKey::EnemyBug,
        SpriteKey::CharBoy,
    ];

    /// File stem used for overrides.
    pub fn stem(self) -> &'static str {
        match self {
            SpriteKey::WaterBlock => "water-block",
            SpriteKey::StoneBlock => "stone-block",
            SpriteKey::GrassBlock => "grass-block",
            SpriteKey::EnemyBug => "enemy-bug",
            SpriteKey::CharBoy => "char-boy",
        }
    }

    /// Board tiles are drawn at their tile origin; everything else is drawn
    /// with the sprite offset applied.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            SpriteKey::WaterBlock | SpriteKey::StoneBlock | SpriteKey::GrassBlock
        )
    }
}

// ── Built-in art (10 × 4 cells, one tile) ───────────────────────────────────

const WATER_BLOCK: [&str; 4] = ["~  ~  ~  ~", "  ~  ~  ~ ", "~  ~  ~  ~", "  ~  ~  ~ "];
const STONE_BLOCK: [&str; 4] = ["▒▒▒▒▒▒▒▒▒▒", "▒▒▒▒▒▒▒▒▒▒", "▒▒▒▒▒▒▒▒▒▒", "──────────"];
const GRASS_BLOCK: [&str; 4] = [" ' ,  ' , ", "  , '  , '", " ' ,  ' , ", "  , '  , '"];
const ENEMY_BUG: [&str; 4] = ["", " .-~~~-.  ", "<(o o o)=>", " '-----'  "];
const CHAR_BOY: [&str; 4] = ["    @     ", "   /|\\    ", "    |     ", "   / \\    "];

fn builtin(key: SpriteKey) -> Vec<String> {
    let art: &[&str] = match key {
        SpriteKey::WaterBlock => &WATER_BLOCK,
        SpriteKey::StoneBlock => &STONE_BLOCK,
        SpriteKey::GrassBlock => &GRASS_BLOCK,
        SpriteKey::EnemyBug => &ENEMY_BUG,
        SpriteKey::CharBoy => &CHAR_BOY,
    };
    art.iter().map(|line| line.to_string()).collect()
}

// ── Sheet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SpriteSheet {
    art: HashMap<SpriteKey, Vec<String>>,
    overridden: Vec<SpriteKey>,
}

impl SpriteSheet {
    pub fn builtin() -> Self {
        Self {
            art: SpriteKey::ALL.iter().map(|&k| (k, builtin(k))).collect(),
            overridden: Vec::new(),
        }
    }

    /// Built-in art, with any `<stem>.txt` found in `dir` taking its place.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let mut sheet = Self::builtin();
        let Some(dir) = dir else {
            return Ok(sheet);
        };
        if !dir.is_dir() {
            bail!("sprite directory {} does not exist", dir.display());
        }

        for key in SpriteKey::ALL {
            let path = dir.join(format!("{}.txt", key.stem()));
            if !path.exists() {
                continue;
            }
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading sprite {}", path.display()))?;
            let lines: Vec<String> = text.lines().map(str::to_string).collect();
            if lines.is_empty() {
                bail!("sprite {} is empty", path.display());
            }
            sheet.art.insert(key, lines);
            sheet.overridden.push(key);
        }
        Ok(sheet)
    }

    pub fn get(&self, key: SpriteKey) -> &[String] {
        self.art.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys whose art came from the sprite directory.
    pub fn overridden(&self) -> &[SpriteKey] {
        &self.overridden
    }
}

/// Load the sheet on a worker thread.  Exactly one message arrives on the
/// returned channel, once every sprite is available (or loading failed).
pub fn load_async(dir: Option<PathBuf>) -> mpsc::Receiver<Result<SpriteSheet>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = SpriteSheet::load(dir.as_deref());
        // Receiver gone → nobody is waiting for the game any more.
        let _ = tx.send(result);
    });
    rx
}
