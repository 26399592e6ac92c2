//! Text sprites read from the assets directory.
//!
//! Loading is best effort: every file that fails is reported on its own and
//! replaced by a one-glyph placeholder, so the menu can still be drawn.

use std::path::Path;

use crate::error::GameError;

/// A block of text drawn with its top-left corner at the actor position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub lines: Vec<String>,
}

impl Sprite {
    fn placeholder(glyph: char) -> Self {
        Self { lines: vec![glyph.to_string()] }
    }

    fn parse(contents: &str) -> Option<Self> {
        let lines: Vec<String> = contents
            .lines()
            .map(|l| l.trim_end().to_string())
            .collect();
        // Trailing blank lines carry no art.
        let end = lines.iter().rposition(|l| !l.is_empty())? + 1;
        Some(Self { lines: lines[..end].to_vec() })
    }

    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }
}

#[derive(Clone, Debug)]
pub struct SpriteSet {
    pub avatar: Sprite,
    pub guardian: Sprite,
    pub enemy: Sprite,
    pub projectile: Sprite,
    pub title: Sprite,
    pub won: Sprite,
    pub lost: Sprite,
}

/// Result of a load: the usable set plus each individual failure.
#[derive(Debug)]
pub struct LoadedSprites {
    pub sprites: SpriteSet,
    pub failures: Vec<GameError>,
}

impl LoadedSprites {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The aggregated failure that keeps the game out of play, if any.
    pub fn unavailable(&self) -> Option<GameError> {
        if self.failures.is_empty() {
            None
        } else {
            Some(GameError::AssetsUnavailable { count: self.failures.len() })
        }
    }
}

fn load_one(
    dir: &Path,
    name: &'static str,
    glyph: char,
    failures: &mut Vec<GameError>,
) -> Sprite {
    let path = dir.join(format!("{name}.txt"));
    let result = match std::fs::read_to_string(&path) {
        Ok(contents) => {
            Sprite::parse(&contents).ok_or_else(|| GameError::EmptyAsset { name, path: path.clone() })
        }
        Err(source) => Err(GameError::Asset { name, path: path.clone(), source }),
    };
    match result {
        Ok(sprite) => sprite,
        Err(err) => {
            log::error!("{err}");
            failures.push(err);
            Sprite::placeholder(glyph)
        }
    }
}

/// Load every sprite from `dir`.  Never fails outright; see
/// [`LoadedSprites::failures`].
pub fn load_sprites(dir: &Path) -> LoadedSprites {
    let mut failures = Vec::new();
    let sprites = SpriteSet {
        avatar: load_one(dir, "avatar", 'A', &mut failures),
        guardian: load_one(dir, "guardian", '|', &mut failures),
        enemy: load_one(dir, "enemy", 'D', &mut failures),
        projectile: load_one(dir, "projectile", '*', &mut failures),
        title: load_one(dir, "title", '#', &mut failures),
        won: load_one(dir, "won", '+', &mut failures),
        lost: load_one(dir, "lost", 'x', &mut failures),
    };
    if failures.is_empty() {
        log::info!("loaded sprites from {}", dir.display());
    }
    LoadedSprites { sprites, failures }
}
