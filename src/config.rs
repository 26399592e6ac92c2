//! Runtime tuning loaded from `guardian.toml`.
//!
//! Every field has a compiled default, so a file only needs the keys it
//! wants to change.  A missing file is not an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GameError, Result};
use crate::scheduler::DEFAULT_INITIAL_TIMER_MS;

pub const DEFAULT_CONFIG_PATH: &str = "guardian.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed sleep after each frame.
    pub frame_delay_ms: u64,
    /// Spawn timer before the first projectile of a session.
    pub initial_spawn_timer_ms: u64,
    /// Directory holding the sprite files.
    pub assets_dir: PathBuf,
    pub log_file: PathBuf,
    /// Fixed RNG seed; wall-clock seeded when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 15,
            initial_spawn_timer_ms: DEFAULT_INITIAL_TIMER_MS,
            assets_dir: PathBuf::from("assets"),
            log_file: PathBuf::from("guardian_defense.log"),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path`; defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents, path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(GameError::Io(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = GameConfig::parse("frame_delay_ms = 30\nseed = 7\n", Path::new("t.toml"))
            .expect("parse");
        assert_eq!(config.frame_delay_ms, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.initial_spawn_timer_ms, 5000);
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = GameConfig::parse("frame_delay_ms = \"fast\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, GameError::Config { .. }));
    }
}
