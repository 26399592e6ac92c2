use std::path::PathBuf;

use thiserror::Error;

/// Failures at the edge of the game: terminal, config and sprite files.
/// The simulation itself never fails.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unable to load sprite {name} from {path}: {source}")]
    Asset {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sprite {name} in {path} is empty")]
    EmptyAsset { name: &'static str, path: PathBuf },

    #[error("{count} sprite(s) failed to load; play is disabled")]
    AssetsUnavailable { count: usize },

    #[error("unable to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
