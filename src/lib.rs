//! Guardian Defense: shield the avatar from rising fire by sending the
//! guardian down into the patrolling enemy.
//!
//! The library holds the whole simulation plus the small boundary pieces
//! (config, assets, errors) that the terminal binary wires together.

pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod difficulty;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod scheduler;

/// World dimensions shared by every boundary check, in world pixels.
pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
