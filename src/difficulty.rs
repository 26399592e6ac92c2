//! Difficulty presets.
//!
//! A [`Difficulty`] is picked once from the menu and stays fixed for the
//! whole session.

use crate::entities::Level;

/// Speed multipliers and spawn cadence for one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Difficulty {
    pub avatar_speed: i32,
    pub guardian_speed: i32,
    pub enemy_speed: i32,
    /// Scales both the floor and the spread of the projectile spawn timer.
    pub projectile_spawn_frequency: i32,
    pub projectile_speed: i32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            avatar_speed: 1,
            guardian_speed: 1,
            enemy_speed: 1,
            projectile_spawn_frequency: 100,
            projectile_speed: 1,
        }
    }
}

impl Difficulty {
    pub fn for_level(level: Level) -> Self {
        match level {
            // slow fire, strong guardian
            Level::Easy => Self {
                avatar_speed: 2,
                guardian_speed: 5,
                enemy_speed: 1,
                projectile_spawn_frequency: 3,
                projectile_speed: 3,
            },
            Level::Medium => Self {
                avatar_speed: 2,
                guardian_speed: 4,
                enemy_speed: 3,
                projectile_spawn_frequency: 4,
                projectile_speed: 4,
            },
            Level::Hard => Self {
                avatar_speed: 2,
                guardian_speed: 3,
                enemy_speed: 4,
                projectile_spawn_frequency: 6,
                projectile_speed: 5,
            },
            // fast spawn, fast enemy, sluggish avatar
            Level::Frantic => Self {
                avatar_speed: 1,
                guardian_speed: 5,
                enemy_speed: 10,
                projectile_spawn_frequency: 1,
                projectile_speed: 7,
            },
        }
    }
}
