//! Projectile pool and the randomized timer that arms it.

use rand::Rng;

use crate::difficulty::Difficulty;
use crate::entities::{Projectile, ProjectileId, SlotState};

pub const POOL_SIZE: usize = 9;

/// Spawn timer used before the first timeout, in milliseconds.
pub const DEFAULT_INITIAL_TIMER_MS: u64 = 5000;

/// Fixed-capacity arena of projectile slots.  A slot's id never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectilePool {
    slots: [Projectile; POOL_SIZE],
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|i| Projectile::idle(ProjectileId(i))),
        }
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.slots.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter()
    }

    /// Store an updated projectile back into its own slot.
    pub fn replace(&mut self, projectile: Projectile) {
        let id = projectile.id;
        if let Some(slot) = self.slots.get_mut(id.0) {
            *slot = projectile;
        }
    }

    /// Arm the lowest-numbered idle slot.  Arms at most one.
    pub fn arm_first_idle(&mut self) -> Option<ProjectileId> {
        let slot = self.slots.iter_mut().find(|p| p.available())?;
        slot.state = SlotState::Armed;
        Some(slot.id)
    }

    pub fn reset_all(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Projectile::idle(slot.id);
        }
    }

    pub fn idle_count(&self) -> usize {
        self.slots.iter().filter(|p| p.available()).count()
    }
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new()
    }
}

/// Countdown measured against the millisecond clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnTimer {
    pub timer_ms: u64,
    pub last_ms: u64,
}

impl SpawnTimer {
    pub fn new(initial_ms: u64, now_ms: u64) -> Self {
        Self { timer_ms: initial_ms, last_ms: now_ms }
    }

    /// Returns true when the timer has run out, and rolls the next one.
    ///
    /// The next timer is `100 * f + f * r` with `r` in `0..1000`, so a
    /// higher frequency value lengthens the wait.
    pub fn poll(&mut self, now_ms: u64, difficulty: &Difficulty, rng: &mut impl Rng) -> bool {
        if now_ms <= self.last_ms + self.timer_ms {
            return false;
        }
        let frequency = difficulty.projectile_spawn_frequency.max(0) as u64;
        let roll: u64 = rng.gen_range(0..1000);
        self.timer_ms = 100 * frequency + frequency * roll;
        self.last_ms = now_ms;
        true
    }
}

/// Run one scheduler check: on timeout, arm a single idle slot.
pub fn schedule(
    pool: &mut ProjectilePool,
    timer: &mut SpawnTimer,
    now_ms: u64,
    difficulty: &Difficulty,
    rng: &mut impl Rng,
) -> Option<ProjectileId> {
    if !timer.poll(now_ms, difficulty, rng) {
        return None;
    }
    let armed = pool.arm_first_idle();
    match armed {
        Some(id) => log::debug!("armed projectile {} (next in {} ms)", id.0, timer.timer_ms),
        None => log::debug!("spawn timeout with no idle projectile"),
    }
    armed
}
