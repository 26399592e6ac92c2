//! Per-frame actor kinematics.
//!
//! Each actor update takes an immutable reference to the actor (plus
//! whatever it reads from its neighbours) and returns a fresh copy together
//! with any outcome it signals.  All randomness comes through an injected
//! RNG so callers control determinism.

use rand::Rng;

use crate::collision::overlaps;
use crate::difficulty::Difficulty;
use crate::entities::{
    Avatar, Enemy, Guardian, Outcome, Projectile, Rect, SlotState, HORIZON_LINE,
};
use crate::input::{Controls, Key};
use crate::scheduler::{schedule, ProjectilePool, SpawnTimer};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Session state ────────────────────────────────────────────────────────────

/// Everything that lives for one round of play.
#[derive(Clone, Debug)]
pub struct Session {
    pub difficulty: Difficulty,
    pub avatar: Avatar,
    pub guardian: Guardian,
    pub enemy: Enemy,
    pub pool: ProjectilePool,
    pub spawn_timer: SpawnTimer,
    pub frame: u64,
}

/// Build a fresh session.  The enemy starts on a random lane between 200
/// and 399.
pub fn init_session(
    difficulty: Difficulty,
    now_ms: u64,
    initial_timer_ms: u64,
    rng: &mut impl Rng,
) -> Session {
    Session {
        difficulty,
        avatar: Avatar::new(),
        guardian: Guardian::new(),
        enemy: Enemy::at(0, 200 + rng.gen_range(0..200)),
        pool: ProjectilePool::new(),
        spawn_timer: SpawnTimer::new(initial_timer_ms, now_ms),
        frame: 0,
    }
}

// ── Avatar ───────────────────────────────────────────────────────────────────

pub fn move_avatar(avatar: &Avatar, controls: &Controls, difficulty: &Difficulty) -> Avatar {
    let vx = controls.horizontal() * Avatar::VEL;
    let vy = if controls.is_held(Key::Down) { -Avatar::VEL } else { 0 };

    let mut x = avatar.x + vx * difficulty.avatar_speed;
    // One-step-late clamp: undo a single unit of velocity, not the full move.
    if x < 0 || x + Avatar::WIDTH > SCREEN_WIDTH {
        x -= vx;
    }

    Avatar { x, vx, vy, ..avatar.clone() }
}

// ── Guardian ─────────────────────────────────────────────────────────────────

pub fn move_guardian(guardian: &Guardian, avatar: &Avatar, difficulty: &Difficulty) -> Guardian {
    let mut g = guardian.clone();

    if g.deployed {
        g.x = avatar.x;
        g.y = avatar.y;
        g.deployed = false;
    }

    g.collider = Rect::new(g.x, g.y, Guardian::WIDTH, Guardian::HEIGHT);
    g.y += g.vy * difficulty.guardian_speed;

    // Leaving the field sends it back to rest rather than bouncing.
    if g.y < 0 || g.y + Guardian::HEIGHT > SCREEN_HEIGHT {
        g.vy = 0;
        (g.x, g.y) = Guardian::REST;
        g.collider.y = g.y;
    }

    g
}

/// Arm the guardian so the next `move_guardian` snaps it to the avatar.
/// Ignored unless it is resting near the top.
pub fn deploy_guardian(guardian: &Guardian) -> Guardian {
    if guardian.y >= Guardian::DEPLOY_CEILING {
        return guardian.clone();
    }
    Guardian { vy: 1, deployed: true, ..guardian.clone() }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

pub fn move_enemy(
    enemy: &Enemy,
    guardian: &Guardian,
    difficulty: &Difficulty,
    rng: &mut impl Rng,
) -> (Enemy, Outcome) {
    let mut e = enemy.clone();
    let step = e.vx * difficulty.enemy_speed;
    e.x += if e.facing_right { step } else { -step };

    if e.x < 0 || e.x + Enemy::WIDTH > SCREEN_WIDTH {
        // New lane is kept only if it lands inside the band; otherwise the
        // old lane stays until the next reversal.
        let lane = e.y + rng.gen_range(0..50) - 10;
        if lane < SCREEN_WIDTH - 20 && lane > 5 {
            e.y = lane;
        }
        e.facing_right = !e.facing_right;
    }

    let outcome = if overlaps(&e.rect(), &guardian.rect()) {
        Outcome::Won
    } else {
        Outcome::None
    };
    (e, outcome)
}

// ── Projectile ───────────────────────────────────────────────────────────────

pub fn move_projectile(
    projectile: &Projectile,
    enemy: &Enemy,
    avatar: &Avatar,
    horizon: &Rect,
    difficulty: &Difficulty,
) -> (Projectile, Outcome) {
    if projectile.available() {
        return (projectile.clone(), Outcome::None);
    }

    let mut p = projectile.clone();
    if p.activated() {
        p.x = enemy.x;
        p.y = enemy.y;
        p.vy = 1;
        p.state = SlotState::InFlight;
    }

    p.acceleration_ticks += 1;
    p.velocity_from_acceleration =
        (p.velocity_from_acceleration as f64 + Projectile::FIRE_VEL as f64 * 1.2) as i32;

    p.collider = Rect::new(p.x, p.y, Projectile::WIDTH, Projectile::HEIGHT);
    // Moves one tick in three, using the whole accumulated speed.
    if p.acceleration_ticks % 3 == 1 {
        p.y -= p.vy * difficulty.projectile_speed + p.velocity_from_acceleration + 5;
    }

    if overlaps(&p.rect(), &avatar.rect()) {
        return (p, Outcome::Lost);
    }
    if overlaps(&p.rect(), horizon) {
        log::debug!("projectile {} defused at the horizon", p.id.0);
        return (Projectile::idle(p.id), Outcome::None);
    }
    // A late leap can clear the line between two colliders.
    if p.rect().bottom() <= horizon.top() {
        log::debug!("projectile {} crossed the horizon", p.id.0);
        return (Projectile::idle(p.id), Outcome::None);
    }
    (p, Outcome::None)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the session by one frame.  Every actor steps even after one of
/// them signals; when both are signalled, the projectile pass runs last and
/// its `Lost` wins.
pub fn tick(
    session: &Session,
    controls: &Controls,
    now_ms: u64,
    rng: &mut impl Rng,
) -> (Session, Outcome) {
    let d = session.difficulty;

    let avatar = move_avatar(&session.avatar, controls, &d);

    let guardian = move_guardian(&session.guardian, &avatar, &d);
    let guardian = if controls.deploy_requested() {
        deploy_guardian(&guardian)
    } else {
        guardian
    };

    let (enemy, mut outcome) = move_enemy(&session.enemy, &guardian, &d, rng);

    let mut pool = session.pool.clone();
    let mut spawn_timer = session.spawn_timer.clone();
    schedule(&mut pool, &mut spawn_timer, now_ms, &d, rng);

    let moved: Vec<(Projectile, Outcome)> = pool
        .iter()
        .map(|p| move_projectile(p, &enemy, &avatar, &HORIZON_LINE, &d))
        .collect();
    for (projectile, signal) in moved {
        outcome = outcome.then(signal);
        pool.replace(projectile);
    }

    let next = Session {
        difficulty: d,
        avatar,
        guardian,
        enemy,
        pool,
        spawn_timer,
        frame: session.frame + 1,
    };
    (next, outcome)
}
