//! All game entity types.  Plain data plus geometry accessors; the update
//! rules live in `compute`.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

/// Thin line near the top of the field; fire crossing it is defused.
pub const HORIZON_LINE: Rect = Rect::new(0, 50, 640, 1);

// ── Modes & outcomes ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Easy,
    Medium,
    Hard,
    Frantic,
}

impl Level {
    /// Menu key → level.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Level::Easy),
            2 => Some(Level::Medium),
            3 => Some(Level::Hard),
            4 => Some(Level::Frantic),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
            Level::Frantic => "Frantic",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    Playing,
    Lost,
    Won,
}

/// What a single actor step signals back to the mode machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    None,
    /// Fire reached the avatar.
    Lost,
    /// The guardian hit the enemy.
    Won,
}

impl Outcome {
    /// Combine two signals from the same step; a later real signal replaces
    /// an earlier one.
    pub fn then(self, later: Outcome) -> Outcome {
        match later {
            Outcome::None => self,
            signal => signal,
        }
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// The player-controlled figure at the top of the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Avatar {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    /// Tracked from the Down key but never integrated; the avatar keeps
    /// its lane.
    pub vy: i32,
}

impl Avatar {
    pub const WIDTH: i32 = 46;
    pub const HEIGHT: i32 = 98;
    pub const VEL: i32 = 1;

    pub fn new() -> Self {
        Self { x: 0, y: 10, vx: 0, vy: 0 }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new()
    }
}

/// Companion dropped from the avatar's position to intercept the enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guardian {
    pub x: i32,
    pub y: i32,
    pub vy: i32,
    /// Armed for a snap to the avatar on the next step.
    pub deployed: bool,
    /// Position at the start of the last step, before the vertical advance.
    pub collider: Rect,
}

impl Guardian {
    pub const WIDTH: i32 = 15;
    pub const HEIGHT: i32 = 60;
    /// Off-screen starting point; the first step sends it to rest.
    pub const SENTINEL: (i32, i32) = (666, 666);
    pub const REST: (i32, i32) = (1, 1);
    /// Deploy is only honoured while the guardian sits above this row.
    pub const DEPLOY_CEILING: i32 = 20;

    pub fn new() -> Self {
        let (x, y) = Self::SENTINEL;
        Self {
            x,
            y,
            vy: 0,
            deployed: false,
            collider: Rect::new(0, 0, Self::WIDTH, Self::HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        self.collider
    }
}

impl Default for Guardian {
    fn default() -> Self {
        Self::new()
    }
}

/// The patrolling enemy that launches fire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub facing_right: bool,
}

impl Enemy {
    pub const WIDTH: i32 = 45;
    pub const HEIGHT: i32 = 108;
    pub const VEL: i32 = 1;

    pub fn at(x: i32, y: i32) -> Self {
        Self { x, y, vx: Self::VEL, facing_right: true }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Stable index of a slot in the projectile pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Parked off-screen, eligible for arming.
    Idle,
    /// Marked by the scheduler; snaps to the enemy on its next step.
    Armed,
    /// Rising toward the avatar or the horizon.
    InFlight,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projectile {
    pub id: ProjectileId,
    pub x: i32,
    pub y: i32,
    pub vy: i32,
    pub state: SlotState,
    pub acceleration_ticks: u32,
    /// Extra upward speed that grows every tick until the shot resolves.
    pub velocity_from_acceleration: i32,
    /// Position at the start of the last step, before the vertical move.
    pub collider: Rect,
}

impl Projectile {
    pub const WIDTH: i32 = 45;
    pub const HEIGHT: i32 = 45;
    pub const FIRE_VEL: i32 = 2;
    pub const SENTINEL: (i32, i32) = (800, 800);

    pub fn idle(id: ProjectileId) -> Self {
        let (x, y) = Self::SENTINEL;
        Self {
            id,
            x,
            y,
            vy: 0,
            state: SlotState::Idle,
            acceleration_ticks: 0,
            velocity_from_acceleration: 0,
            collider: Rect::new(x, y, Self::WIDTH, Self::HEIGHT),
        }
    }

    pub fn available(&self) -> bool {
        self.state == SlotState::Idle
    }

    pub fn activated(&self) -> bool {
        self.state == SlotState::Armed
    }

    pub fn rect(&self) -> Rect {
        self.collider
    }
}
