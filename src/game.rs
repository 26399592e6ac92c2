//! Game mode state machine.
//!
//! `Game` is the single context object the frame loop owns.  Input is routed
//! by mode, and mode changes only happen inside [`Game::step`].

use rand::Rng;

use crate::compute::{init_session, tick, Session};
use crate::difficulty::Difficulty;
use crate::entities::{GameMode, Level, Outcome};
use crate::input::{Controls, InputEvent, Key};
use crate::scheduler::DEFAULT_INITIAL_TIMER_MS;

#[derive(Debug)]
pub struct Game {
    mode: GameMode,
    level: Option<Level>,
    difficulty: Difficulty,
    session: Option<Session>,
    controls: Controls,
    quit: bool,
    initial_timer_ms: u64,
    /// Set when play cannot start, e.g. sprites failed to load.
    blocked: Option<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_TIMER_MS)
    }
}

impl Game {
    pub fn new(initial_timer_ms: u64) -> Self {
        Self {
            mode: GameMode::Menu,
            level: None,
            difficulty: Difficulty::default(),
            session: None,
            controls: Controls::new(),
            quit: false,
            initial_timer_ms,
            blocked: None,
        }
    }

    /// Keep the menu running but refuse to enter play.
    pub fn block_play(&mut self, reason: impl Into<String>) {
        self.blocked = Some(reason.into());
    }

    pub fn blocked_reason(&self) -> Option<&str> {
        self.blocked.as_deref()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    // ── Input routing ────────────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: &InputEvent) {
        if *event == InputEvent::Quit {
            self.quit = true;
            return;
        }
        match self.mode {
            GameMode::Playing => self.controls.apply(event),
            GameMode::Menu | GameMode::Lost | GameMode::Won => self.handle_selection(event),
        }
    }

    /// Menu key handling, shared by the menu and both end screens.
    fn handle_selection(&mut self, event: &InputEvent) {
        let InputEvent::KeyDown { key, repeat: false } = *event else {
            return;
        };
        match key {
            Key::Escape => self.quit = true,
            Key::Digit(digit) => {
                let Some(level) = Level::from_digit(digit) else {
                    return;
                };
                match self.mode {
                    GameMode::Menu => self.select(level),
                    // No path back into play from an end screen.
                    _ => log::info!("ignoring {} selection after the round ended", level.label()),
                }
            }
            _ => {}
        }
    }

    fn select(&mut self, level: Level) {
        if let Some(reason) = &self.blocked {
            log::warn!("cannot start {}: {reason}", level.label());
            return;
        }
        self.level = Some(level);
        self.difficulty = Difficulty::for_level(level);
    }

    // ── Simulation ───────────────────────────────────────────────────────────

    /// Run one simulation step for the current mode.
    pub fn step(&mut self, now_ms: u64, rng: &mut impl Rng) -> GameMode {
        match self.mode {
            GameMode::Menu => {
                if let Some(level) = self.level {
                    self.session = Some(init_session(
                        self.difficulty,
                        now_ms,
                        self.initial_timer_ms,
                        rng,
                    ));
                    self.controls = Controls::new();
                    self.mode = GameMode::Playing;
                    log::info!("starting round on {}", level.label());
                }
            }
            GameMode::Playing => {
                if let Some(session) = &self.session {
                    let (next, outcome) = tick(session, &self.controls, now_ms, rng);
                    self.controls.end_step();
                    self.session = Some(next);
                    self.resolve(outcome);
                }
            }
            GameMode::Lost | GameMode::Won => {}
        }
        self.mode
    }

    fn resolve(&mut self, outcome: Outcome) {
        let mode = match outcome {
            Outcome::None => return,
            Outcome::Lost => GameMode::Lost,
            Outcome::Won => GameMode::Won,
        };
        if let Some(session) = self.session.as_mut() {
            session.pool.reset_all();
            log::info!("round over after {} frames: {:?}", session.frame, mode);
        }
        self.mode = mode;
    }

    /// One loop iteration minus rendering: drain every pending event, then
    /// step once.
    pub fn frame<I>(&mut self, events: I, now_ms: u64, rng: &mut impl Rng) -> GameMode
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.handle_event(&event);
        }
        self.step(now_ms, rng)
    }
}
