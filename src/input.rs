//! Input events as the simulation sees them, and the held-key state built
//! from them.

use std::collections::HashSet;

/// Keys the game reacts to.  Everything else arrives as `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Down,
    Digit(u8),
    Escape,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key, repeat: bool },
    Quit,
}

impl InputEvent {
    pub fn down(key: Key) -> Self {
        InputEvent::KeyDown { key, repeat: false }
    }

    pub fn up(key: Key) -> Self {
        InputEvent::KeyUp { key, repeat: false }
    }
}

/// Directions currently held, plus one-shot requests latched until the next
/// simulation step consumes them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    held: HashSet<Key>,
    deploy_requested: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the held set.  Repeats never change state.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, repeat: false } => {
                if key == Key::Down && !self.held.contains(&Key::Down) {
                    self.deploy_requested = true;
                }
                self.held.insert(key);
            }
            InputEvent::KeyUp { key, repeat: false } => {
                self.held.remove(&key);
            }
            _ => {}
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Horizontal direction from the held set: -1, 0 or 1.
    pub fn horizontal(&self) -> i32 {
        self.is_held(Key::Right) as i32 - self.is_held(Key::Left) as i32
    }

    pub fn deploy_requested(&self) -> bool {
        self.deploy_requested
    }

    /// Drop latched one-shot requests once a step has seen them.
    pub fn end_step(&mut self) {
        self.deploy_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missed_key_up_cannot_accumulate_velocity() {
        let mut c = Controls::new();
        c.apply(&InputEvent::down(Key::Left));
        c.apply(&InputEvent::down(Key::Left));
        assert_eq!(c.horizontal(), -1);
        c.apply(&InputEvent::up(Key::Left));
        assert_eq!(c.horizontal(), 0);
    }

    #[test]
    fn repeats_are_ignored() {
        let mut c = Controls::new();
        c.apply(&InputEvent::KeyDown { key: Key::Right, repeat: true });
        assert_eq!(c.horizontal(), 0);
        c.apply(&InputEvent::down(Key::Right));
        c.apply(&InputEvent::KeyUp { key: Key::Right, repeat: true });
        assert_eq!(c.horizontal(), 1);
    }

    #[test]
    fn deploy_latches_until_step_ends() {
        let mut c = Controls::new();
        c.apply(&InputEvent::down(Key::Down));
        c.apply(&InputEvent::up(Key::Down));
        assert!(c.deploy_requested());
        c.end_step();
        assert!(!c.deploy_requested());
    }
}
