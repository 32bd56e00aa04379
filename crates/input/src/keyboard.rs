use std::collections::HashSet;

use crate::control::{Control, InputState};

/// Platform-agnostic physical keys the demo responds to.
///
/// Window backends translate their own key codes into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
}

impl Key {
    /// Fixed binding of each key to its control.
    pub fn control(self) -> Control {
        match self {
            Key::ArrowUp | Key::W => Control::Accelerate,
            Key::ArrowDown | Key::S => Control::Brake,
            Key::ArrowLeft | Key::A => Control::SteerLeft,
            Key::ArrowRight | Key::D => Control::SteerRight,
        }
    }

    /// Keys bound to `control`.
    pub fn bound_to(control: Control) -> [Key; 2] {
        match control {
            Control::Accelerate => [Key::ArrowUp, Key::W],
            Control::Brake => [Key::ArrowDown, Key::S],
            Control::SteerLeft => [Key::ArrowLeft, Key::A],
            Control::SteerRight => [Key::ArrowRight, Key::D],
        }
    }
}

/// Tracks held physical keys and folds them into an [`InputState`].
///
/// A control stays pressed while any key bound to it is held, so releasing
/// `W` while `ArrowUp` is still down keeps accelerating.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashSet<Key>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event and refresh the affected control in `input`.
    pub fn apply(&mut self, key: Key, pressed: bool, input: &mut InputState) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }

        let control = key.control();
        let active = Key::bound_to(control)
            .iter()
            .any(|k| self.held.contains(k));
        if active != input.is_pressed(control) {
            tracing::debug!(%control, active, "control changed");
        }
        input.set_control(control, active);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Forget all held keys and release every control, e.g. on focus loss.
    pub fn release_all(&mut self, input: &mut InputState) {
        self.held.clear();
        input.clear();
    }
}
