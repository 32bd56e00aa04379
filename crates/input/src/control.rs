use std::fmt;
use std::str::FromStr;

/// A logical driving control.
///
/// The motion integrator consumes controls, never raw key events, so the
/// same integrator runs under the window loop, the CLI simulator and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    /// Increase speed.
    Accelerate,
    /// Decrease speed; reverses once speed passes zero.
    Brake,
    /// Turn counter-clockwise (heading increases).
    SteerLeft,
    /// Turn clockwise (heading decreases).
    SteerRight,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Accelerate,
        Control::Brake,
        Control::SteerLeft,
        Control::SteerRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Control::Accelerate => "accelerate",
            Control::Brake => "brake",
            Control::SteerLeft => "steer-left",
            Control::SteerRight => "steer-right",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control `{0}` (expected accelerate, brake, steer-left or steer-right)")]
pub struct ControlParseError(pub String);

impl FromStr for Control {
    type Err = ControlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accelerate" => Ok(Control::Accelerate),
            "brake" | "reverse" => Ok(Control::Brake),
            "steer-left" => Ok(Control::SteerLeft),
            "steer-right" => Ok(Control::SteerRight),
            other => Err(ControlParseError(other.to_string())),
        }
    }
}

/// Pressed/released status of every [`Control`].
///
/// Written by key events between ticks and read once per tick. Controls
/// that were never set read as released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: [bool; 4],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the given controls held.
    pub fn holding(controls: &[Control]) -> Self {
        let mut state = Self::new();
        for &control in controls {
            state.set_control(control, true);
        }
        state
    }

    /// Overwrite the stored status of `control`.
    pub fn set_control(&mut self, control: Control, pressed: bool) {
        self.pressed[control.index()] = pressed;
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.pressed[control.index()]
    }

    /// Name-keyed variant of [`set_control`](Self::set_control).
    /// Unrecognised names are ignored.
    pub fn set_named(&mut self, name: &str, pressed: bool) {
        match name.parse::<Control>() {
            Ok(control) => self.set_control(control, pressed),
            Err(e) => tracing::debug!("ignoring input: {e}"),
        }
    }

    /// Name-keyed variant of [`is_pressed`](Self::is_pressed).
    /// Unrecognised names read as released.
    pub fn is_named_pressed(&self, name: &str) -> bool {
        name.parse::<Control>()
            .map(|control| self.is_pressed(control))
            .unwrap_or(false)
    }

    /// Release every control.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn held(&self) -> impl Iterator<Item = Control> + '_ {
        Control::ALL.into_iter().filter(|c| self.is_pressed(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_released() {
        let input = InputState::new();
        for control in Control::ALL {
            assert!(!input.is_pressed(control));
        }
    }

    #[test]
    fn set_control_overwrites() {
        let mut input = InputState::new();
        input.set_control(Control::Accelerate, true);
        assert!(input.is_pressed(Control::Accelerate));
        assert!(!input.is_pressed(Control::Brake));

        input.set_control(Control::Accelerate, false);
        assert!(!input.is_pressed(Control::Accelerate));
    }

    #[test]
    fn named_access() {
        let mut input = InputState::new();
        input.set_named("steer-left", true);
        assert!(input.is_named_pressed("steer-left"));
        assert!(input.is_pressed(Control::SteerLeft));
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut input = InputState::new();
        input.set_named("horn", true);
        assert_eq!(input, InputState::new());
        assert!(!input.is_named_pressed("horn"));
    }

    #[test]
    fn parse_round_trips_names() {
        for control in Control::ALL {
            assert_eq!(control.name().parse::<Control>(), Ok(control));
        }
        assert_eq!("reverse".parse::<Control>(), Ok(Control::Brake));
        assert!("sideways".parse::<Control>().is_err());
    }

    #[test]
    fn holding_and_held() {
        let input = InputState::holding(&[Control::Brake, Control::SteerRight]);
        let held: Vec<Control> = input.held().collect();
        assert_eq!(held, vec![Control::Brake, Control::SteerRight]);
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::holding(&Control::ALL);
        input.clear();
        assert_eq!(input.held().count(), 0);
    }
}
