//! Input contract between the game loop and whatever produces events.

mod terminal;

pub use terminal::TerminalInput;

use std::io;

use crate::geometry::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    Enter,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// A discrete event. Positions are in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    QuitRequested,
    KeyDown(Key),
    PointerMoved(Vec2),
    PointerButton {
        button: PointerButton,
        pos: Vec2,
        down: bool,
    },
}

/// Directional keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// Everything the input source saw since the previous tick. `events` keeps
/// arrival order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
}

impl InputFrame {
    pub fn with_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            held: HeldKeys::default(),
        }
    }

    pub fn holding(mut self, held: HeldKeys) -> Self {
        self.held = held;
        self
    }
}

pub trait InputSource {
    /// Collect pending events without blocking.
    fn poll(&mut self) -> io::Result<InputFrame>;
}
