use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use super::{HeldKeys, InputEvent, InputFrame, InputSource, Key, PointerButton};
use crate::display::Viewport;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many polls. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 polls (≈133 ms at
/// 60 Hz) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Reads crossterm events without blocking the loop.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, keys are dropped on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` polls of silence.
pub struct TerminalInput {
    width: f32,
    height: f32,
    frame: u64,
    // Each held key → the poll it was last seen on (press or repeat).
    key_frame: HashMap<Key, u64>,
}

impl TerminalInput {
    /// `width`/`height` is the screen size pointer positions are mapped into.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            frame: 0,
            key_frame: HashMap::new(),
        }
    }

    /// Translate one crossterm event, updating held-key tracking.
    pub fn translate(&mut self, event: Event, viewport: &Viewport) -> Option<InputEvent> {
        match event {
            Event::Key(key) => self.translate_key(key),
            Event::Mouse(mouse) => translate_mouse(mouse, viewport),
            _ => None,
        }
    }

    fn translate_key(&mut self, event: KeyEvent) -> Option<InputEvent> {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Some(InputEvent::QuitRequested);
        }
        let key = map_key(code)?;
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(key, self.frame);
                Some(InputEvent::KeyDown(key))
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                self.key_frame.insert(key, self.frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&key);
                None
            }
        }
    }

    fn is_held(&self, key: Key) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn held(&self) -> HeldKeys {
        HeldKeys {
            left: self.is_held(Key::Left) || self.is_held(Key::Char('a')),
            right: self.is_held(Key::Right) || self.is_held(Key::Char('d')),
        }
    }

    /// Start a new poll window. Called once per [`InputSource::poll`].
    pub fn advance(&mut self) {
        self.frame += 1;
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<InputFrame> {
        self.advance();
        let viewport = Viewport::current(self.width, self.height)?;
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(ev) = self.translate(event::read()?, &viewport) {
                events.push(ev);
            }
        }
        Ok(InputFrame {
            events,
            held: self.held(),
        })
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => return None,
    };
    Some(key)
}

fn translate_mouse(event: MouseEvent, viewport: &Viewport) -> Option<InputEvent> {
    let pos = viewport.to_point(event.column, event.row);
    let button = |b: MouseButton| match b {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
    };
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(InputEvent::PointerMoved(pos)),
        MouseEventKind::Down(b) => Some(InputEvent::PointerButton {
            button: button(b),
            pos,
            down: true,
        }),
        MouseEventKind::Up(b) => Some(InputEvent::PointerButton {
            button: button(b),
            pos,
            down: false,
        }),
        _ => None,
    }
}
