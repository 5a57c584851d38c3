//! Clickable menus.
//!
//! A [`Menu`] is a column of [`Button`]s, each carrying the typed action it
//! fires. Pointer hover and clicks work as in any GUI; Up/Down/Enter give the
//! same control from a keyboard.

use crate::config::ScreenConfig;
use crate::display::Color;
use crate::geometry::{Rect, Vec2};
use crate::input::{InputEvent, Key, PointerButton};

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Danger,
    Neutral,
}

impl ButtonStyle {
    /// `(idle, highlighted)` fill colours.
    pub fn colors(self) -> (Color, Color) {
        match self {
            ButtonStyle::Primary => (Color::GREEN, Color::LIGHT_GREEN),
            ButtonStyle::Danger => (Color::RED, Color::SOFT_RED),
            ButtonStyle::Neutral => (Color::DARK_GREY, Color::GREY),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Button<A> {
    pub label: &'static str,
    pub rect: Rect,
    pub style: ButtonStyle,
    pub action: A,
    hovered: bool,
}

impl<A> Button<A> {
    pub fn new(label: &'static str, rect: Rect, style: ButtonStyle, action: A) -> Self {
        Self {
            label,
            rect,
            style,
            action,
            hovered: false,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

#[derive(Clone, Debug)]
pub struct Menu<A> {
    pub title: &'static str,
    buttons: Vec<Button<A>>,
    focus: Option<usize>,
}

impl<A: Copy> Menu<A> {
    pub fn new(title: &'static str, buttons: Vec<Button<A>>) -> Self {
        Self {
            title,
            buttons,
            focus: None,
        }
    }

    pub fn buttons(&self) -> &[Button<A>] {
        &self.buttons
    }

    /// Whether button `index` should be drawn highlighted.
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.focus == Some(index) || self.buttons.get(index).is_some_and(|b| b.hovered)
    }

    /// Feed one event; returns the action it triggered, if any.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<A> {
        match *event {
            InputEvent::PointerMoved(pos) => {
                self.hover(pos);
                None
            }
            InputEvent::PointerButton {
                button: PointerButton::Left,
                pos,
                down: true,
            } => {
                self.hover(pos);
                self.buttons.iter().find(|b| b.hovered).map(|b| b.action)
            }
            InputEvent::KeyDown(Key::Down) => {
                self.move_focus(1);
                None
            }
            InputEvent::KeyDown(Key::Up) => {
                self.move_focus(self.buttons.len().saturating_sub(1));
                None
            }
            InputEvent::KeyDown(Key::Enter) => {
                self.focus.and_then(|i| self.buttons.get(i)).map(|b| b.action)
            }
            _ => None,
        }
    }

    fn hover(&mut self, pos: Vec2) {
        for button in &mut self.buttons {
            button.hovered = button.rect.contains(pos);
        }
    }

    fn move_focus(&mut self, step: usize) {
        let len = self.buttons.len();
        if len == 0 {
            return;
        }
        self.focus = Some(match self.focus {
            Some(i) => (i + step) % len,
            None => 0,
        });
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartMenuAction {
    Play,
    Settings,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsAction {
    Back,
    ExitGame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseAction {
    Resume,
    ExitToMain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverAction {
    PlayAgain,
    Quit,
}

// ── Layouts ───────────────────────────────────────────────────────────────────

/// All menus of the game, laid out for one screen size.
#[derive(Clone, Debug)]
pub struct Menus {
    pub start: Menu<StartMenuAction>,
    pub settings: Menu<SettingsAction>,
    pub pause: Menu<PauseAction>,
    pub game_over: Menu<GameOverAction>,
}

impl Menus {
    pub fn new(screen: &ScreenConfig) -> Self {
        // Buttons are centred horizontally; `dy` is the offset of the top
        // edge from the vertical centre.
        let at = |dy: f32| {
            Rect::new(
                screen.width / 2.0 - BUTTON_WIDTH / 2.0,
                screen.height / 2.0 + dy,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            )
        };

        Self {
            start: Menu::new(
                "Spaceship War",
                vec![
                    Button::new("Play", at(-60.0), ButtonStyle::Primary, StartMenuAction::Play),
                    Button::new("Settings", at(10.0), ButtonStyle::Primary, StartMenuAction::Settings),
                    Button::new("Quit", at(80.0), ButtonStyle::Danger, StartMenuAction::Quit),
                ],
            ),
            settings: Menu::new(
                "Settings",
                vec![
                    Button::new("Exit Game", at(0.0), ButtonStyle::Danger, SettingsAction::ExitGame),
                    Button::new("Back", at(70.0), ButtonStyle::Neutral, SettingsAction::Back),
                ],
            ),
            pause: Menu::new(
                "Paused",
                vec![
                    Button::new("Resume", at(-60.0), ButtonStyle::Primary, PauseAction::Resume),
                    Button::new(
                        "Exit to Main Menu",
                        at(10.0),
                        ButtonStyle::Danger,
                        PauseAction::ExitToMain,
                    ),
                ],
            ),
            game_over: Menu::new(
                "GAME OVER",
                vec![
                    Button::new("Play Again", at(0.0), ButtonStyle::Primary, GameOverAction::PlayAgain),
                    Button::new("Quit", at(70.0), ButtonStyle::Danger, GameOverAction::Quit),
                ],
            ),
        }
    }
}
