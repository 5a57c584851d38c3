//! Top-level application state machine.
//!
//! | State           | Action              | → State         | Side effect      |
//! |-----------------|---------------------|-----------------|------------------|
//! | StartMenu       | Play                | Gameplay        | session reset    |
//! | StartMenu       | Settings            | SettingsSubmenu |                  |
//! | StartMenu       | Quit                | (exit)          |                  |
//! | SettingsSubmenu | Back                | StartMenu       |                  |
//! | SettingsSubmenu | ExitGame            | (exit)          |                  |
//! | Gameplay        | Escape              | Paused          |                  |
//! | Gameplay        | session over        | GameOver        |                  |
//! | Gameplay        | Space               | Gameplay        | shoot            |
//! | Paused          | Resume / Escape     | Gameplay        |                  |
//! | Paused          | ExitToMain          | StartMenu       |                  |
//! | GameOver        | PlayAgain           | Gameplay        | session reset    |
//! | GameOver        | Quit                | (exit)          |                  |

use log::{debug, info};

use crate::config::ScreenConfig;
use crate::input::{InputEvent, Key};
use crate::menu::{GameOverAction, Menus, PauseAction, SettingsAction, StartMenuAction};
use crate::session::GameSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    StartMenu,
    SettingsSubmenu,
    Gameplay,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameplayAction {
    Pause,
    Shoot,
}

/// An action, tagged with the state it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    StartMenu(StartMenuAction),
    Settings(SettingsAction),
    Gameplay(GameplayAction),
    Paused(PauseAction),
    GameOver(GameOverAction),
}

impl Action {
    /// The only state in which this action does anything.
    pub fn state(self) -> AppState {
        match self {
            Action::StartMenu(_) => AppState::StartMenu,
            Action::Settings(_) => AppState::SettingsSubmenu,
            Action::Gameplay(_) => AppState::Gameplay,
            Action::Paused(_) => AppState::Paused,
            Action::GameOver(_) => AppState::GameOver,
        }
    }
}

/// Whether the game loop keeps going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug)]
pub struct AppStateMachine {
    state: AppState,
    menus: Menus,
}

impl AppStateMachine {
    pub fn new(screen: &ScreenConfig) -> Self {
        Self {
            state: AppState::StartMenu,
            menus: Menus::new(screen),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn menus(&self) -> &Menus {
        &self.menus
    }

    /// Route one input event: quit requests end the game from anywhere,
    /// gameplay listens to keys, every other state to its menu.
    pub fn handle_event(&mut self, event: &InputEvent, session: &mut GameSession) -> Flow {
        if *event == InputEvent::QuitRequested {
            info!("quit requested in {:?}", self.state);
            return Flow::Exit;
        }

        let action = match self.state {
            AppState::StartMenu => self.menus.start.handle_event(event).map(Action::StartMenu),
            AppState::SettingsSubmenu => self.menus.settings.handle_event(event).map(Action::Settings),
            AppState::Gameplay => match event {
                InputEvent::KeyDown(Key::Escape) => Some(Action::Gameplay(GameplayAction::Pause)),
                InputEvent::KeyDown(Key::Space) => Some(Action::Gameplay(GameplayAction::Shoot)),
                _ => None,
            },
            AppState::Paused => match event {
                InputEvent::KeyDown(Key::Escape) => Some(Action::Paused(PauseAction::Resume)),
                _ => self.menus.pause.handle_event(event).map(Action::Paused),
            },
            AppState::GameOver => self.menus.game_over.handle_event(event).map(Action::GameOver),
        };

        match action {
            Some(action) => self.apply(action, session),
            None => Flow::Continue,
        }
    }

    /// Run one row of the transition table. Actions belonging to another
    /// state are ignored.
    pub fn apply(&mut self, action: Action, session: &mut GameSession) -> Flow {
        if action.state() != self.state {
            debug!("ignoring {action:?} in {:?}", self.state);
            return Flow::Continue;
        }

        match action {
            Action::StartMenu(StartMenuAction::Play) | Action::GameOver(GameOverAction::PlayAgain) => {
                session.reset();
                self.enter(AppState::Gameplay);
            }
            Action::StartMenu(StartMenuAction::Settings) => self.enter(AppState::SettingsSubmenu),
            Action::StartMenu(StartMenuAction::Quit)
            | Action::Settings(SettingsAction::ExitGame)
            | Action::GameOver(GameOverAction::Quit) => {
                info!("exit chosen from {:?}", self.state);
                return Flow::Exit;
            }
            Action::Settings(SettingsAction::Back) | Action::Paused(PauseAction::ExitToMain) => {
                self.enter(AppState::StartMenu);
            }
            Action::Gameplay(GameplayAction::Pause) => self.enter(AppState::Paused),
            Action::Gameplay(GameplayAction::Shoot) => {
                session.shoot();
            }
            Action::Paused(PauseAction::Resume) => self.enter(AppState::Gameplay),
        }
        Flow::Continue
    }

    /// The session ended during gameplay.
    pub fn session_over(&mut self) {
        if self.state == AppState::Gameplay {
            self.enter(AppState::GameOver);
        }
    }

    fn enter(&mut self, next: AppState) {
        info!("state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
