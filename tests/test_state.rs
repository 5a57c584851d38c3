mod support;

use rstest::{fixture, rstest};

use spaceship_war::config::ScreenConfig;
use spaceship_war::geometry::Vec2;
use spaceship_war::input::{InputEvent, Key, PointerButton};
use spaceship_war::menu::{GameOverAction, PauseAction, SettingsAction, StartMenuAction};
use spaceship_war::session::GameSession;
use spaceship_war::state::{Action, AppState, AppStateMachine, Flow, GameplayAction};

use support::key;

fn click(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerButton {
        button: PointerButton::Left,
        pos: Vec2::new(x, y),
        down: true,
    }
}

// Button centres on the default 800×600 screen.
const PLAY: (f32, f32) = (400.0, 265.0);
const SETTINGS: (f32, f32) = (400.0, 335.0);
const QUIT: (f32, f32) = (400.0, 405.0);
const EXIT_GAME: (f32, f32) = (400.0, 325.0);
const BACK: (f32, f32) = (400.0, 395.0);
const RESUME: (f32, f32) = (400.0, 265.0);
const EXIT_TO_MAIN: (f32, f32) = (400.0, 335.0);
const PLAY_AGAIN: (f32, f32) = (400.0, 325.0);
const GAME_OVER_QUIT: (f32, f32) = (400.0, 395.0);

struct Harness {
    machine: AppStateMachine,
    session: GameSession,
}

impl Harness {
    fn send(&mut self, event: InputEvent) -> Flow {
        self.machine.handle_event(&event, &mut self.session)
    }

    fn click(&mut self, (x, y): (f32, f32)) -> Flow {
        self.send(click(x, y))
    }

    fn apply(&mut self, action: Action) -> Flow {
        self.machine.apply(action, &mut self.session)
    }

    fn state(&self) -> AppState {
        self.machine.state()
    }

    /// Drive the machine into `target` through the normal transitions.
    fn goto(&mut self, target: AppState) {
        match target {
            AppState::StartMenu => {}
            AppState::SettingsSubmenu => {
                self.apply(Action::StartMenu(StartMenuAction::Settings));
            }
            AppState::Gameplay => {
                self.apply(Action::StartMenu(StartMenuAction::Play));
            }
            AppState::Paused => {
                self.goto(AppState::Gameplay);
                self.send(key(Key::Escape));
            }
            AppState::GameOver => {
                self.goto(AppState::Gameplay);
                self.machine.session_over();
            }
        }
        assert_eq!(self.state(), target);
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        machine: AppStateMachine::new(&ScreenConfig::default()),
        session: support::session(),
    }
}

#[rstest]
fn starts_in_start_menu(harness: Harness) {
    assert_eq!(harness.state(), AppState::StartMenu);
}

// ── transition table ──────────────────────────────────────────────────────────

#[rstest]
#[case::play(AppState::StartMenu, PLAY, AppState::Gameplay)]
#[case::settings(AppState::StartMenu, SETTINGS, AppState::SettingsSubmenu)]
#[case::back(AppState::SettingsSubmenu, BACK, AppState::StartMenu)]
#[case::resume(AppState::Paused, RESUME, AppState::Gameplay)]
#[case::exit_to_main(AppState::Paused, EXIT_TO_MAIN, AppState::StartMenu)]
#[case::play_again(AppState::GameOver, PLAY_AGAIN, AppState::Gameplay)]
fn clicking_a_button_transitions(
    mut harness: Harness,
    #[case] from: AppState,
    #[case] button: (f32, f32),
    #[case] to: AppState,
) {
    harness.goto(from);
    assert_eq!(harness.click(button), Flow::Continue);
    assert_eq!(harness.state(), to);
}

#[rstest]
#[case::start_menu_quit(AppState::StartMenu, QUIT)]
#[case::settings_exit_game(AppState::SettingsSubmenu, EXIT_GAME)]
#[case::game_over_quit(AppState::GameOver, GAME_OVER_QUIT)]
fn exit_buttons_end_the_game(mut harness: Harness, #[case] from: AppState, #[case] button: (f32, f32)) {
    harness.goto(from);
    assert_eq!(harness.click(button), Flow::Exit);
}

#[rstest]
#[case::start_menu(AppState::StartMenu)]
#[case::settings(AppState::SettingsSubmenu)]
#[case::gameplay(AppState::Gameplay)]
#[case::paused(AppState::Paused)]
#[case::game_over(AppState::GameOver)]
fn quit_request_exits_from_any_state(mut harness: Harness, #[case] from: AppState) {
    harness.goto(from);
    assert_eq!(harness.send(InputEvent::QuitRequested), Flow::Exit);
}

#[rstest]
fn play_resets_the_session(mut harness: Harness) {
    harness.session.player_mut().player_mut().lives = 1;
    harness.session.enemies_mut().clear();
    harness.click(PLAY);
    assert_eq!(harness.session.lives(), 3);
    assert_eq!(harness.session.enemies().len(), 8);
    assert_eq!(harness.session.score(), 0);
}

#[rstest]
fn play_again_resets_the_session(mut harness: Harness) {
    harness.goto(AppState::GameOver);
    harness.session.player_mut().player_mut().lives = 0;
    harness.click(PLAY_AGAIN);
    assert_eq!(harness.state(), AppState::Gameplay);
    assert_eq!(harness.session.lives(), 3);
}

#[rstest]
fn session_over_only_applies_during_gameplay(mut harness: Harness) {
    harness.machine.session_over();
    assert_eq!(harness.state(), AppState::StartMenu);
    harness.goto(AppState::Paused);
    harness.machine.session_over();
    assert_eq!(harness.state(), AppState::Paused);
}

// ── pause ─────────────────────────────────────────────────────────────────────

#[rstest]
fn escape_toggles_pause_without_touching_the_session(mut harness: Harness) {
    harness.goto(AppState::Gameplay);
    let enemies = harness.session.enemies().to_vec();
    let clock = harness.session.clock();

    harness.send(key(Key::Escape));
    assert_eq!(harness.state(), AppState::Paused);
    harness.send(key(Key::Escape));
    assert_eq!(harness.state(), AppState::Gameplay);

    assert_eq!(harness.session.enemies(), enemies.as_slice());
    assert_eq!(harness.session.clock(), clock);
    assert_eq!(harness.session.lives(), 3);
}

#[rstest]
fn resume_keeps_the_session(mut harness: Harness) {
    harness.goto(AppState::Gameplay);
    harness.session.player_mut().player_mut().lives = 2;
    harness.send(key(Key::Escape));
    harness.click(RESUME);
    assert_eq!(harness.session.lives(), 2);
}

#[rstest]
fn escape_does_nothing_in_menus(mut harness: Harness) {
    assert_eq!(harness.send(key(Key::Escape)), Flow::Continue);
    assert_eq!(harness.state(), AppState::StartMenu);
    harness.goto(AppState::GameOver);
    harness.send(key(Key::Escape));
    assert_eq!(harness.state(), AppState::GameOver);
}

// ── gameplay keys ─────────────────────────────────────────────────────────────

#[rstest]
fn space_shoots_once_cooled_down(mut harness: Harness) {
    harness.goto(AppState::Gameplay);
    harness.send(key(Key::Space));
    assert!(harness.session.bullets().is_empty(), "cooldown runs from reset");

    for _ in 0..25 {
        harness.session.update(Default::default(), support::STEP);
    }
    harness.send(key(Key::Space));
    assert_eq!(harness.session.bullets().len(), 1);
    assert_eq!(harness.state(), AppState::Gameplay);
}

#[rstest]
fn space_outside_gameplay_does_not_shoot(mut harness: Harness) {
    harness.goto(AppState::Paused);
    for _ in 0..25 {
        harness.session.update(Default::default(), support::STEP);
    }
    harness.send(key(Key::Space));
    assert!(harness.session.bullets().is_empty());
}

// ── foreign actions ───────────────────────────────────────────────────────────

#[rstest]
#[case::play_again_in_start(Action::GameOver(GameOverAction::PlayAgain))]
#[case::back_in_start(Action::Settings(SettingsAction::Back))]
#[case::exit_game_in_start(Action::Settings(SettingsAction::ExitGame))]
#[case::resume_in_start(Action::Paused(PauseAction::Resume))]
#[case::pause_in_start(Action::Gameplay(GameplayAction::Pause))]
fn actions_of_other_states_are_ignored(mut harness: Harness, #[case] action: Action) {
    harness.session.player_mut().player_mut().lives = 1;
    assert_eq!(harness.apply(action), Flow::Continue);
    assert_eq!(harness.state(), AppState::StartMenu);
    assert_eq!(harness.session.lives(), 1, "no reset happened");
}

#[rstest]
fn clicking_empty_space_does_nothing(mut harness: Harness) {
    assert_eq!(harness.click((50.0, 50.0)), Flow::Continue);
    assert_eq!(harness.state(), AppState::StartMenu);
}

#[rstest]
fn right_click_does_not_press_buttons(mut harness: Harness) {
    let event = InputEvent::PointerButton {
        button: PointerButton::Right,
        pos: Vec2::new(PLAY.0, PLAY.1),
        down: true,
    };
    harness.send(event);
    assert_eq!(harness.state(), AppState::StartMenu);
}

// ── menus ─────────────────────────────────────────────────────────────────────

#[rstest]
fn hover_highlights_button_under_pointer(mut harness: Harness) {
    harness.send(InputEvent::PointerMoved(Vec2::new(SETTINGS.0, SETTINGS.1)));
    let start = &harness.machine.menus().start;
    assert!(!start.is_highlighted(0));
    assert!(start.is_highlighted(1));
    assert!(start.buttons()[1].is_hovered());

    harness.send(InputEvent::PointerMoved(Vec2::new(10.0, 10.0)));
    assert!(!harness.machine.menus().start.is_highlighted(1));
}

#[rstest]
fn keyboard_navigates_menus(mut harness: Harness) {
    assert_eq!(harness.send(key(Key::Enter)), Flow::Continue, "nothing focused yet");
    harness.send(key(Key::Down)); // Play
    harness.send(key(Key::Down)); // Settings
    harness.send(key(Key::Enter));
    assert_eq!(harness.state(), AppState::SettingsSubmenu);

    harness.send(key(Key::Up)); // Exit Game
    harness.send(key(Key::Up)); // wraps to Back
    harness.send(key(Key::Enter));
    assert_eq!(harness.state(), AppState::StartMenu);
}

#[test]
fn menu_layout_is_centred() {
    let machine = AppStateMachine::new(&ScreenConfig::default());
    let menus = machine.menus();
    let labels: Vec<_> = menus.start.buttons().iter().map(|b| b.label).collect();
    assert_eq!(labels, ["Play", "Settings", "Quit"]);
    for b in menus.start.buttons() {
        assert_eq!(b.rect.x, 300.0);
        assert_eq!(b.rect.width, 200.0);
        assert_eq!(b.rect.height, 50.0);
    }
    assert_eq!(menus.start.title, "Spaceship War");
    assert_eq!(menus.game_over.title, "GAME OVER");
}
