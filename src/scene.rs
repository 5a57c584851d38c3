//! Per-state draw routines. No game logic; this module only translates state
//! into [`Surface`] calls.

use std::io;

use crate::config::ScreenConfig;
use crate::display::{Color, Sprite, Surface};
use crate::entities::Body;
use crate::geometry::{Rect, Vec2};
use crate::menu::Menu;
use crate::session::GameSession;
use crate::state::{AppState, AppStateMachine};

const TITLE_SIZE: u16 = 64;
const BUTTON_TEXT_SIZE: u16 = 30;
const HUD_TEXT_SIZE: u16 = 24;
const FINAL_SCORE_SIZE: u16 = 32;
const HINT_SIZE: u16 = 16;

const LIFE_ICON_WIDTH: f32 = 25.0;
const LIFE_ICON_HEIGHT: f32 = 19.0;
const LIFE_ICON_SPACING: f32 = 30.0;

/// Render one complete frame for the current state.
pub fn render<S: Surface>(
    surface: &mut S,
    screen: &ScreenConfig,
    machine: &AppStateMachine,
    session: &GameSession,
) -> io::Result<()> {
    surface.clear()?;
    let menus = machine.menus();

    match machine.state() {
        AppState::StartMenu => {
            draw_menu(surface, screen, &menus.start, screen.height / 4.0 - 50.0)?;
        }
        AppState::SettingsSubmenu => {
            draw_menu(surface, screen, &menus.settings, screen.height / 4.0 - 50.0)?;
        }
        AppState::Gameplay => {
            draw_world(surface, session)?;
            draw_hud(surface, screen, session)?;
            draw_controls_hint(surface, screen)?;
        }
        AppState::Paused => {
            surface.fill_rect(Rect::new(0.0, 0.0, screen.width, screen.height), Color::DIM)?;
            draw_menu(surface, screen, &menus.pause, screen.height / 4.0)?;
        }
        AppState::GameOver => {
            draw_menu(surface, screen, &menus.game_over, screen.height / 4.0)?;
            surface.draw_text(
                &format!("Final Score: {}", session.score()),
                FINAL_SCORE_SIZE,
                Vec2::new(screen.width / 2.0, screen.height / 2.0 - 50.0),
                Color::WHITE,
            )?;
        }
    }

    surface.present()
}

fn draw_body<S: Surface, B: Body>(surface: &mut S, body: &B) -> io::Result<()> {
    if !body.is_visible() {
        return Ok(());
    }
    surface.draw_sprite(body.sprite(), body.entity().bounds())
}

fn draw_world<S: Surface>(surface: &mut S, session: &GameSession) -> io::Result<()> {
    for enemy in session.enemies() {
        draw_body(surface, enemy)?;
    }
    for bullet in session.bullets() {
        draw_body(surface, bullet)?;
    }
    draw_body(surface, session.player().player())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<S: Surface>(surface: &mut S, screen: &ScreenConfig, session: &GameSession) -> io::Result<()> {
    surface.draw_text(
        &format!("Score: {}", session.score()),
        HUD_TEXT_SIZE,
        Vec2::new(screen.width / 2.0, 10.0),
        Color::WHITE,
    )?;

    // Lives, one mini ship each, top right
    for i in 0..session.lives() {
        let rect = Rect::new(
            screen.width - 100.0 + LIFE_ICON_SPACING * i as f32,
            15.0,
            LIFE_ICON_WIDTH,
            LIFE_ICON_HEIGHT,
        );
        surface.draw_sprite(Sprite::LifeIcon, rect)?;
    }
    Ok(())
}

fn draw_controls_hint<S: Surface>(surface: &mut S, screen: &ScreenConfig) -> io::Result<()> {
    surface.draw_text(
        "← → / A D : Move   SPACE : Shoot   ESC : Pause",
        HINT_SIZE,
        Vec2::new(screen.width / 2.0, screen.height - HINT_SIZE as f32),
        Color::DARK_GREY,
    )
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_menu<S: Surface, A: Copy>(
    surface: &mut S,
    screen: &ScreenConfig,
    menu: &Menu<A>,
    title_y: f32,
) -> io::Result<()> {
    surface.draw_text(
        menu.title,
        TITLE_SIZE,
        Vec2::new(screen.width / 2.0, title_y),
        Color::WHITE,
    )?;

    for (i, button) in menu.buttons().iter().enumerate() {
        let (idle, highlighted) = button.style.colors();
        let fill = if menu.is_highlighted(i) { highlighted } else { idle };
        surface.fill_rect(button.rect, fill)?;

        // Label centred in the button
        let center = button.rect.center();
        let anchor = Vec2::new(center.x, center.y - f32::from(BUTTON_TEXT_SIZE) / 2.0);
        surface.draw_text(button.label, BUTTON_TEXT_SIZE, anchor, Color::WHITE)?;
    }
    Ok(())
}
