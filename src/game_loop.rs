//! Fixed-rate tick driver.
//!
//! Each tick: poll input → feed events to the state machine → update the
//! session while in gameplay → render. The clock sleep at the end of a tick
//! is the only blocking point.

use std::time::Duration;

use log::info;

use crate::clock::Clock;
use crate::config::{GameConfig, ScreenConfig};
use crate::display::Surface;
use crate::error::GameError;
use crate::input::InputSource;
use crate::scene;
use crate::session::{GameSession, SessionStatus};
use crate::state::{AppState, AppStateMachine, Flow};

pub struct GameLoop<S, I, C> {
    surface: S,
    input: I,
    clock: C,
    machine: AppStateMachine,
    session: GameSession,
    screen: ScreenConfig,
    frame: Duration,
    ticks: u64,
}

impl<S: Surface, I: InputSource, C: Clock> GameLoop<S, I, C> {
    /// Fails with [`GameError::Config`] if `config` does not validate.
    pub fn new(config: &GameConfig, surface: S, input: I, clock: C) -> Result<Self, GameError> {
        config.validate()?;
        Self::with_session(config, GameSession::new(config), surface, input, clock)
    }

    pub fn with_session(
        config: &GameConfig,
        session: GameSession,
        surface: S,
        input: I,
        clock: C,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            surface,
            input,
            clock,
            machine: AppStateMachine::new(&config.screen),
            session,
            screen: config.screen.clone(),
            frame: Duration::from_secs(1) / config.tick_rate,
            ticks: 0,
        })
    }

    /// Run ticks until an exit action or quit request.
    pub fn run(&mut self) -> Result<(), GameError> {
        info!("game loop started at {:?} per tick", self.frame);
        loop {
            let frame_start = self.clock.now();
            if self.tick()? == Flow::Exit {
                break;
            }

            let elapsed = self.clock.now().saturating_sub(frame_start);
            if elapsed < self.frame {
                self.clock.sleep(self.frame - elapsed);
            }
        }
        info!("game loop stopped after {} ticks", self.ticks);
        Ok(())
    }

    /// One tick. An exit stops it at once: later events in the same batch
    /// are dropped and nothing is updated or drawn.
    pub fn tick(&mut self) -> Result<Flow, GameError> {
        self.ticks += 1;
        let frame = self.input.poll()?;

        for event in &frame.events {
            if self.machine.handle_event(event, &mut self.session) == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }

        if self.machine.state() == AppState::Gameplay
            && self.session.update(frame.held, self.frame) == SessionStatus::Over
        {
            self.machine.session_over();
        }

        scene::render(&mut self.surface, &self.screen, &self.machine, &self.session)?;
        Ok(Flow::Continue)
    }

    pub fn state(&self) -> AppState {
        self.machine.state()
    }

    pub fn machine_mut(&mut self) -> &mut AppStateMachine {
        &mut self.machine
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Ticks processed so far, including the one that exited.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Fixed simulation step.
    pub fn frame(&self) -> Duration {
        self.frame
    }
}
