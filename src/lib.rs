//! Spaceship War, a fixed-tick arcade shooter.
//!
//! The engine is a deterministic per-tick simulation ([`session`]) driven by
//! a small set of application states ([`state`]) and a rate-limited loop
//! ([`game_loop`]). Drawing, input and time are collaborators behind traits
//! ([`display::Surface`], [`input::InputSource`], [`clock::Clock`]); the
//! crate ships crossterm implementations of the first two.

pub mod clock;
pub mod collision;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game_loop;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod menu;
pub mod player;
pub mod scene;
pub mod session;
pub mod spawn;
pub mod state;
