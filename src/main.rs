use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use spaceship_war::clock::SystemClock;
use spaceship_war::config::GameConfig;
use spaceship_war::display::{TerminalGuard, TerminalSurface};
use spaceship_war::game_loop::GameLoop;
use spaceship_war::input::TerminalInput;
use spaceship_war::logging;

/// Shoot down the enemy waves before they ram your ship.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON file overriding the default game settings; a missing file means
    /// defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for enemy spawns, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Target ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_or_default(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(fps) = args.fps {
        config.tick_rate = fps;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose, args.log_file.as_deref()).context("failed to open log file")?;

    let config = load_config(&args).context("invalid configuration")?;
    info!("starting with {:?}", config);

    let surface = TerminalSurface::stdout(config.screen.width, config.screen.height)
        .context("failed to query terminal size")?;
    let input = TerminalInput::new(config.screen.width, config.screen.height);

    // Restores the terminal when dropped, also on the error path.
    let _guard = TerminalGuard::enter().context("failed to set up terminal")?;
    let mut game = GameLoop::new(&config, surface, input, SystemClock::new())?;
    game.run().context("game loop failed")?;
    Ok(())
}
