use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use env_logger::{Env, Target};
use grid_snake::config::{AppConfig, ConfigError, EngineConfig};
use grid_snake::game::SimulationEngine;
use grid_snake::input::{self, GameInput};
use grid_snake::terminal_runtime::TerminalSession;

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a fixed grid, in the terminal")]
struct Cli {
    /// JSON settings file (defaults to the per-user config file when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arena width in tiles.
    #[arg(long)]
    width: Option<u16>,

    /// Arena height in tiles.
    #[arg(long)]
    height: Option<u16>,

    /// Number of segments the snake starts with.
    #[arg(long = "initial-length")]
    initial_length: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Append log output to this file (logging is off otherwise unless RUST_LOG is set).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(initial_length) = self.initial_length {
            config.initial_length = initial_length;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {error}");
        return ExitCode::FAILURE;
    }

    let mut settings = match AppConfig::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut settings);

    let (engine_config, tick_interval) = match validate(&settings) {
        Ok(validated) => validated,
        Err(error) => {
            eprintln!("Invalid settings: {error}");
            return ExitCode::FAILURE;
        }
    };

    let engine = match cli.seed {
        Some(seed) => SimulationEngine::with_seed(engine_config, seed),
        None => SimulationEngine::from_entropy(engine_config),
    };

    match run(engine, tick_interval) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("terminal error: {error}");
            eprintln!("Terminal error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn validate(settings: &AppConfig) -> Result<(EngineConfig, Duration), ConfigError> {
    Ok((settings.engine_config()?, settings.tick_interval()?))
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

/// Drives the engine at a fixed cadence, forwarding key presses between ticks.
fn run(mut engine: SimulationEngine, tick_interval: Duration) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut next_tick = Instant::now() + tick_interval;

    loop {
        session.draw(&engine.snapshot())?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        match input::poll_input(timeout)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Direction(direction)) => {
                engine.apply_direction(direction);
            }
            Some(GameInput::Restart) if !engine.state().active => {
                engine.restart();
                next_tick = Instant::now() + tick_interval;
            }
            Some(GameInput::Restart) | None => {}
        }

        let now = Instant::now();
        if now >= next_tick {
            engine.tick();
            next_tick += tick_interval;
            if next_tick < now {
                next_tick = now + tick_interval;
            }
        }
    }

    log::info!("quit with score {}", engine.state().score);
    Ok(())
}
