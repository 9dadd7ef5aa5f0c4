//! Headless shooting-gallery round
//!
//! Usage: `gallery [config.toml|config.ron] [--fallback]`
//!
//! Loads the physics engine (or forces the fallback), plays one timed round
//! with a simulated shooter and logs the final score.

mod config;
mod round;

use gallery_physics::config::ConfigError;
use gallery_physics::foundation::logging;
use gallery_physics::prelude::*;
use thiserror::Error;

use crate::config::GameConfig;
use crate::round::{RoundSummary, Shooter};

/// Application-level errors
#[derive(Error, Debug)]
enum AppError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Unrecognized command-line argument
    #[error("Unknown argument: {0}")]
    Usage(String),
}

struct Args {
    config_path: Option<String>,
    force_fallback: bool,
}

fn parse_args() -> Result<Args, AppError> {
    let mut args = Args {
        config_path: None,
        force_fallback: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--fallback" => args.force_fallback = true,
            flag if flag.starts_with("--") => return Err(AppError::Usage(flag.to_string())),
            path if args.config_path.is_none() => args.config_path = Some(path.to_string()),
            other => return Err(AppError::Usage(other.to_string())),
        }
    }
    Ok(args)
}

fn run() -> Result<RoundSummary, AppError> {
    let args = parse_args()?;
    let config = GameConfig::load_or_default(args.config_path.as_deref())?;
    log::info!("Starting round with {:?}", config.gameplay);

    let mut session = if args.force_fallback {
        let loader = UnavailableLoader::new("disabled with --fallback");
        pollster::block_on(GameSession::start(config.physics.clone(), config.session.clone(), &loader))
    } else {
        pollster::block_on(GameSession::start_default(config.physics.clone(), config.session.clone()))
    };

    let mut shooter = Shooter::new(&config.gameplay, config.physics.seed);
    Ok(round::play(&mut session, &config.gameplay, &mut shooter))
}

fn main() {
    logging::init();

    match run() {
        Ok(summary) => {
            let backend = summary.backend.map_or_else(|| "none".to_string(), |b| b.to_string());
            log::info!(
                "Round over: score {} ({}/{} shots hit, {} backend)",
                summary.score,
                summary.hits,
                summary.shots,
                backend
            );
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
