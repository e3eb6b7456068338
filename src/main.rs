//! LCD Dodger headless runner
//!
//! Plays the game on the host against a simple autopilot stick and prints the
//! final LCD frame. Useful for tuning without a board on the desk.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;

use lcd_dodger::consts::DEFAULT_SEED;
use lcd_dodger::platform::{Headless, StickReading};
use lcd_dodger::sim::{GamePhase, Session};
use lcd_dodger::{ConfigError, Game, LcdPreset, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// LCD size: 16x2 or 20x4
    #[arg(long, default_value = "16x2")]
    preset: String,
    /// JSON settings file (overrides --preset)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Give up after this many frames
    #[arg(long, default_value_t = 6_000)]
    frames: u32,
    /// Print a JSON run summary
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Error)]
enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unknown LCD preset '{0}'")]
    UnknownPreset(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    display: String,
    phase: GamePhase,
    #[serde(rename = "durationMs")]
    duration_ms: u64,
    frames: u32,
    #[serde(rename = "schedulerTicks")]
    scheduler_ticks: u64,
    #[serde(rename = "obstaclesAlive")]
    obstacles_alive: usize,
    #[serde(rename = "moveIntervalMs")]
    move_interval_ms: u64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Bad configuration: {}", err);
            std::process::exit(1);
        }
    };
    let geometry = settings.geometry;
    let interval = settings.tuning.driver_interval_ms;

    let mut board = Headless::new(geometry);
    let mut game = match Game::new(settings, cli.seed, &mut board) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Bad configuration: {}", err);
            std::process::exit(1);
        }
    };

    let mut frames = 0;
    while frames < cli.frames && game.phase() != GamePhase::GameOver {
        board.advance(interval);
        board.stick = steer(game.session());
        game.poll(&mut board);
        frames += 1;
    }

    println!("{}", board.screen.render());

    if cli.summary {
        let session = game.session();
        let duration_ms = if session.phase == GamePhase::GameOver {
            session.duration_ms
        } else {
            board.now_ms.saturating_sub(session.started_ms)
        };
        let summary = RunSummary {
            seed: cli.seed,
            display: format!("{}x{}", geometry.width, geometry.height),
            phase: session.phase,
            duration_ms,
            frames,
            scheduler_ticks: game.scheduler().ticks(),
            obstacles_alive: session.obstacles.len(),
            move_interval_ms: session.pacing.move_interval_ms,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(err) => log::warn!("Could not write summary: {}", err),
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, LoadError> {
    if let Some(path) = &cli.config {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;
        return Ok(Settings::from_json(&json)?);
    }
    let preset = LcdPreset::from_str(&cli.preset)
        .ok_or_else(|| LoadError::UnknownPreset(cli.preset.clone()))?;
    Ok(Settings::from_preset(preset))
}

/// Autopilot: sidestep any obstacle closing in on the player's row
fn steer(session: &Session) -> StickReading {
    const LOW: i32 = 0;
    const HIGH: i32 = 1023;
    let center = StickReading::CENTER;

    match session.phase {
        GamePhase::Setup => StickReading::new(HIGH, center.y),
        GamePhase::GameOver => center,
        GamePhase::Running | GamePhase::PreDirectionChange => {
            let player = session.player;
            // Obstacles come from the side opposite their travel
            let upstream = -session.direction.dx();
            let threatened = |row: i32| {
                session.obstacles.iter().any(|o| {
                    let ahead = (o.pos.x - player.x) * upstream;
                    o.pos.y == row && (0..=3).contains(&ahead)
                })
            };

            if !threatened(player.y) {
                return center;
            }
            for dy in [-1, 1] {
                let row = player.y + dy;
                if (session.geometry.y_min()..=session.geometry.y_max()).contains(&row)
                    && !threatened(row)
                {
                    let y = if dy < 0 { LOW } else { HIGH };
                    return StickReading::new(center.x, y);
                }
            }
            center
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("lcd-dodger").chain(args.iter().copied()))
    }

    #[test]
    fn test_load_settings_errors_are_typed() {
        assert!(matches!(
            load_settings(&cli(&["--preset", "40x2"])),
            Err(LoadError::UnknownPreset(name)) if name == "40x2"
        ));
        assert!(matches!(
            load_settings(&cli(&["--config", "/nonexistent/lcd-dodger.json"])),
            Err(LoadError::Read { .. })
        ));
        let settings = load_settings(&cli(&["--preset", "20x4"])).unwrap();
        assert_eq!(settings.geometry.height, 4);
    }
}
