//! Lap racer entry point
//!
//! Runs one AI-driven race headless and exits when it finishes.

use std::process::ExitCode;

use arcade_sims::app::{HeadlessSurface, RaceGame, RacePilot, Session};
use arcade_sims::sim::Driver;
use arcade_sims::{ArcadeError, Settings};

fn run() -> Result<(), ArcadeError> {
    let settings = Settings::load()?;
    let game = RaceGame::new(settings.race_config(Driver::Ai));
    let mut session = Session::new(
        game,
        RacePilot::default(),
        HeadlessSurface::default(),
        settings.frame_rate,
        settings.pacing(),
    );
    session.run()?;

    log::info!(
        "Player finished in position {} ({} frames presented)",
        session.game.state.player_position(),
        session.surface.frames
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Racer starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal: {}", e);
            eprintln!("racer: {e}");
            ExitCode::FAILURE
        }
    }
}
