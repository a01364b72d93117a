//! Flap-through-pipes entry point
//!
//! Runs the pipe game headless in attract mode until the pilot quits.

use std::process::ExitCode;

use arcade_sims::app::{FlappyGame, FlappyPilot, HeadlessSurface, Session};
use arcade_sims::highscores::now_millis;
use arcade_sims::{ArcadeError, HighScores, Settings};

fn run() -> Result<(), ArcadeError> {
    let settings = Settings::load()?;
    let scores_path = settings.high_scores_path();
    let scores = HighScores::load(&scores_path)?;
    if let Some(best) = scores.top_score() {
        log::info!("Best score so far: {}", best);
    }

    let seed = settings.seed.unwrap_or_else(now_millis);
    let game = FlappyGame::new(seed, scores, Some(scores_path));
    let mut session = Session::new(
        game,
        FlappyPilot::new(1),
        HeadlessSurface::default(),
        settings.frame_rate,
        settings.pacing(),
    );
    session.run()?;

    log::info!(
        "Final score {} ({} frames presented)",
        session.game.state.score,
        session.surface.frames
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal: {}", e);
            eprintln!("flappy: {e}");
            ExitCode::FAILURE
        }
    }
}
