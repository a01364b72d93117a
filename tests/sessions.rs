//! End-to-end sessions driven through the public API

use arcade_sims::app::{Game, HeadlessSurface, RaceGame, RacePilot, ScriptedInput, Session};
use arcade_sims::app::{FlappyGame, FlappyPilot};
use arcade_sims::consts::SIM_DT;
use arcade_sims::consts::flappy::{GRAVITY, SCREEN_HEIGHT, TERMINAL_FALL_SPEED};
use arcade_sims::platform::{Key, Pacing};
use arcade_sims::sim::{Driver, GameOverCause, GamePhase, RaceConfig};
use arcade_sims::{HighScores, Settings};

fn headless<G, I>(game: G, input: I) -> Session<G, I, HeadlessSurface>
where
    G: Game,
    I: arcade_sims::app::InputSource<G>,
{
    Session::new(game, input, HeadlessSurface::default(), 60, Pacing::Unthrottled)
}

#[test]
fn flappy_without_flaps_falls_out() {
    let fall = (SCREEN_HEIGHT / TERMINAL_FALL_SPEED / SIM_DT).ceil() as usize;
    let ramp = (TERMINAL_FALL_SPEED / GRAVITY / SIM_DT).ceil() as usize;

    // Space starts the run, then nothing until the script ends
    let mut script = vec![vec![Key::Space]];
    script.extend(std::iter::repeat_n(Vec::new(), fall + ramp));
    let game = FlappyGame::new(42, HighScores::new(), None);
    let mut session = headless(game, ScriptedInput::new(script));
    session.run().unwrap();

    assert_eq!(session.game.phase(), GamePhase::GameOver);
    assert_eq!(session.game.state.game_over_cause, Some(GameOverCause::Boundary));
    assert_eq!(session.game.state.score, 0);
    assert!(session.surface.last_triangle_count > 0);
}

#[test]
fn flappy_space_after_game_over_returns_to_menu() {
    let mut script = vec![vec![Key::Space]];
    script.extend(std::iter::repeat_n(Vec::new(), 200));
    script.push(vec![Key::Space]);
    script.push(Vec::new());
    let game = FlappyGame::new(7, HighScores::new(), None);
    let mut session = headless(game, ScriptedInput::new(script));
    session.run().unwrap();

    assert_eq!(session.game.phase(), GamePhase::Menu);
    assert_eq!(session.game.state.score, 0);
}

#[test]
fn flappy_pilot_saves_high_scores() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        data_dir: dir.path().to_path_buf(),
        seed: Some(2024),
        unthrottled: true,
        ..Default::default()
    };
    let path = settings.high_scores_path();
    let game = FlappyGame::new(2024, HighScores::new(), Some(path.clone()));
    let mut session = Session::new(
        game,
        FlappyPilot::new(2),
        HeadlessSurface::default(),
        settings.frame_rate,
        settings.pacing(),
    );
    session.run_frames(400_000).unwrap();

    assert!(!session.is_running());
    assert_eq!(session.input.completed(), 2);
    // Only scoring runs reach the file
    let saved = HighScores::load(&path).unwrap();
    assert_eq!(saved, session.game.scores);
}

#[test]
fn racer_ai_player_finishes_three_laps() {
    let config = RaceConfig {
        player_driver: Driver::Ai,
        ..Default::default()
    };
    let mut session = headless(RaceGame::new(config), RacePilot::default());
    let ran = session.run_frames(120 * 60).unwrap();

    assert!(!session.is_running(), "race still running after {} frames", ran);
    assert_eq!(session.game.phase(), GamePhase::Finished);
    let player = session.game.state.player();
    assert_eq!(player.lap.laps, 3);
    assert!(player.finished_tick.is_some());
    assert!((1..=4).contains(&session.game.state.player_position()));
}

#[test]
fn racer_escape_quits_mid_race() {
    let script = vec![vec![Key::Space], vec![Key::W], vec![Key::W, Key::A], vec![Key::Escape]];
    let mut session = headless(RaceGame::new(RaceConfig::default()), ScriptedInput::new(script));
    session.run().unwrap();

    assert_eq!(session.game.phase(), GamePhase::Playing);
    assert_eq!(session.surface.frames, 3);
    assert!(session.game.state.player().speed > 0.0);
}
