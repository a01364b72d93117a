//! Game-mode state machine shared by both games

use serde::{Deserialize, Serialize};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the confirm action to start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended by a failure (collision, boundary exit)
    GameOver,
    /// Run ended by success (lap target reached)
    Finished,
}

/// What the confirm action does in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseCommand {
    /// Reset the session and start playing
    Start,
    /// Reset the session and go back to the menu
    ReturnToMenu,
    /// Confirm has no phase effect (game-specific meaning while playing)
    None,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Finished)
    }

    /// Resolve a confirm press against the current phase
    pub fn on_confirm(self) -> PhaseCommand {
        match self {
            GamePhase::Menu => PhaseCommand::Start,
            GamePhase::GameOver | GamePhase::Finished => PhaseCommand::ReturnToMenu,
            GamePhase::Playing => PhaseCommand::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game over",
            GamePhase::Finished => "finished",
        }
    }
}
