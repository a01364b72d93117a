//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (cars by id, pipes oldest first)
//! - No rendering or platform dependencies

pub mod car;
pub mod collision;
pub mod flappy;
pub mod lap;
pub mod phase;
pub mod projection;
pub mod race;
pub mod track;

pub use car::{Car, CarClass, CarControls, CarStats, Driver, clamp_speed, turn_rate};
pub use collision::{Aabb, Pipe, hits_pipe, out_of_bounds};
pub use flappy::{Bird, Difficulty, FlappyInput, FlappyState, GameOverCause};
pub use lap::{LapEvent, LapTracker};
pub use phase::{GamePhase, PhaseCommand};
pub use projection::{Camera, Viewport};
pub use race::{PLAYER_ID, RaceConfig, RaceInput, RaceState};
pub use track::Track;
