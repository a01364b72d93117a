//! Platform abstraction layer
//!
//! Handles the pieces between the simulation and the outside world:
//! - Keyboard mapping and input edges
//! - Frame timing and fixed-step accumulation

pub mod clock;
pub mod input;

pub use clock::{FixedTimestep, FrameClock, Pacing};
pub use input::{ActionStates, InputAction, InputCollector, InputSnapshot, Key, KeyBindings};
