//! Keyboard mapping and per-frame input snapshots

use std::collections::HashMap;

/// Physical keys the games understand. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    LShift,
    RShift,
    Space,
    Escape,
    Other(u32),
}

/// Game actions keys are bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Accelerate,
    Brake,
    /// Modifier turning brake into reverse
    Reverse,
    SteerLeft,
    SteerRight,
    /// Start / restart / flap
    Confirm,
    Quit,
}

const ACTION_COUNT: usize = 7;

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::Accelerate => 0,
            InputAction::Brake => 1,
            InputAction::Reverse => 2,
            InputAction::SteerLeft => 3,
            InputAction::SteerRight => 4,
            InputAction::Confirm => 5,
            InputAction::Quit => 6,
        }
    }
}

/// Down/up state for every action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    /// Actions down in either set
    pub fn union(self, other: ActionStates) -> ActionStates {
        let mut down = self.down;
        for (d, o) in down.iter_mut().zip(other.down) {
            *d |= o;
        }
        ActionStates { down }
    }

    pub fn any(&self) -> bool {
        self.down.iter().any(|d| *d)
    }
}

/// Key to action table
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Key, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use InputAction::*;
        let map = [
            (Key::W, Accelerate),
            (Key::Up, Accelerate),
            (Key::S, Brake),
            (Key::Down, Brake),
            (Key::LShift, Reverse),
            (Key::RShift, Reverse),
            (Key::A, SteerLeft),
            (Key::Left, SteerLeft),
            (Key::D, SteerRight),
            (Key::Right, SteerRight),
            (Key::Space, Confirm),
            (Key::Escape, Quit),
        ]
        .into_iter()
        .collect();
        Self { map }
    }
}

impl KeyBindings {
    pub fn action_for(&self, key: Key) -> Option<InputAction> {
        self.map.get(&key).copied()
    }

    /// Held action states for a set of held keys; unbound keys are ignored
    pub fn resolve(&self, held: &[Key]) -> ActionStates {
        let mut states = ActionStates::default();
        for action in held.iter().filter_map(|k| self.action_for(*k)) {
            states.set(action, true);
        }
        states
    }
}

/// Input as seen by one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Actions whose key is down this frame
    pub held: ActionStates,
    /// Actions whose key went down this frame
    pub pressed: ActionStates,
}

impl InputSnapshot {
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.is_down(action)
    }

    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.is_down(action)
    }

    /// Drop the one-shot presses, keeping held state
    pub fn without_presses(&self) -> Self {
        Self {
            held: self.held,
            pressed: ActionStates::default(),
        }
    }
}

/// Turns successive held-key sets into snapshots with press edges
#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    bindings: KeyBindings,
    previous: ActionStates,
}

impl InputCollector {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            previous: ActionStates::default(),
        }
    }

    pub fn collect(&mut self, held_keys: &[Key]) -> InputSnapshot {
        let held = self.bindings.resolve(held_keys);
        let mut pressed = ActionStates::default();
        for i in 0..ACTION_COUNT {
            pressed.down[i] = held.down[i] && !self.previous.down[i];
        }
        self.previous = held;
        InputSnapshot { held, pressed }
    }
}
