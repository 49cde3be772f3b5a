use serde::{Deserialize, Serialize};

/// Which beat and press handlers are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// The pattern is being demonstrated; gameplay input is closed.
    SimonTeach,
    /// The player repeats the demonstrated pattern.
    SimonPlay,
    /// The player builds commands freely.
    #[default]
    Freeplay,
}

impl GameState {
    /// Whether gameplay input is accepted in this state.
    pub fn accepts_input(self) -> bool {
        !matches!(self, Self::SimonTeach)
    }

    pub fn is_simon(self) -> bool {
        matches!(self, Self::SimonTeach | Self::SimonPlay)
    }
}
