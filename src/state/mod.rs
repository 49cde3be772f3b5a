mod game_state;
mod simon;

pub use game_state::GameState;
pub use simon::{Reveal, SimonMachine, SimonPress, SimonRetry};
