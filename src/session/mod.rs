//! The orchestrator tying beats, judgment, matching and scoring together.

mod events;
mod rhythm_session;

pub use events::{MissReason, PressOutcome, SessionEvent};
pub use rhythm_session::RhythmSession;
