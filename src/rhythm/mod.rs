//! Beat timing: the phase clock, what makes a beat fire, and per-beat usage flags.

mod beat_clock;
mod beat_driver;
mod beat_slots;

pub use beat_clock::BeatClock;
pub use beat_driver::{BeatDriver, BeatPulseSender, BeatSchedule, BeatSource};
pub use beat_slots::{BeatSlot, BeatSlots};
